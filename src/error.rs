//! Error types shared by the display pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors from building or pushing a frame
#[derive(Error, Debug)]
pub enum Error {
    /// External command could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// External command ran but reported failure
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// Stats command printed something that is not the expected JSON
    #[error("malformed output from `{command}`: {source}")]
    MalformedStats {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stats command output lacks a required metric
    #[error("`{command}` reported no {field}")]
    MissingStat {
        command: String,
        field: &'static str,
    },

    /// Color string is not 6 hex digits
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Palette file could not be read
    #[error("read {path}: {source}")]
    PaletteRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Palette file is not valid TOML
    #[error("parse palette: {0}")]
    PaletteParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
