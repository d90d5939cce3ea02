//! Display colors.
//!
//! The built-in palette matches the stock look; any subset of it can be
//! overridden from a TOML file passed with `--palette`.
//!
//! # Example TOML
//!
//! ```toml
//! foreground = "#ff99ff"
//! background = "202020"
//! gauge_high = "ff3030"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Named colors shared by every display module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Lit keys, and the first digit of a two-digit value.
    pub foreground: Rgb,
    /// PM hours and the second digit of a two-digit value.
    pub foreground_alt: Rgb,
    /// Both digits of a value land on the same key.
    pub foreground_combined: Rgb,
    /// Unlit keys.
    pub background: Rgb,
    /// Divider key in the binary clock.
    pub separator: Rgb,
    /// Gauge color at 0% usage.
    pub gauge_low: Rgb,
    /// Gauge color at 100% usage.
    pub gauge_high: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb::new(0xff, 0x99, 0xff),
            foreground_alt: Rgb::new(0x94, 0xb2, 0xff),
            foreground_combined: Rgb::new(0xcf, 0xa4, 0xff),
            background: Rgb::new(0xf1, 0xf1, 0xf1),
            separator: Rgb::new(0x78, 0x78, 0x78),
            gauge_low: Rgb::new(0x94, 0xb2, 0xff),
            gauge_high: Rgb::new(0xff, 0x40, 0x60),
        }
    }
}

impl Palette {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::PaletteRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string. Missing entries keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
