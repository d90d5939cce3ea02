//! External command invocation shared by the LED sink and the stats source.

use std::fmt;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Program plus leading arguments, split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Returns `None` for an empty or all-blank command line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn command(&self, extra: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(extra);
        cmd
    }

    /// Run to completion with `extra` appended; non-zero exit is an error.
    pub fn run(&self, extra: &[String]) -> Result<()> {
        self.output(extra).map(drop)
    }

    /// Run to completion and return stdout.
    pub fn output(&self, extra: &[String]) -> Result<String> {
        debug!("exec {} ({} extra args)", self, extra.len());
        let output = self
            .command(extra)
            .output()
            .map_err(|source| Error::Spawn {
                command: self.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: self.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for CommandLine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| "command must not be empty".to_string())
    }
}
