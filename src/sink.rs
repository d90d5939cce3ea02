//! Where finished frames go.

use tracing::debug;

use crate::command::CommandLine;
use crate::error::Result;
use crate::keymap::KeyMap;

/// Receives one merged key mapping per tick.
pub trait LedSink {
    fn push(&mut self, keys: &KeyMap) -> Result<()>;
}

/// Sends frames as `key=rrggbb` arguments to an LED-control command,
/// `keyledsctl set-leds` by default.
pub struct CommandSink {
    command: CommandLine,
}

impl CommandSink {
    pub fn new(command: CommandLine) -> Self {
        Self { command }
    }
}

impl LedSink for CommandSink {
    /// Empty frames are not sent.
    fn push(&mut self, keys: &KeyMap) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        debug!("Setting {} keys", keys.len());
        self.command.run(&keys.to_args())
    }
}

/// Keeps every non-empty frame in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<KeyMap>,
}

impl LedSink for RecordingSink {
    fn push(&mut self, keys: &KeyMap) -> Result<()> {
        if !keys.is_empty() {
            self.frames.push(keys.clone());
        }
        Ok(())
    }
}
