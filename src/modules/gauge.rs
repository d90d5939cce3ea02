//! System load gauges on the keypad.
//!
//! Each metric owns one keypad column of three keys, lit bottom to top in
//! proportion to usage. The column color is picked from a 7-step
//! low → high gradient by usage bucket; a partially filled key shows a
//! shade between background and that color.

use super::{BuildContext, DisplayModule};
use crate::color::{gradient, Rgb};
use crate::error::Result;
use crate::keymap::KeyMap;
use crate::palette::Palette;

/// Keypad columns, bottom key first.
const CPU_KEYS: [&str; 3] = ["KP1", "KP4", "KP7"];
const MEMORY_KEYS: [&str; 3] = ["KP2", "KP5", "KP8"];
const GPU_KEYS: [&str; 3] = ["KP3", "KP6", "KP9"];

/// Gradient length is `STEPS + 2` with bounds included.
const STEPS: usize = 5;

pub struct SystemGauge {
    name: &'static str,
    update_rate: f64,
    palette: Palette,
    levels: Vec<Rgb>,
}

impl SystemGauge {
    pub fn new(name: &'static str, update_rate: f64, palette: Palette) -> Self {
        Self {
            name,
            update_rate,
            levels: gradient(palette.gauge_low, palette.gauge_high, STEPS, true),
            palette,
        }
    }

    /// Level color for a usage percentage.
    fn level_color(&self, usage: f64) -> Rgb {
        let buckets = self.levels.len();
        let bucket = ((usage / 100.0) * buckets as f64).floor() as usize;
        self.levels[bucket.min(buckets - 1)]
    }

    fn render_column(&self, keys: &mut KeyMap, column: &[&str; 3], usage: f64) {
        let usage = if usage.is_nan() {
            0.0
        } else {
            usage.clamp(0.0, 100.0)
        };
        let level = self.level_color(usage);

        let scaled = usage / 100.0 * column.len() as f64;
        let full = scaled.floor() as usize;

        for (i, &key) in column.iter().enumerate() {
            let color = if i < full {
                level
            } else if i == full {
                let shades = gradient(self.palette.background, level, STEPS, true);
                let idx = ((scaled - full as f64) * (shades.len() - 1) as f64).round() as usize;
                shades[idx.min(shades.len() - 1)]
            } else {
                self.palette.background
            };
            keys.insert(key, color);
        }
    }
}

impl DisplayModule for SystemGauge {
    fn name(&self) -> &str {
        self.name
    }

    fn update_rate(&self) -> f64 {
        self.update_rate
    }

    fn description(&self) -> &str {
        "CPU, memory and GPU usage on keypad columns"
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<Option<KeyMap>> {
        let stats = ctx.stats.poll()?;
        let mut keys = KeyMap::new();
        self.render_column(&mut keys, &CPU_KEYS, stats.cpu);
        self.render_column(&mut keys, &MEMORY_KEYS, stats.memory);
        self.render_column(&mut keys, &GPU_KEYS, stats.gpu);
        Ok(Some(keys))
    }
}
