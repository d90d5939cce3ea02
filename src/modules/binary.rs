//! Binary clock faces.

use chrono::Timelike;

use super::{twelve_hour, BuildContext, DisplayModule};
use crate::error::Result;
use crate::keymap::{function_key, KeyMap, FUNCTION_KEYS};
use crate::palette::Palette;

/// Number-row keys carrying bits, MSB first. `6` is the separator.
const BIT_KEYS: [&str; 11] = [
    "1", "2", "3", "4", "5", "7", "8", "9", "0", "MINUS", "EQUAL",
];
const SEPARATOR_KEY: &str = "6";
const GRAVE_KEY: &str = "GRAVE";

/// Which fields are rendered and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryLayout {
    /// 5-bit hour then 6-bit minute across the number row.
    HourMinute,
    /// 6-bit minute then 6-bit second across `GRAVE` + number row, with the
    /// 12-hour hour lit on the function row.
    MinuteSecond,
    /// Hour and zero-padded minute read as one decimal number (09:07 → 907),
    /// shown as 12 bits on F1..F12.
    Merged,
}

pub struct BinaryClock {
    name: &'static str,
    update_rate: f64,
    layout: BinaryLayout,
    palette: Palette,
}

impl BinaryClock {
    pub fn new(name: &'static str, update_rate: f64, layout: BinaryLayout, palette: Palette) -> Self {
        Self {
            name,
            update_rate,
            layout,
            palette,
        }
    }

    /// Set `keys[i]` from bit `i` of `bits` (MSB first).
    fn render_bits<'k>(&self, out: &mut KeyMap, keys: impl IntoIterator<Item = &'k str>, bits: &str) {
        for (key, bit) in keys.into_iter().zip(bits.chars()) {
            let color = if bit == '1' {
                self.palette.foreground
            } else {
                self.palette.background
            };
            out.insert(key, color);
        }
    }
}

impl DisplayModule for BinaryClock {
    fn name(&self) -> &str {
        self.name
    }

    fn update_rate(&self) -> f64 {
        self.update_rate
    }

    fn description(&self) -> &str {
        match self.layout {
            BinaryLayout::HourMinute => "Binary hour and minute on the number row",
            BinaryLayout::MinuteSecond => {
                "Binary minute and second on the number row, hour on F-keys"
            }
            BinaryLayout::Merged => "Hour and minute as one 12-bit number on F-keys",
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<Option<KeyMap>> {
        let now = ctx.now;
        let mut keys = KeyMap::new();

        match self.layout {
            BinaryLayout::HourMinute => {
                let bits = format!("{:05b}{:06b}", now.hour(), now.minute());
                self.render_bits(&mut keys, BIT_KEYS, &bits);
                keys.insert(SEPARATOR_KEY, self.palette.separator);
            }
            BinaryLayout::MinuteSecond => {
                let bits = format!("{:06b}{:06b}", now.minute(), now.second());
                let row = std::iter::once(GRAVE_KEY).chain(BIT_KEYS);
                self.render_bits(&mut keys, row, &bits);
                keys.insert(SEPARATOR_KEY, self.palette.separator);

                for key in FUNCTION_KEYS {
                    keys.insert(key, self.palette.background);
                }
                keys.insert(function_key(twelve_hour(now.hour())), self.palette.foreground);
            }
            BinaryLayout::Merged => {
                // At most 2359, which fits in 12 bits
                let value = now.hour() * 100 + now.minute();
                let bits = format!("{value:012b}");
                self.render_bits(&mut keys, FUNCTION_KEYS, &bits);
            }
        }

        Ok(Some(keys))
    }
}
