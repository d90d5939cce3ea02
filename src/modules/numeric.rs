//! Numeric clock face.
//!
//! The hour lights one function key (F1..F12). Minutes light two digit keys
//! on the number row; seconds, when enabled, light two keypad digits.

use chrono::Timelike;

use super::{blank_top_rows, twelve_hour, BuildContext, DisplayModule};
use crate::color::Rgb;
use crate::error::Result;
use crate::keymap::{function_key, KeyMap, DIGIT_KEYS, KEYPAD_KEYS};
use crate::palette::Palette;

pub struct NumericClock {
    name: &'static str,
    update_rate: f64,
    with_seconds: bool,
    palette: Palette,
}

impl NumericClock {
    pub fn new(name: &'static str, update_rate: f64, with_seconds: bool, palette: Palette) -> Self {
        Self {
            name,
            update_rate,
            with_seconds,
            palette,
        }
    }

    /// Light the two digits of a zero-padded value on `row`.
    fn light_pair(&self, keys: &mut KeyMap, row: &[&str; 10], value: u32) {
        let (tens, ones) = ((value / 10 % 10) as usize, (value % 10) as usize);
        if tens == ones {
            keys.insert(row[tens], self.palette.foreground_combined);
        } else {
            keys.insert(row[tens], self.palette.foreground);
            keys.insert(row[ones], self.palette.foreground_alt);
        }
    }

    fn hour_color(&self, hour: u32) -> Rgb {
        if hour <= 12 {
            self.palette.foreground
        } else {
            self.palette.foreground_alt
        }
    }
}

impl DisplayModule for NumericClock {
    fn name(&self) -> &str {
        self.name
    }

    fn update_rate(&self) -> f64 {
        self.update_rate
    }

    fn description(&self) -> &str {
        if self.with_seconds {
            "Hour on F-keys, minutes on number row, seconds on keypad"
        } else {
            "Hour on F-keys, minutes on number row"
        }
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<Option<KeyMap>> {
        let now = ctx.now;
        let mut keys = KeyMap::new();

        blank_top_rows(&mut keys, &self.palette);
        keys.insert(function_key(twelve_hour(now.hour())), self.hour_color(now.hour()));
        self.light_pair(&mut keys, &DIGIT_KEYS, now.minute());

        if self.with_seconds {
            for key in KEYPAD_KEYS {
                keys.insert(key, self.palette.background);
            }
            self.light_pair(&mut keys, &KEYPAD_KEYS, now.second());
        }

        Ok(Some(keys))
    }
}
