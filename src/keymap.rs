//! Key name → color mappings and the key-name tables used by the displays.
//!
//! Names follow `keyledsctl`: `F1`..`F12`, digit keys `0`..`9`, `MINUS`,
//! `EQUAL`, `GRAVE` and keypad digits `KP0`..`KP9`. The pseudo-key `all`
//! addresses every key at once.

use crate::color::Rgb;

/// Pseudo-key that sets every key on the keyboard.
pub const ALL_KEYS: &str = "all";

/// Digit keys of the number row, indexed by digit value.
pub const DIGIT_KEYS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Keypad digit keys, indexed by digit value.
pub const KEYPAD_KEYS: [&str; 10] = [
    "KP0", "KP1", "KP2", "KP3", "KP4", "KP5", "KP6", "KP7", "KP8", "KP9",
];

/// Function row, `F1` first.
pub const FUNCTION_KEYS: [&str; 12] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

/// Function key for a 1-based index (`1` → `F1`).
pub fn function_key(n: u32) -> &'static str {
    FUNCTION_KEYS[(n as usize).clamp(1, FUNCTION_KEYS.len()) - 1]
}

/// Ordered key → color mapping.
///
/// Inserting a key that is already present replaces its color but keeps
/// its original position, so an `all` entry written first is still sent
/// first and does not wipe the per-key entries that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    entries: Vec<(String, Rgb)>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with a single `all` entry.
    pub fn all(color: Rgb) -> Self {
        let mut map = Self::new();
        map.insert(ALL_KEYS, color);
        map
    }

    /// Set `key` to `color`, overwriting any previous color.
    pub fn insert(&mut self, key: impl Into<String>, color: Rgb) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((key, color)),
        }
    }

    /// Merge `other` into `self`; `other` wins on collisions.
    pub fn merge(&mut self, other: KeyMap) {
        for (key, color) in other.entries {
            self.insert(key, color);
        }
    }

    pub fn get(&self, key: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|&(_, color)| color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// `key=rrggbb` tokens in insertion order.
    pub fn to_args(&self) -> Vec<String> {
        self.iter().map(|(k, c)| format!("{k}={c}")).collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Rgb)> for KeyMap {
    fn from_iter<I: IntoIterator<Item = (K, Rgb)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, color) in iter {
            map.insert(key, color);
        }
        map
    }
}
