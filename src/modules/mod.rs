//! Display modules and the catalog they are selected from.
//!
//! A module pairs an update rate with a build function that turns the
//! current time (and, for gauges, a fresh stats snapshot) into a key
//! mapping. Modules keep no state between calls.

mod binary;
mod gauge;
mod numeric;

pub use binary::{BinaryClock, BinaryLayout};
pub use gauge::SystemGauge;
pub use numeric::NumericClock;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::Result;
use crate::keymap::KeyMap;
use crate::palette::Palette;
use crate::stats::StatsSource;

/// Inputs available to a module for one build.
pub struct BuildContext<'a> {
    /// Local wall-clock time of the current tick.
    pub now: NaiveDateTime,
    pub stats: &'a mut dyn StatsSource,
}

/// A named, rate-tagged producer of key mappings.
pub trait DisplayModule {
    /// Catalog name, as typed on the command line.
    fn name(&self) -> &str;

    /// Refresh period in seconds; `<= 0` runs once at startup only.
    fn update_rate(&self) -> f64;

    /// One-line description for `--list`.
    fn description(&self) -> &str {
        ""
    }

    /// Build this module's keys; `None` contributes nothing.
    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<Option<KeyMap>>;
}

/// Sets every key to the background color.
pub struct Clear {
    palette: Palette,
}

impl Clear {
    pub const NAME: &'static str = "clear";

    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl DisplayModule for Clear {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update_rate(&self) -> f64 {
        0.0
    }

    fn description(&self) -> &str {
        "Set all keys to the background color"
    }

    fn build(&self, _ctx: &mut BuildContext<'_>) -> Result<Option<KeyMap>> {
        Ok(Some(KeyMap::all(self.palette.background)))
    }
}

/// Lookup table of the built-in modules.
pub struct ModuleRegistry {
    by_name: HashMap<String, Arc<dyn DisplayModule>>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in module
    pub fn with_builtins(palette: Palette) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Clear::new(palette)));
        registry.register(Arc::new(NumericClock::new("num_time", 60.0, false, palette)));
        registry.register(Arc::new(NumericClock::new("num_time_s", 1.0, true, palette)));
        registry.register(Arc::new(BinaryClock::new(
            "binary_time",
            60.0,
            BinaryLayout::HourMinute,
            palette,
        )));
        registry.register(Arc::new(BinaryClock::new(
            "binary_time_s",
            1.0,
            BinaryLayout::MinuteSecond,
            palette,
        )));
        registry.register(Arc::new(BinaryClock::new(
            "binary_time_m",
            60.0,
            BinaryLayout::Merged,
            palette,
        )));
        registry.register(Arc::new(SystemGauge::new("sys_info", 2.0, palette)));
        registry
    }

    /// Register a module under its own name, replacing any previous one
    pub fn register(&mut self, module: Arc<dyn DisplayModule>) {
        self.by_name.insert(module.name().to_string(), module);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DisplayModule>> {
        self.by_name.get(name).cloned()
    }

    /// Resolve names in order, dropping the ones that are not registered.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Vec<Arc<dyn DisplayModule>> {
        names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let module = self.get(name);
                if module.is_none() {
                    warn!("Unknown module '{name}', ignoring");
                }
                module
            })
            .collect()
    }

    /// All modules, sorted by name.
    pub fn all(&self) -> Vec<Arc<dyn DisplayModule>> {
        let mut modules: Vec<_> = self.by_name.values().cloned().collect();
        modules.sort_by(|a, b| a.name().cmp(b.name()));
        modules
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Background for F1..F12 and the digit keys 0..9.
pub(crate) fn blank_top_rows(keys: &mut KeyMap, palette: &Palette) {
    for i in 0..12 {
        keys.insert(crate::keymap::FUNCTION_KEYS[i], palette.background);
        keys.insert(crate::keymap::DIGIT_KEYS[i % 10], palette.background);
    }
}

/// 12-hour clock hour, with 0 shown as 12.
pub(crate) fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let registry = ModuleRegistry::with_builtins(Palette::default());
        let names: Vec<_> = registry.all().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "binary_time",
                "binary_time_m",
                "binary_time_s",
                "clear",
                "num_time",
                "num_time_s",
                "sys_info",
            ]
        );
        let rate = |n: &str| registry.get(n).unwrap().update_rate();
        assert_eq!(rate("clear"), 0.0);
        assert_eq!(rate("num_time"), 60.0);
        assert_eq!(rate("num_time_s"), 1.0);
        assert_eq!(rate("binary_time"), 60.0);
        assert_eq!(rate("binary_time_s"), 1.0);
        assert_eq!(rate("binary_time_m"), 60.0);
        assert_eq!(rate("sys_info"), 2.0);
    }

    #[test]
    fn test_select_drops_unknown_and_keeps_order() {
        let registry = ModuleRegistry::with_builtins(Palette::default());
        let selected = registry.select(&["sys_info", "bogus", "num_time"]);
        let names: Vec<_> = selected.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["sys_info", "num_time"]);
    }

    #[test]
    fn test_clear_sets_all() {
        let palette = Palette::default();
        let keys = test_support::build_at(&Clear::new(palette), test_support::at(0, 0, 0));
        assert_eq!(keys, KeyMap::all(palette.background));
    }

    #[test]
    fn test_twelve_hour() {
        assert_eq!(twelve_hour(0), 12);
        assert_eq!(twelve_hour(9), 9);
        assert_eq!(twelve_hour(12), 12);
        assert_eq!(twelve_hour(14), 2);
    }
}
