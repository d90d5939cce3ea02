//! Decides which modules refresh on a tick and merges their output.

use std::sync::Arc;

use tracing::debug;

use crate::clock::Now;
use crate::error::Result;
use crate::keymap::KeyMap;
use crate::modules::{BuildContext, DisplayModule};
use crate::stats::StatsSource;

/// Base tick width: the fastest periodic rate, capped at one second.
///
/// Returns `1.0` when no module has a positive rate.
pub fn tick_width(modules: &[Arc<dyn DisplayModule>]) -> f64 {
    modules
        .iter()
        .map(|m| m.update_rate())
        .filter(|&rate| rate > 0.0)
        .fold(1.0, f64::min)
}

/// Split into `(one_shot, periodic)` after a stable sort by rate.
///
/// Modules with equal rates keep their selection order.
pub fn partition(
    modules: &[Arc<dyn DisplayModule>],
) -> (Vec<Arc<dyn DisplayModule>>, Vec<Arc<dyn DisplayModule>>) {
    let mut sorted = modules.to_vec();
    sorted.sort_by(|a, b| a.update_rate().total_cmp(&b.update_rate()));
    sorted.into_iter().partition(|m| m.update_rate() <= 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduler {
    tick_width: f64,
}

impl Scheduler {
    pub fn new(tick_width: f64) -> Self {
        Self { tick_width }
    }

    pub fn tick_width(&self) -> f64 {
        self.tick_width
    }

    /// Whether a module with `update_rate` refreshes at `epoch_secs`.
    ///
    /// One-shot rates are always due; periodic ones only within one tick
    /// width of the start of their period.
    pub fn is_due(&self, update_rate: f64, epoch_secs: f64, force_update: bool) -> bool {
        force_update || update_rate <= 0.0 || epoch_secs.rem_euclid(update_rate) < self.tick_width
    }

    /// Run the due modules in order and merge their keys, later wins.
    pub fn compile(
        &self,
        modules: &[Arc<dyn DisplayModule>],
        now: &Now,
        stats: &mut dyn StatsSource,
        force_update: bool,
    ) -> Result<KeyMap> {
        let mut keys = KeyMap::new();
        let mut ctx = BuildContext {
            now: now.local,
            stats,
        };

        for module in modules {
            if !self.is_due(module.update_rate(), now.epoch_secs, force_update) {
                continue;
            }
            match module.build(&mut ctx)? {
                Some(out) => {
                    debug!("{}: {} keys", module.name(), out.len());
                    keys.merge(out);
                }
                None => debug!("{}: nothing", module.name()),
            }
        }

        Ok(keys)
    }
}
