//! The display loop: startup frame, alignment, periodic ticks, final clear.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::color::Rgb;
use crate::error::Result;
use crate::keymap::KeyMap;
use crate::modules::DisplayModule;
use crate::palette::Palette;
use crate::scheduler::{partition, tick_width, Scheduler};
use crate::sink::LedSink;
use crate::stats::StatsSource;

/// Start ticking only within this many seconds past a whole second.
pub const SYNC_TOLERANCE: f64 = 0.1;

/// Display loop configuration
pub struct Runner {
    one_shot: Vec<Arc<dyn DisplayModule>>,
    periodic: Vec<Arc<dyn DisplayModule>>,
    scheduler: Scheduler,
    background: Rgb,
}

impl Runner {
    /// Build a runner for the selected modules.
    ///
    /// `clear`, when given, runs first at startup ahead of any other
    /// one-shot module.
    pub fn new(
        selected: &[Arc<dyn DisplayModule>],
        clear: Option<Arc<dyn DisplayModule>>,
        palette: &Palette,
    ) -> Self {
        let (mut one_shot, periodic) = partition(selected);
        if let Some(clear) = clear {
            one_shot.insert(0, clear);
        }
        let scheduler = Scheduler::new(tick_width(&periodic));
        Self {
            one_shot,
            periodic,
            scheduler,
            background: palette.background,
        }
    }

    pub fn tick_width(&self) -> f64 {
        self.scheduler.tick_width()
    }

    pub fn has_periodic(&self) -> bool {
        !self.periodic.is_empty()
    }

    /// Run until `running` is cleared.
    ///
    /// Returns after the startup frame when nothing is periodic. Sink and
    /// stats errors end the loop immediately and are returned as is, unless
    /// `running` was already cleared, in which case the keys are cleared
    /// and the run ends normally.
    pub fn run(
        &self,
        clock: &dyn Clock,
        sink: &mut dyn LedSink,
        stats: &mut dyn StatsSource,
        running: &AtomicBool,
    ) -> Result<()> {
        self.startup(clock, sink, stats)?;
        if !self.has_periodic() {
            info!("No periodic modules, done");
            return Ok(());
        }

        sync_to_second(clock);
        info!(
            "Ticking {} modules every {:.3}s",
            self.periodic.len(),
            self.tick_width()
        );

        while running.load(Ordering::SeqCst) {
            if let Err(e) = self.tick(clock, sink, stats) {
                // Ctrl-C also reaches child commands, so a tick that fails
                // after the flag is cleared is the interrupt, not a fault
                if running.load(Ordering::SeqCst) {
                    return Err(e);
                }
                info!("Tick interrupted: {e}");
                break;
            }
        }

        self.shutdown(sink);
        Ok(())
    }

    /// Force every module once and push the combined frame.
    pub fn startup(
        &self,
        clock: &dyn Clock,
        sink: &mut dyn LedSink,
        stats: &mut dyn StatsSource,
    ) -> Result<()> {
        let mut all = self.one_shot.clone();
        all.extend(self.periodic.iter().cloned());
        let keys = self.scheduler.compile(&all, &clock.now(), stats, true)?;
        sink.push(&keys)
    }

    /// One periodic tick, including the trailing sleep.
    pub fn tick(
        &self,
        clock: &dyn Clock,
        sink: &mut dyn LedSink,
        stats: &mut dyn StatsSource,
    ) -> Result<()> {
        let start = clock.now();
        // Sub-second offset of this tick, removed from the sleep below
        let drift = start.epoch_secs.fract();

        let keys = self.scheduler.compile(&self.periodic, &start, stats, false)?;
        sink.push(&keys)?;

        let elapsed = clock.now().epoch_secs - start.epoch_secs;
        let pause = sleep_duration(self.tick_width(), elapsed, drift);
        debug!("tick: {} keys, elapsed {elapsed:.3}s, sleeping {pause:?}", keys.len());
        clock.sleep(pause);
        Ok(())
    }

    /// Best-effort reset of every key to background.
    pub fn shutdown(&self, sink: &mut dyn LedSink) {
        info!("Clearing keys");
        if let Err(e) = sink.push(&KeyMap::all(self.background)) {
            warn!("Final clear failed: {e}");
        }
    }
}

/// `tick_width - elapsed - drift`, never negative.
pub fn sleep_duration(tick_width: f64, elapsed: f64, drift: f64) -> Duration {
    let secs = tick_width - elapsed - drift;
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}

/// Sleep until the next whole second unless already within
/// [`SYNC_TOLERANCE`] past one.
pub fn sync_to_second(clock: &dyn Clock) {
    let frac = clock.now().epoch_secs.fract();
    if frac > SYNC_TOLERANCE {
        clock.sleep(Duration::from_secs_f64(1.0 - frac));
    }
}

/// Set up a Ctrl-C handler that clears the returned flag when triggered.
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    if let Err(e) = ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    }) {
        warn!("Could not install Ctrl-C handler: {e}");
    }

    running
}
