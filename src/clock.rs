//! Wall-clock access for the tick loop.

use std::cell::Cell;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime};

/// One reading of the wall clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Now {
    /// Seconds since the Unix epoch, with sub-second precision.
    pub epoch_secs: f64,
    /// Local date and time, used for what the clock faces show.
    pub local: NaiveDateTime,
}

impl Now {
    pub fn from_local(dt: DateTime<Local>) -> Self {
        Self {
            epoch_secs: dt.timestamp_micros() as f64 / 1_000_000.0,
            local: dt.naive_local(),
        }
    }
}

pub trait Clock {
    fn now(&self) -> Now;
    fn sleep(&self, duration: Duration);
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Now {
        Now::from_local(Local::now())
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when slept on or advanced by hand.
///
/// Local time is reported as UTC so results do not depend on the host
/// timezone.
#[derive(Debug)]
pub struct ManualClock {
    epoch_secs: Cell<f64>,
    slept: Cell<Duration>,
}

impl ManualClock {
    pub fn new(epoch_secs: f64) -> Self {
        Self {
            epoch_secs: Cell::new(epoch_secs),
            slept: Cell::new(Duration::ZERO),
        }
    }

    /// Move time forward without counting it as sleep.
    pub fn advance(&self, secs: f64) {
        self.epoch_secs.set(self.epoch_secs.get() + secs);
    }

    /// Total time spent in [`Clock::sleep`].
    pub fn slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Now {
        let epoch_secs = self.epoch_secs.get();
        let micros = (epoch_secs * 1_000_000.0).round() as i64;
        let local = DateTime::from_timestamp_micros(micros)
            .map(|dt| dt.naive_utc())
            .unwrap_or_default();
        Now { epoch_secs, local }
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration.as_secs_f64());
        self.slept.set(self.slept.get() + duration);
    }
}
