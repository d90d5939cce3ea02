// keyglow - clock and load displays for per-key RGB keyboards
// Display modules, scheduling, and the LED/stats command plumbing

pub mod clock;
pub mod color;
pub mod command;
pub mod error;
pub mod keymap;
pub mod modules;
pub mod palette;
pub mod runner;
pub mod scheduler;
pub mod sink;
pub mod stats;

pub use clock::{Clock, ManualClock, Now, SystemClock};
pub use color::{gradient, gradient_hex, rgb_to_hex, Rgb};
pub use command::CommandLine;
pub use error::{Error, Result};
pub use keymap::{KeyMap, ALL_KEYS};
pub use modules::{BuildContext, DisplayModule, ModuleRegistry};
pub use palette::Palette;
pub use runner::Runner;
pub use scheduler::Scheduler;
pub use sink::{CommandSink, LedSink, RecordingSink};
pub use stats::{CommandStats, FixedStats, StatsSource, SystemStats};
