//! Integration tests for the display loop.
//!
//! These drive `Runner` end to end with a manual clock, a sink that stops
//! the loop after a few frames, and canned stats: startup frame, tick
//! cadence, scheduling of slow modules, and the final clear.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use keyglow::modules::Clear;
use keyglow::{
    Clock, DisplayModule, Error, FixedStats, KeyMap, LedSink, ManualClock, ModuleRegistry,
    Palette, Result, Rgb, Runner, StatsSource, SystemStats,
};

/// Records frames and clears `running` once `limit` frames have arrived.
struct StopAfter<'a> {
    frames: Vec<KeyMap>,
    limit: usize,
    running: &'a AtomicBool,
}

impl LedSink for StopAfter<'_> {
    fn push(&mut self, keys: &KeyMap) -> Result<()> {
        self.frames.push(keys.clone());
        if self.frames.len() >= self.limit {
            self.running.store(false, Ordering::SeqCst);
        }
        Ok(())
    }
}

fn idle_stats() -> FixedStats {
    FixedStats(SystemStats {
        cpu: 0.0,
        memory: 0.0,
        gpu: 0.0,
    })
}

fn setup(names: &[&str]) -> (Runner, Palette) {
    let palette = Palette::default();
    let registry = ModuleRegistry::with_builtins(palette);
    let selected = registry.select(names);
    let runner = Runner::new(&selected, registry.get(Clear::NAME), &palette);
    (runner, palette)
}

// ── Startup ──

#[test]
fn startup_frame_clears_first_then_draws() {
    let (runner, palette) = setup(&["num_time"]);
    let running = AtomicBool::new(true);
    let mut sink = StopAfter {
        frames: Vec::new(),
        limit: 1,
        running: &running,
    };
    // 1970-01-01 14:05:30 UTC
    let clock = ManualClock::new((14 * 3600 + 5 * 60 + 30) as f64);

    runner
        .run(&clock, &mut sink, &mut idle_stats(), &running)
        .unwrap();

    let startup = &sink.frames[0];
    let args = startup.to_args();
    assert_eq!(args[0], format!("all={}", palette.background));
    assert_eq!(startup.get("F2"), Some(palette.foreground_alt));
    assert_eq!(startup.get("0"), Some(palette.foreground));
    assert_eq!(startup.get("5"), Some(palette.foreground_alt));

    // Loop stopped right away, so the last frame is the final clear
    assert_eq!(sink.frames.last(), Some(&KeyMap::all(palette.background)));
}

#[test]
fn one_shot_only_returns_after_startup() {
    let (runner, palette) = setup(&["clear", "not_a_module"]);
    assert!(!runner.has_periodic());

    let running = AtomicBool::new(true);
    let mut sink = StopAfter {
        frames: Vec::new(),
        limit: usize::MAX,
        running: &running,
    };
    let clock = ManualClock::new(10.5);
    runner
        .run(&clock, &mut sink, &mut idle_stats(), &running)
        .unwrap();

    assert_eq!(sink.frames, vec![KeyMap::all(palette.background)]);
    assert_eq!(clock.slept(), Duration::ZERO);
}

#[test]
fn no_clear_leaves_startup_frame_untouched() {
    let palette = Palette::default();
    let registry = ModuleRegistry::with_builtins(palette);
    let runner = Runner::new(&registry.select(&["binary_time_m"]), None, &palette);

    let running = AtomicBool::new(false);
    let mut sink = StopAfter {
        frames: Vec::new(),
        limit: usize::MAX,
        running: &running,
    };
    runner
        .startup(&ManualClock::new(0.0), &mut sink, &mut idle_stats())
        .unwrap();
    assert_eq!(sink.frames[0].get("all"), None);
    assert_eq!(sink.frames[0].len(), 12);
}

// ── Ticking ──

#[test]
fn ticks_hold_one_second_cadence() {
    let (runner, _) = setup(&["num_time_s"]);
    assert_eq!(runner.tick_width(), 1.0);

    let running = AtomicBool::new(true);
    // startup + 5 ticks
    let mut sink = StopAfter {
        frames: Vec::new(),
        limit: 6,
        running: &running,
    };
    let clock = ManualClock::new(1000.5);
    runner
        .run(&clock, &mut sink, &mut idle_stats(), &running)
        .unwrap();

    // 6 frames + final clear
    assert_eq!(sink.frames.len(), 7);
    // Synced to 1001.0, then five 1s ticks
    assert!((clock.now().epoch_secs - 1006.0).abs() < 1e-6);
}

#[test]
fn slow_module_only_refreshes_at_minute_start() {
    let (runner, palette) = setup(&["num_time", "num_time_s"]);

    let running = AtomicBool::new(true);
    let mut sink = StopAfter {
        frames: Vec::new(),
        limit: 4,
        running: &running,
    };
    // 00:00:58.5 UTC: ticks at :59, 1:00, 1:01
    let clock = ManualClock::new(58.5);
    runner
        .run(&clock, &mut sink, &mut idle_stats(), &running)
        .unwrap();

    let ticks = &sink.frames[1..4];
    // num_time_s alone draws F-row, number row and keypad
    assert_eq!(ticks[0].len(), 32);
    assert_eq!(ticks[0].get("KP5"), Some(palette.foreground));
    assert_eq!(ticks[0].get("KP9"), Some(palette.foreground_alt));
    // At 00:01:00 both run; num_time_s is faster, so it sorts first and
    // num_time has the last word on shared keys
    assert_eq!(ticks[1].get("KP0"), Some(palette.foreground_combined));
    assert_eq!(ticks[1].get("1"), Some(palette.foreground_alt));
    assert_eq!(ticks[2].get("KP1"), Some(palette.foreground_alt));
}

#[test]
fn gauge_polls_stats_each_tick() {
    struct Counting(usize);
    impl StatsSource for Counting {
        fn poll(&mut self) -> Result<SystemStats> {
            self.0 += 1;
            Ok(SystemStats {
                cpu: 100.0,
                memory: 50.0,
                gpu: 0.0,
            })
        }
    }

    let (runner, palette) = setup(&["sys_info"]);
    let running = AtomicBool::new(true);
    let mut sink = StopAfter {
        frames: Vec::new(),
        limit: 5,
        running: &running,
    };
    let mut stats = Counting(0);
    // Even second: due at 100, 102; not at 101, 103
    runner
        .run(&ManualClock::new(100.0), &mut sink, &mut stats, &running)
        .unwrap();

    // startup + 2 due ticks
    assert_eq!(stats.0, 3);
    assert_eq!(sink.frames[1].get("KP7"), Some(palette.gauge_high));
    assert!(sink.frames[2].is_empty());
}

// ── Failures ──

#[test]
fn sink_failure_stops_the_loop() {
    struct Broken;
    impl LedSink for Broken {
        fn push(&mut self, _keys: &KeyMap) -> Result<()> {
            Err(Error::InvalidColor("boom".into()))
        }
    }

    let (runner, _) = setup(&["binary_time_s"]);
    let running = AtomicBool::new(true);
    let result = runner.run(&ManualClock::new(0.0), &mut Broken, &mut idle_stats(), &running);
    assert!(result.is_err());
}

/// Fails its `fail_at`-th push, optionally clearing `running` first the way
/// Ctrl-C does when it also kills the LED command.
struct FailOnce<'a> {
    frames: Vec<KeyMap>,
    fail_at: usize,
    interrupt: bool,
    running: &'a AtomicBool,
}

impl LedSink for FailOnce<'_> {
    fn push(&mut self, keys: &KeyMap) -> Result<()> {
        self.frames.push(keys.clone());
        if self.frames.len() == self.fail_at {
            if self.interrupt {
                self.running.store(false, Ordering::SeqCst);
            }
            return Err(Error::InvalidColor("killed".into()));
        }
        Ok(())
    }
}

#[test]
fn interrupted_tick_still_clears_keys() {
    let (runner, palette) = setup(&["num_time_s"]);
    let running = AtomicBool::new(true);
    // startup, one good tick, then the interrupted one
    let mut sink = FailOnce {
        frames: Vec::new(),
        fail_at: 3,
        interrupt: true,
        running: &running,
    };
    let result = runner.run(&ManualClock::new(200.5), &mut sink, &mut idle_stats(), &running);

    assert!(result.is_ok());
    assert_eq!(sink.frames.len(), 4);
    assert_eq!(sink.frames.last(), Some(&KeyMap::all(palette.background)));
    assert_eq!(sink.frames[3].to_args(), vec!["all=f1f1f1".to_string()]);
}

#[test]
fn tick_failure_while_running_is_returned() {
    let (runner, _) = setup(&["num_time_s"]);
    let running = AtomicBool::new(true);
    let mut sink = FailOnce {
        frames: Vec::new(),
        fail_at: 3,
        interrupt: false,
        running: &running,
    };
    let result = runner.run(&ManualClock::new(200.5), &mut sink, &mut idle_stats(), &running);

    assert!(result.is_err());
    assert!(running.load(Ordering::SeqCst));
    // No final clear after a genuine failure
    assert_eq!(sink.frames.len(), 3);
}

#[test]
fn later_selection_wins_on_equal_rates() {
    struct Paint(&'static str, Rgb);
    impl DisplayModule for Paint {
        fn name(&self) -> &str {
            self.0
        }
        fn update_rate(&self) -> f64 {
            1.0
        }
        fn build(&self, _ctx: &mut keyglow::BuildContext<'_>) -> Result<Option<KeyMap>> {
            Ok(Some(KeyMap::all(self.1)))
        }
    }

    let palette = Palette::default();
    let red = Rgb::new(255, 0, 0);
    let blue = Rgb::new(0, 0, 255);
    let selected: Vec<Arc<dyn DisplayModule>> =
        vec![Arc::new(Paint("a", red)), Arc::new(Paint("b", blue))];
    let runner = Runner::new(&selected, None, &palette);

    let running = AtomicBool::new(true);
    let mut sink = StopAfter {
        frames: Vec::new(),
        limit: 2,
        running: &running,
    };
    runner
        .run(&ManualClock::new(5.0), &mut sink, &mut idle_stats(), &running)
        .unwrap();
    assert_eq!(sink.frames[0], KeyMap::all(blue));
    assert_eq!(sink.frames[1], KeyMap::all(blue));
}
