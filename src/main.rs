//! keyglow CLI
//!
//! Drives clock faces and load gauges on a keyboard through an external
//! LED-control command.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use keyglow::modules::Clear;
use keyglow::{CommandSink, CommandStats, ModuleRegistry, Palette, Runner, SystemClock};

// CLI definitions
mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let palette = match &cli.palette {
        Some(path) => Palette::load(path)
            .with_context(|| format!("loading palette {}", path.display()))?,
        None => Palette::default(),
    };
    let registry = ModuleRegistry::with_builtins(palette);

    if cli.list {
        let modules = registry.all();
        println!("{} modules:", modules.len());
        for module in modules {
            println!(
                "  {:<14} {:>4}s  {}",
                module.name(),
                module.update_rate(),
                module.description()
            );
        }
        return Ok(());
    }

    let selected = registry.select(&cli.modules);
    let clear = if cli.no_clear {
        None
    } else {
        registry.get(Clear::NAME)
    };
    let runner = Runner::new(&selected, clear, &palette);

    let mut sink = CommandSink::new(cli.sink_cmd);
    let mut stats = CommandStats::new(cli.stats_cmd, cli.gpu_stats_cmd);

    info!(
        "Starting with {} modules ({} requested)",
        selected.len(),
        cli.modules.len()
    );
    let running = keyglow::runner::setup_interrupt_handler();
    runner
        .run(&SystemClock, &mut sink, &mut stats, &running)
        .context("display loop failed")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "keyglow=debug" } else { "keyglow=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
