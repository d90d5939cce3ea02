// CLI definitions using clap

use clap::Parser;
use std::path::PathBuf;

use keyglow::CommandLine;

#[derive(Parser)]
#[command(name = "keyglow")]
#[command(author, version, about = "Clock and load displays for per-key RGB keyboards")]
pub struct Cli {
    /// Display modules to run (see --list); unknown names are ignored
    #[arg(value_name = "MODULE")]
    pub modules: Vec<String>,

    /// LED command; frames are appended as key=rrggbb arguments
    #[arg(long, value_name = "CMD", default_value = "keyledsctl set-leds")]
    pub sink_cmd: CommandLine,

    /// Command printing the system stats JSON
    #[arg(long, value_name = "CMD", default_value = "sys-stats --json")]
    pub stats_cmd: CommandLine,

    /// Command printing GPU usage when the stats command has none
    #[arg(long, value_name = "CMD", default_value = "nvtop -s")]
    pub gpu_stats_cmd: CommandLine,

    /// TOML file overriding palette colors
    #[arg(long, value_name = "FILE")]
    pub palette: Option<PathBuf>,

    /// Do not clear the keyboard at startup
    #[arg(long)]
    pub no_clear: bool,

    /// List available modules and exit
    #[arg(long)]
    pub list: bool,

    /// Log every tick
    #[arg(short, long)]
    pub verbose: bool,
}
