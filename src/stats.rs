//! System load snapshots for the `sys_info` gauge.
//!
//! The primary stats command prints a JSON array of result objects:
//!
//! ```json
//! [
//!   { "cpu": { "usage": [12.5, 40.0, 3.1, 7.0] } },
//!   { "memory": { "total": 16384, "used": 6100 } },
//!   { "gpu": { "core_usage": 37.0 } }
//! ]
//! ```
//!
//! When no result carries GPU usage, the fallback command (`nvtop -s`
//! shaped) is run instead:
//!
//! ```json
//! [ { "device_name": "GPU 0", "gpu_util": "37%" } ]
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::command::CommandLine;
use crate::error::{Error, Result};

/// Usage percentages, nominally 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemStats {
    pub cpu: f64,
    pub memory: f64,
    pub gpu: f64,
}

/// Produces a fresh snapshot on every call.
pub trait StatsSource {
    fn poll(&mut self) -> Result<SystemStats>;
}

/// Stats source backed by external commands.
pub struct CommandStats {
    primary: CommandLine,
    gpu_fallback: CommandLine,
}

impl CommandStats {
    pub fn new(primary: CommandLine, gpu_fallback: CommandLine) -> Self {
        Self {
            primary,
            gpu_fallback,
        }
    }
}

impl StatsSource for CommandStats {
    fn poll(&mut self) -> Result<SystemStats> {
        let command = self.primary.to_string();
        let report = parse_report(&self.primary.output(&[])?, &command)?;

        let gpu = match report.gpu {
            Some(gpu) => gpu,
            None => {
                debug!("No GPU usage from `{command}`, trying `{}`", self.gpu_fallback);
                parse_gpu_fallback(
                    &self.gpu_fallback.output(&[])?,
                    &self.gpu_fallback.to_string(),
                )?
            }
        };

        Ok(SystemStats {
            cpu: report.cpu,
            memory: report.memory,
            gpu,
        })
    }
}

/// A stats source that always reports the same values.
#[derive(Debug, Clone, Copy)]
pub struct FixedStats(pub SystemStats);

impl StatsSource for FixedStats {
    fn poll(&mut self) -> Result<SystemStats> {
        Ok(self.0)
    }
}

// ── Primary report ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ResultObject {
    cpu: Option<CpuSection>,
    memory: Option<MemorySection>,
    gpu: Option<GpuSection>,
}

#[derive(Debug, Deserialize)]
struct CpuSection {
    #[serde(default)]
    usage: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct MemorySection {
    total: f64,
    used: f64,
}

#[derive(Debug, Deserialize)]
struct GpuSection {
    core_usage: Option<f64>,
}

/// CPU and memory from the primary command; GPU if it was present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryReport {
    pub cpu: f64,
    pub memory: f64,
    pub gpu: Option<f64>,
}

/// Aggregate the primary command's result array.
///
/// CPU is the mean of every usage value across all results; memory and GPU
/// come from the first result that carries them.
pub fn parse_report(json: &str, command: &str) -> Result<PrimaryReport> {
    let results: Vec<ResultObject> =
        serde_json::from_str(json).map_err(|source| Error::MalformedStats {
            command: command.to_string(),
            source,
        })?;
    let missing = |field| Error::MissingStat {
        command: command.to_string(),
        field,
    };

    let cpu_values: Vec<f64> = results
        .iter()
        .filter_map(|r| r.cpu.as_ref())
        .flat_map(|c| c.usage.iter().copied())
        .collect();
    if cpu_values.is_empty() {
        return Err(missing("cpu usage"));
    }
    let cpu = cpu_values.iter().sum::<f64>() / cpu_values.len() as f64;

    let memory = results
        .iter()
        .find_map(|r| r.memory.as_ref())
        .filter(|m| m.total > 0.0)
        .map(|m| m.used / m.total * 100.0)
        .ok_or_else(|| missing("memory total/used"))?;

    let gpu = results
        .iter()
        .filter_map(|r| r.gpu.as_ref())
        .find_map(|g| g.core_usage);

    Ok(PrimaryReport { cpu, memory, gpu })
}

// ── GPU fallback ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GpuDevice {
    gpu_util: Option<String>,
}

/// Mean `gpu_util` over all devices reporting one.
pub fn parse_gpu_fallback(json: &str, command: &str) -> Result<f64> {
    let devices: Vec<GpuDevice> =
        serde_json::from_str(json).map_err(|source| Error::MalformedStats {
            command: command.to_string(),
            source,
        })?;

    let values: Vec<f64> = devices
        .iter()
        .filter_map(|d| d.gpu_util.as_deref())
        .filter_map(|s| s.trim().trim_end_matches('%').trim().parse::<f64>().ok())
        .collect();

    if values.is_empty() {
        return Err(Error::MissingStat {
            command: command.to_string(),
            field: "gpu_util",
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
