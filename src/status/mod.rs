//! Status reporting.
//!
//! # Responsibilities
//! - Capture the process start instant once
//! - Build a fresh snapshot of uptime, allocator and runtime counters per read
//!
//! # Design Decisions
//! - Nothing is cached; two reads never share state
//! - `numGC` is always 0 because memory is reclaimed deterministically
//! - `sysMB` is the resident set size where `/proc` is available, else 0

use std::fs;
use std::time::{Duration, Instant};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::observability::alloc;

const MIB: u64 = 1024 * 1024;

/// Moment the server started, in both clocks.
#[derive(Debug, Clone, Copy)]
pub struct StartTime {
    instant: Instant,
    wall: DateTime<Utc>,
}

impl StartTime {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Utc::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.instant.elapsed()
    }

    /// RFC 3339 / ISO-8601 start timestamp.
    pub fn rfc3339(&self) -> String {
        self.wall.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Snapshot returned by `/status/`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub server: ServerStatus,
    pub memory: MemoryStatus,
    pub runtime: RuntimeStatus,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub status: &'static str,
    pub uptime: String,
    pub uptime_seconds: u64,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct MemoryStatus {
    #[serde(rename = "allocatedMB")]
    pub allocated_mb: u64,
    #[serde(rename = "totalAllocMB")]
    pub total_alloc_mb: u64,
    #[serde(rename = "sysMB")]
    pub sys_mb: u64,
    #[serde(rename = "numGC")]
    pub num_gc: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStatus {
    pub num_tasks: usize,
    pub rust_version: &'static str,
    #[serde(rename = "numCPU")]
    pub num_cpu: usize,
}

impl StatusReport {
    /// Collect a snapshot for the given start time and registered endpoints.
    pub fn collect(started: &StartTime, endpoints: &[&'static str]) -> Self {
        let uptime = started.uptime();

        Self {
            server: ServerStatus {
                status: "running",
                uptime: format_uptime(uptime),
                uptime_seconds: uptime.as_secs(),
                start_time: started.rfc3339(),
            },
            memory: MemoryStatus {
                allocated_mb: alloc::live_bytes() as u64 / MIB,
                total_alloc_mb: alloc::total_allocated_bytes() / MIB,
                sys_mb: resident_set_bytes().unwrap_or(0) / MIB,
                num_gc: 0,
            },
            runtime: RuntimeStatus {
                num_tasks: alive_tasks(),
                rust_version: env!("CARGO_PKG_RUST_VERSION"),
                num_cpu: std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1),
            },
            endpoints: endpoints.to_vec(),
        }
    }
}

fn alive_tasks() -> usize {
    tokio::runtime::Handle::try_current()
        .map(|handle| handle.metrics().num_alive_tasks())
        .unwrap_or(0)
}

/// Human-readable duration such as `2h 5m 7s`.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (days, hours, minutes, seconds) =
        (total / 86_400, total / 3_600 % 24, total / 60 % 60, total % 60);

    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, _) => format!("{minutes}m {seconds}s"),
        (0, _, _) => format!("{hours}h {minutes}m {seconds}s"),
        _ => format!("{days}d {hours}h {minutes}m {seconds}s"),
    }
}

/// Resident set size of this process, from `/proc/self/status`.
pub fn resident_set_bytes() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kib = line.split_whitespace().nth(1)?.parse::<u64>().ok()?;
    Some(kib * 1024)
}
