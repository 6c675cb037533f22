//! Snapshot types produced by the collectors.
//!
//! Every snapshot is an owned value. Percentages are already normalized to
//! `[0, 100]` and quantities are ready for human-readable formatting.

use serde::Serialize;

/// One reading of the aggregate CPU tick counters since boot.
///
/// All fields are cumulative scheduler ticks taken from a single read of the
/// counter source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuSample {
    /// Sum of all tick counters.
    pub fn total(&self) -> u128 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .map(|&v| v as u128)
        .sum()
    }

    /// Ticks spent doing nothing, including waiting for I/O.
    pub fn idle_total(&self) -> u128 {
        self.idle as u128 + self.iowait as u128
    }
}

/// CPU utilization derived from two chronologically ordered samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CpuUsage {
    pub usage_percent: f64,
    pub user_percent: f64,
    pub system_percent: f64,
    /// Idle share, excluding iowait.
    pub idle_percent: f64,
}

/// Point-in-time memory reading. Quantities are in kibibytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MemorySample {
    pub total: u64,
    pub available: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
    pub used: u64,
    pub usage_percent: f64,
}

/// Point-in-time filesystem reading for one path. Quantities are in bytes.
///
/// `used` counts every non-free block, so blocks reserved for the superuser
/// are neither `used` nor `available`. As a result `used + available` equals
/// `total` only when the filesystem has no reserved blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiskSample {
    pub mount_point: String,
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub usage_percent: f64,
}
