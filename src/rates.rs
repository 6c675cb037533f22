//! Derivation of utilization percentages from raw readings.
//!
//! This module is the single place where counters become percentages. Every
//! value it returns is clamped to `[0, 100]` and no function divides by zero.

use crate::collector::procfs::parser::MemInfo;
use crate::collector::traits::FsStats;
use crate::model::{CpuSample, CpuUsage, DiskSample, MemorySample};

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute a counter delta, returning `None` on counter regression (reset).
pub fn delta(curr: u128, prev: u128) -> Option<u128> {
    curr.checked_sub(prev)
}

/// Clamps a percentage into `[0, 100]`. NaN becomes 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// `100 * part / whole`, clamped, or `0.0` when `whole` is zero.
pub fn percent_of(part: u128, whole: u128) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    clamp_percent(part as f64 * 100.0 / whole as f64)
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

/// Computes CPU utilization between two chronologically ordered samples.
///
/// Returns an all-zero usage when no ticks elapsed or when the counters went
/// backwards between the samples (e.g. the host rebooted).
pub fn cpu_usage(prev: &CpuSample, curr: &CpuSample) -> CpuUsage {
    let Some(total_diff) = delta(curr.total(), prev.total()) else {
        return CpuUsage::default();
    };
    let Some(idle_diff) = delta(curr.idle_total(), prev.idle_total()) else {
        return CpuUsage::default();
    };
    if total_diff == 0 {
        return CpuUsage::default();
    }

    let busy_diff = total_diff.saturating_sub(idle_diff);
    let component = |c: u64, p: u64| {
        let d = delta(c as u128, p as u128).unwrap_or(0);
        percent_of(d, total_diff)
    };

    CpuUsage {
        usage_percent: percent_of(busy_diff, total_diff),
        user_percent: component(curr.user, prev.user),
        system_percent: component(curr.system, prev.system),
        idle_percent: component(curr.idle, prev.idle),
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// Builds a memory snapshot from parsed `/proc/meminfo`.
///
/// Uses `MemAvailable` when the kernel reports it and falls back to
/// `free + buffers + cached` otherwise.
pub fn memory_usage(info: &MemInfo) -> MemorySample {
    let (used, available) = match info.mem_available {
        Some(available) => (info.mem_total.saturating_sub(available), available),
        None => {
            let reclaimable = info
                .mem_free
                .saturating_add(info.buffers)
                .saturating_add(info.cached);
            (info.mem_total.saturating_sub(reclaimable), reclaimable)
        }
    };

    MemorySample {
        total: info.mem_total,
        available,
        free: info.mem_free,
        buffers: info.buffers,
        cached: info.cached,
        used,
        usage_percent: percent_of(used as u128, info.mem_total as u128),
    }
}

// ---------------------------------------------------------------------------
// Disk
// ---------------------------------------------------------------------------

/// Builds a disk snapshot from raw filesystem statistics.
///
/// `used` is computed from all free blocks while `available` only counts
/// blocks usable by unprivileged users; see [`DiskSample`].
pub fn disk_usage(mount_point: impl Into<String>, stats: &FsStats) -> DiskSample {
    let total = stats.blocks.saturating_mul(stats.fragment_size);
    let free = stats.blocks_free.saturating_mul(stats.fragment_size);
    let available = stats.blocks_available.saturating_mul(stats.fragment_size);
    let used = total.saturating_sub(free);

    DiskSample {
        mount_point: mount_point.into(),
        total,
        used,
        available,
        usage_percent: percent_of(used as u128, total as u128),
    }
}
