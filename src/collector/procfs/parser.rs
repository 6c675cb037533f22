//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc` files into
//! structured data. They are designed to be easily testable with string inputs.

use crate::model::CpuSample;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Number of leading tick fields every kernel reports (user, nice, system, idle).
const MANDATORY_CPU_FIELDS: usize = 4;

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Per-core rows (`cpu0`, `cpu1`, ...) and other keys are ignored. Fields are
/// read in order until the first non-numeric token; iowait, irq, softirq and
/// steal default to zero for kernels that only expose the legacy four fields.
pub fn parse_cpu_aggregate(content: &str) -> Result<CpuSample, ParseError> {
    let line = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ParseError::new("missing aggregate 'cpu' line in stat"))?;

    let values: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map_while(|s| s.parse().ok())
        .take(8)
        .collect();

    if values.len() < MANDATORY_CPU_FIELDS {
        return Err(ParseError::new(format!(
            "not enough fields in cpu line: expected {}+, got {}",
            MANDATORY_CPU_FIELDS,
            values.len()
        )));
    }

    let get_val = |idx: usize| -> u64 { values.get(idx).copied().unwrap_or(0) };

    Ok(CpuSample {
        user: get_val(0),
        nice: get_val(1),
        system: get_val(2),
        idle: get_val(3),
        iowait: get_val(4),
        irq: get_val(5),
        softirq: get_val(6),
        steal: get_val(7),
    })
}

/// Parsed data from `/proc/meminfo`, in kibibytes.
///
/// `mem_available` is `None` on kernels that predate the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: Option<u64>,
    pub buffers: u64,
    pub cached: u64,
}

/// Parses `/proc/meminfo` content.
///
/// Lines are `Key: value [unit]`. Lines without a numeric value are skipped
/// and unrecognized keys are ignored, so this never fails on content.
pub fn parse_meminfo(content: &str) -> MemInfo {
    let mut info = MemInfo::default();

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<u64>() else {
            continue;
        };

        match key.trim_end_matches(':') {
            "MemTotal" => info.mem_total = value,
            "MemFree" => info.mem_free = value,
            "MemAvailable" => info.mem_available = Some(value),
            "Buffers" => info.buffers = value,
            "Cached" => info.cached = value,
            _ => {}
        }
    }

    info
}
