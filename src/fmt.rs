//! Shared formatting helpers for the gauge renderer.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format byte count as human-readable size (1024-based).
///
/// Plain bytes are printed as an integer, larger units with one decimal:
/// `"512 B"`, `"1.5 KB"`, `"15.6 GB"`. Sizes beyond the largest unit stay in TB.
pub fn format_bytes(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Format a kibibyte count (as reported by `/proc/meminfo`) as a size.
pub fn format_kib(kib: u64) -> String {
    format_bytes(kib.saturating_mul(1024))
}
