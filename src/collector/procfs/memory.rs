//! Memory collector: point-in-time utilization from `/proc/meminfo`.

use std::path::PathBuf;

use tracing::debug;

use crate::collector::error::CollectError;
use crate::collector::procfs::parser::parse_meminfo;
use crate::collector::traits::FileSystem;
use crate::model::MemorySample;
use crate::rates::memory_usage;

/// Collects memory utilization. Stateless: every read is independent.
pub struct MemoryCollector<F: FileSystem> {
    fs: F,
    meminfo_path: PathBuf,
}

impl<F: FileSystem> MemoryCollector<F> {
    /// Creates a new memory collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            meminfo_path: PathBuf::from(format!("{}/meminfo", proc_path.into())),
        }
    }

    /// Reads `/proc/meminfo` and derives used memory and utilization.
    pub fn read(&self) -> Result<MemorySample, CollectError> {
        let content = self
            .fs
            .read_to_string(&self.meminfo_path)
            .map_err(|source| CollectError::SourceUnavailable {
                path: self.meminfo_path.clone(),
                source,
            })?;

        let info = parse_meminfo(&content);
        if info.mem_available.is_none() {
            debug!("MemAvailable missing, estimating from free + buffers + cached");
        }

        Ok(memory_usage(&info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_read_typical_system() {
        let collector = MemoryCollector::new(MockFs::typical_system(), "/proc");
        let mem = collector.read().unwrap();

        assert_eq!(mem.total, 16384000);
        assert_eq!(mem.available, 12000000);
        assert_eq!(mem.free, 8192000);
        assert_eq!(mem.buffers, 512000);
        assert_eq!(mem.cached, 2048000);
        assert_eq!(mem.used, 4384000);
        assert!((0.0..=100.0).contains(&mem.usage_percent));
    }

    #[test]
    fn test_read_fallback_path() {
        let collector = MemoryCollector::new(MockFs::legacy_kernel(), "/proc");
        let mem = collector.read().unwrap();

        assert_eq!(mem.used, 700);
        assert_eq!(mem.available, 300);
        assert_eq!(mem.usage_percent, 70.0);
    }

    #[test]
    fn test_read_missing_source() {
        let collector = MemoryCollector::new(MockFs::without_proc(), "/proc");
        let err = collector.read().unwrap_err();

        assert!(matches!(err, CollectError::SourceUnavailable { .. }));
        assert_eq!(err.path(), std::path::Path::new("/proc/meminfo"));
    }

    #[test]
    fn test_read_empty_source() {
        let fs = MockFs::new();
        fs.add_file("/proc/meminfo", "");
        let mem = MemoryCollector::new(fs, "/proc").read().unwrap();

        assert_eq!(mem.total, 0);
        assert_eq!(mem.usage_percent, 0.0);
    }

    #[test]
    fn test_read_is_idempotent() {
        let collector = MemoryCollector::new(MockFs::typical_system(), "/proc");
        let first = collector.read().unwrap();
        let second = collector.read().unwrap();

        assert_eq!(first, second);
        assert!((first.usage_percent - second.usage_percent).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recovers_after_source_returns() {
        let fs = MockFs::new();
        let collector = MemoryCollector::new(fs.clone(), "/proc");
        assert!(collector.read().is_err());

        fs.add_file("/proc/meminfo", "MemTotal: 100 kB\nMemAvailable: 25 kB\n");
        assert_eq!(collector.read().unwrap().usage_percent, 75.0);
    }
}
