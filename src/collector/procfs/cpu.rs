//! CPU collector: utilization from two time-separated `/proc/stat` readings.

use std::path::PathBuf;

use tracing::debug;

use crate::collector::error::CollectError;
use crate::collector::procfs::parser::parse_cpu_aggregate;
use crate::collector::traits::FileSystem;
use crate::model::{CpuSample, CpuUsage};
use crate::rates::cpu_usage;

/// Collects aggregate CPU utilization.
///
/// Utilization is a rate, so the collector keeps the previous sample. The
/// first [`sample`](Self::sample) after construction or [`reset`](Self::reset)
/// only establishes the baseline and yields `None`.
pub struct CpuCollector<F: FileSystem> {
    fs: F,
    stat_path: PathBuf,
    previous: Option<CpuSample>,
}

impl<F: FileSystem> CpuCollector<F> {
    /// Creates a new CPU collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            stat_path: PathBuf::from(format!("{}/stat", proc_path.into())),
            previous: None,
        }
    }

    /// Reads the current cumulative tick counters.
    pub fn read(&self) -> Result<CpuSample, CollectError> {
        let content = self.fs.read_to_string(&self.stat_path).map_err(|source| {
            CollectError::SourceUnavailable {
                path: self.stat_path.clone(),
                source,
            }
        })?;

        parse_cpu_aggregate(&content).map_err(|e| CollectError::ParseFailure {
            path: self.stat_path.clone(),
            message: e.message,
        })
    }

    /// Computes utilization between two chronologically ordered samples.
    pub fn derive_usage(previous: &CpuSample, current: &CpuSample) -> CpuUsage {
        cpu_usage(previous, current)
    }

    /// Takes the warm-up reading that later samples are compared against.
    pub fn warm_up(&mut self) -> Result<(), CollectError> {
        let baseline = self.read()?;
        debug!("CPU baseline: {} ticks", baseline.total());
        self.previous = Some(baseline);
        Ok(())
    }

    /// Reads the counters and derives utilization since the previous sample.
    ///
    /// Returns `Ok(None)` when there was no previous sample. A failed read
    /// keeps the previous sample, so the next successful read spans the gap.
    pub fn sample(&mut self) -> Result<Option<CpuUsage>, CollectError> {
        let current = self.read()?;
        let usage = self
            .previous
            .replace(current)
            .map(|previous| Self::derive_usage(&previous, &current));

        if let Some(usage) = &usage {
            debug!("CPU usage: {:.1}%", usage.usage_percent);
        }
        Ok(usage)
    }

    /// Returns true once a baseline sample is held.
    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }

    /// Forgets the stored sample; the next `sample` is a warm-up again.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_read_typical_system() {
        let collector = CpuCollector::new(MockFs::typical_system(), "/proc");
        let sample = collector.read().unwrap();

        assert_eq!(sample.user, 10000);
        assert_eq!(sample.nice, 500);
        assert_eq!(sample.idle, 80000);
        assert_eq!(sample.softirq, 100);
        assert_eq!(sample.steal, 0);
    }

    #[test]
    fn test_read_legacy_kernel() {
        let collector = CpuCollector::new(MockFs::legacy_kernel(), "/proc");
        let sample = collector.read().unwrap();

        assert_eq!(sample.system, 1200);
        assert_eq!(sample.iowait, 0);
    }

    #[test]
    fn test_read_missing_source() {
        let collector = CpuCollector::new(MockFs::without_proc(), "/proc");
        let err = collector.read().unwrap_err();

        assert!(matches!(err, CollectError::SourceUnavailable { .. }));
        assert_eq!(err.path(), std::path::Path::new("/proc/stat"));
    }

    #[test]
    fn test_read_malformed_source() {
        let fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu 1 2\n");
        let collector = CpuCollector::new(fs, "/proc");

        assert!(matches!(
            collector.read(),
            Err(CollectError::ParseFailure { .. })
        ));
    }

    #[test]
    fn test_read_custom_proc_path() {
        let fs = MockFs::new();
        fs.add_file("/host/proc/stat", "cpu 1 2 3 4\n");
        let collector = CpuCollector::new(fs, "/host/proc");

        assert_eq!(collector.read().unwrap().idle, 4);
    }

    #[test]
    fn test_first_sample_is_warm_up() {
        let mut collector = CpuCollector::new(MockFs::typical_system(), "/proc");

        assert!(!collector.has_baseline());
        assert_eq!(collector.sample().unwrap(), None);
        assert!(collector.has_baseline());
    }

    #[test]
    fn test_sample_derives_from_previous() {
        let fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu 100 0 50 850 0 0 0 0\n");
        let mut collector = CpuCollector::new(fs.clone(), "/proc");
        collector.warm_up().unwrap();

        fs.add_file("/proc/stat", "cpu 1050 0 70 880 0 0 0 0\n");
        let usage = collector.sample().unwrap().unwrap();
        assert_eq!(usage.usage_percent, 97.0);

        // The second reading is now the baseline: nothing elapsed since
        let usage = collector.sample().unwrap().unwrap();
        assert_eq!(usage.usage_percent, 0.0);
    }

    #[test]
    fn test_failed_read_keeps_baseline() {
        let fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu 0 0 0 100\n");
        let mut collector = CpuCollector::new(fs.clone(), "/proc");
        collector.warm_up().unwrap();

        fs.remove_file("/proc/stat");
        assert!(collector.sample().is_err());
        assert!(collector.has_baseline());

        fs.add_file("/proc/stat", "cpu 50 0 0 150\n");
        let usage = collector.sample().unwrap().unwrap();
        assert_eq!(usage.usage_percent, 50.0);
    }

    #[test]
    fn test_reset_returns_to_warm_up() {
        let mut collector = CpuCollector::new(MockFs::typical_system(), "/proc");
        collector.warm_up().unwrap();
        collector.reset();

        assert!(!collector.has_baseline());
        assert_eq!(collector.sample().unwrap(), None);
    }

    #[test]
    fn test_counter_reset_between_samples() {
        let fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu 90000 0 30000 800000 500\n");
        let mut collector = CpuCollector::new(fs.clone(), "/proc");
        collector.warm_up().unwrap();

        fs.add_file("/proc/stat", "cpu 10 0 5 100 0\n");
        let usage = collector.sample().unwrap().unwrap();
        assert_eq!(usage, CpuUsage::default());
    }

    #[test]
    fn test_reads_are_deterministic() {
        let collector = CpuCollector::new(MockFs::typical_system(), "/proc");
        let first = collector.read().unwrap();
        let second = collector.read().unwrap();

        assert_eq!(first, second);
        assert_eq!(CpuCollector::<MockFs>::derive_usage(&first, &second), CpuUsage::default());
    }
}
