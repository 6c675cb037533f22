//! Polling driver: runs the collectors on a fixed cadence.
//!
//! The `Monitor` owns one instance of each collector, takes the CPU warm-up
//! reading, and produces one [`Report`] per cycle. A failed metric is logged
//! and carried as an error in that cycle's report; the other metrics are
//! unaffected and the next cycle tries it again.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::collector::{CollectError, CpuCollector, DiskCollector, FileSystem, MemoryCollector};
use crate::model::{CpuUsage, DiskSample, MemorySample};
use crate::shutdown::Shutdown;

/// Driver settings, normally built from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Delay between two poll cycles.
    pub interval: Duration,
    /// Delay between the CPU warm-up reading and the first cycle.
    ///
    /// Fixed at one second regardless of `interval`.
    pub warm_up: Duration,
    pub cpu: bool,
    pub memory: bool,
    /// Path whose filesystem is sampled; `None` disables the disk metric.
    pub disk_path: Option<PathBuf>,
    /// Keep polling until shutdown instead of running a single cycle.
    pub continuous: bool,
}

impl MonitorConfig {
    pub const DEFAULT_WARM_UP: Duration = Duration::from_secs(1);
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            warm_up: Self::DEFAULT_WARM_UP,
            cpu: true,
            memory: true,
            disk_path: Some(PathBuf::from("/")),
            continuous: true,
        }
    }
}

/// Outcome of one poll cycle.
///
/// Each metric is `None` when it is disabled (or, for CPU, while no baseline
/// exists yet) and holds the read error when collection failed.
#[derive(Debug)]
pub struct Report {
    pub timestamp: DateTime<Local>,
    pub cpu: Option<Result<CpuUsage, CollectError>>,
    pub memory: Option<Result<MemorySample, CollectError>>,
    pub disk: Option<Result<DiskSample, CollectError>>,
}

impl Report {
    /// Errors of the metrics that failed this cycle.
    pub fn errors(&self) -> impl Iterator<Item = &CollectError> {
        let cpu = self.cpu.as_ref().and_then(|r| r.as_ref().err());
        let memory = self.memory.as_ref().and_then(|r| r.as_ref().err());
        let disk = self.disk.as_ref().and_then(|r| r.as_ref().err());
        cpu.into_iter().chain(memory).chain(disk)
    }

    /// Serializes the report as a single JSON object.
    ///
    /// Failed metrics are `null` and their messages are listed in `errors`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let value = json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "cpu":       metric_value(&self.cpu)?,
            "memory":    metric_value(&self.memory)?,
            "disk":      metric_value(&self.disk)?,
            "errors":    self.errors().map(|e| e.to_string()).collect::<Vec<_>>(),
        });
        serde_json::to_string(&value)
    }
}

fn metric_value<T: Serialize>(metric: &Option<Result<T, CollectError>>) -> serde_json::Result<Value> {
    match metric {
        Some(Ok(sample)) => serde_json::to_value(sample),
        _ => Ok(Value::Null),
    }
}

/// Runs the collectors according to a [`MonitorConfig`].
pub struct Monitor<F: FileSystem + Clone> {
    config: MonitorConfig,
    cpu: CpuCollector<F>,
    memory: MemoryCollector<F>,
    disk: DiskCollector<F>,
}

impl<F: FileSystem + Clone> Monitor<F> {
    /// Creates a new monitor.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    /// * `config` - Which metrics to sample and how often
    pub fn new(fs: F, proc_path: impl Into<String>, config: MonitorConfig) -> Self {
        let proc_path = proc_path.into();

        Self {
            config,
            cpu: CpuCollector::new(fs.clone(), &proc_path),
            memory: MemoryCollector::new(fs.clone(), &proc_path),
            disk: DiskCollector::new(fs),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Takes the CPU baseline reading and waits out the warm-up delay.
    ///
    /// Does nothing when the CPU metric is disabled. A failed baseline read is
    /// logged; the first cycle then serves as the warm-up instead. Returns
    /// `false` if shutdown was requested while waiting.
    pub fn warm_up(&mut self, shutdown: &Shutdown) -> bool {
        if !self.config.cpu {
            return !shutdown.is_requested();
        }

        if let Err(e) = self.cpu.warm_up() {
            warn!("CPU warm-up read failed: {}", e);
        }
        shutdown.sleep(self.config.warm_up)
    }

    /// Samples every enabled metric once.
    pub fn poll(&mut self) -> Report {
        let timestamp = Local::now();

        let cpu = if self.config.cpu {
            self.cpu.sample().transpose()
        } else {
            None
        };
        let memory = self.config.memory.then(|| self.memory.read());
        let disk = self
            .config
            .disk_path
            .as_ref()
            .map(|path| self.disk.read(path));

        let report = Report {
            timestamp,
            cpu,
            memory,
            disk,
        };

        for error in report.errors() {
            warn!("Skipping metric this cycle: {}", error);
        }
        report
    }

    /// Runs the warm-up and poll loop until done or shutdown is requested.
    ///
    /// `on_report` receives every report; its first error aborts the loop and
    /// is returned. In single-shot mode exactly one cycle runs. Returns the
    /// number of completed cycles.
    pub fn run<E>(
        &mut self,
        shutdown: &Shutdown,
        mut on_report: impl FnMut(&Report) -> Result<(), E>,
    ) -> Result<u64, E> {
        let mut cycles = 0;

        if !self.warm_up(shutdown) {
            info!("Shutdown requested during warm-up");
            return Ok(cycles);
        }

        while !shutdown.is_requested() {
            let report = self.poll();
            on_report(&report)?;
            cycles += 1;
            debug!("Cycle #{} complete", cycles);

            if !self.config.continuous || !shutdown.sleep(self.config.interval) {
                break;
            }
        }

        Ok(cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    fn quick_config() -> MonitorConfig {
        MonitorConfig {
            interval: Duration::ZERO,
            warm_up: Duration::ZERO,
            continuous: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.warm_up, Duration::from_secs(1));
        assert!(config.cpu && config.memory && config.continuous);
        assert_eq!(config.disk_path, Some(PathBuf::from("/")));
    }

    #[test]
    fn test_poll_without_warm_up_has_no_cpu() {
        let mut monitor = Monitor::new(MockFs::typical_system(), "/proc", quick_config());
        let report = monitor.poll();

        assert!(report.cpu.is_none());
        assert!(matches!(report.memory, Some(Ok(_))));
        assert!(matches!(report.disk, Some(Ok(_))));
        assert_eq!(report.errors().count(), 0);
    }

    #[test]
    fn test_poll_after_warm_up_has_cpu() {
        let fs = MockFs::typical_system();
        let mut monitor = Monitor::new(fs.clone(), "/proc", quick_config());
        assert!(monitor.warm_up(&Shutdown::new()));

        fs.add_file("/proc/stat", "cpu  10050 500 3050 80100 1000 200 100 0\n");
        let report = monitor.poll();
        let usage = report.cpu.unwrap().unwrap();

        // 200 ticks elapsed, 100 of them idle
        assert_eq!(usage.usage_percent, 50.0);
        assert_eq!(usage.user_percent, 25.0);
    }

    #[test]
    fn test_disabled_metrics_are_absent() {
        let config = MonitorConfig {
            cpu: false,
            disk_path: None,
            ..quick_config()
        };
        let mut monitor = Monitor::new(MockFs::typical_system(), "/proc", config);
        let report = monitor.poll();

        assert!(report.cpu.is_none());
        assert!(report.memory.is_some());
        assert!(report.disk.is_none());
    }

    #[test]
    fn test_failed_metric_does_not_hide_others() {
        let config = MonitorConfig {
            disk_path: Some(PathBuf::from("/")),
            ..quick_config()
        };
        let mut monitor = Monitor::new(MockFs::without_proc(), "/proc", config);
        assert!(monitor.warm_up(&Shutdown::new()));
        let report = monitor.poll();

        assert!(matches!(report.cpu, Some(Err(CollectError::SourceUnavailable { .. }))));
        assert!(matches!(report.memory, Some(Err(CollectError::SourceUnavailable { .. }))));
        assert!(matches!(report.disk, Some(Ok(_))));
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_unknown_disk_path_is_reported() {
        let config = MonitorConfig {
            cpu: false,
            memory: false,
            disk_path: Some(PathBuf::from("/missing")),
            ..quick_config()
        };
        let mut monitor = Monitor::new(MockFs::new(), "/proc", config);
        let report = monitor.poll();

        assert!(matches!(report.disk, Some(Err(CollectError::PathUnavailable { .. }))));
    }

    #[test]
    fn test_run_single_shot() {
        let mut monitor = Monitor::new(MockFs::typical_system(), "/proc", quick_config());
        let mut seen = Vec::new();

        let cycles = monitor
            .run(&Shutdown::new(), |report| {
                seen.push(report.cpu.is_some());
                Ok::<(), ()>(())
            })
            .unwrap();

        assert_eq!(cycles, 1);
        // Warm-up already happened, so the single cycle carries a CPU reading
        assert_eq!(seen, vec![true]);
    }

    #[test]
    fn test_run_stops_when_shutdown_requested() {
        let config = MonitorConfig {
            continuous: true,
            ..quick_config()
        };
        let mut monitor = Monitor::new(MockFs::typical_system(), "/proc", config);
        let shutdown = Shutdown::new();

        let cycles = monitor
            .run(&shutdown, |_| {
                shutdown.request();
                Ok::<(), ()>(())
            })
            .unwrap();

        assert_eq!(cycles, 1);
    }

    #[test]
    fn test_run_continuous_until_callback_stops_it() {
        let config = MonitorConfig {
            continuous: true,
            ..quick_config()
        };
        let mut monitor = Monitor::new(MockFs::typical_system(), "/proc", config);
        let shutdown = Shutdown::new();
        let mut count = 0;

        let cycles = monitor
            .run(&shutdown, |_| {
                count += 1;
                if count == 3 {
                    shutdown.request();
                }
                Ok::<(), ()>(())
            })
            .unwrap();

        assert_eq!(cycles, 3);
    }

    #[test]
    fn test_run_propagates_callback_error() {
        let config = MonitorConfig {
            continuous: true,
            ..quick_config()
        };
        let mut monitor = Monitor::new(MockFs::typical_system(), "/proc", config);

        let result = monitor.run(&Shutdown::new(), |_| Err("stdout closed"));
        assert_eq!(result, Err("stdout closed"));
    }

    #[test]
    fn test_run_skips_cycles_when_shut_down_before_start() {
        let mut monitor = Monitor::new(MockFs::typical_system(), "/proc", quick_config());
        let shutdown = Shutdown::new();
        shutdown.request();

        let cycles = monitor.run(&shutdown, |_| Ok::<(), ()>(())).unwrap();
        assert_eq!(cycles, 0);
    }

    #[test]
    fn test_report_to_json() {
        let mut monitor = Monitor::new(MockFs::without_proc(), "/proc", quick_config());
        let report = monitor.poll();
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert!(value["cpu"].is_null());
        assert!(value["memory"].is_null());
        assert_eq!(value["disk"]["mount_point"], "/");
        assert_eq!(value["disk"]["usage_percent"], 50.0);
        assert_eq!(value["errors"].as_array().unwrap().len(), 2);
    }
}
