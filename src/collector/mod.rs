//! Resource collectors for Linux.
//!
//! Collectors read raw counters from the operating system and turn them into
//! typed snapshots, with support for mocking so tests run on any host.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                           Monitor                             │
//! │  ┌──────────────┐  ┌─────────────────┐  ┌──────────────────┐  │
//! │  │ CpuCollector │  │ MemoryCollector │  │  DiskCollector   │  │
//! │  │ - /proc/stat │  │ - /proc/meminfo │  │  - statvfs(path) │  │
//! │  │ - prev sample│  └────────┬────────┘  └────────┬─────────┘  │
//! │  └──────┬───────┘           │                    │            │
//! │         └───────────────────┼────────────────────┘            │
//! │                      ┌──────▼──────┐                          │
//! │                      │  FileSystem │ (trait)                  │
//! │                      └──────┬──────┘                          │
//! └─────────────────────────────┼─────────────────────────────────┘
//!                 ┌─────────────┼─────────────┐
//!          ┌──────▼──────┐ ┌────▼────────┐ ┌──▼──────────┐
//!          │   RealFs    │ │   MockFs    │ │  Scenarios  │
//!          │  (Linux)    │ │  (Testing)  │ │  (Fixtures) │
//!          └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use sysgauge::collector::{MemoryCollector, RealFs};
//!
//! let collector = MemoryCollector::new(RealFs::new(), "/proc");
//! let memory = collector.read().unwrap();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use sysgauge::collector::{DiskCollector, MockFs};
//!
//! let collector = DiskCollector::new(MockFs::typical_system());
//! let disk = collector.read("/").unwrap();
//! assert!(disk.used <= disk.total);
//! ```

pub mod disk;
pub mod error;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use disk::DiskCollector;
pub use error::CollectError;
pub use mock::MockFs;
pub use procfs::{CpuCollector, MemoryCollector};
pub use traits::{FileSystem, FsStats, RealFs};
