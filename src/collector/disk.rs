//! Disk collector: point-in-time utilization of the filesystem holding a path.

use std::path::Path;

use tracing::debug;

use crate::collector::error::CollectError;
use crate::collector::traits::FileSystem;
use crate::model::DiskSample;
use crate::rates::disk_usage;

/// Collects filesystem utilization. Stateless: every read is independent.
///
/// The statistics query has no timeout. A hung filesystem (for example a
/// stale network mount) blocks the read until the kernel answers.
pub struct DiskCollector<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> DiskCollector<F> {
    /// Creates a new disk collector.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Queries the filesystem containing `path`.
    ///
    /// `path` need not be a mount point. The returned sample keeps `path` as
    /// its `mount_point`.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<DiskSample, CollectError> {
        let path = path.as_ref();
        let stats = self
            .fs
            .fs_stats(path)
            .map_err(|source| CollectError::PathUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "statvfs {}: {} blocks of {} bytes, {} free, {} available",
            path.display(),
            stats.blocks,
            stats.fragment_size,
            stats.blocks_free,
            stats.blocks_available
        );

        Ok(disk_usage(path.to_string_lossy(), &stats))
    }
}
