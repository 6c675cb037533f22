//! Abstractions over the operating-system sources the collectors read.
//!
//! The `FileSystem` trait lets collectors work against the real `/proc`
//! filesystem and `statvfs(2)` on Linux, or against an in-memory mock in tests.

use std::io;
use std::path::Path;

/// Raw filesystem statistics for the filesystem containing a path.
///
/// Block counts are in units of `fragment_size` bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FsStats {
    /// Total number of blocks on the filesystem.
    pub blocks: u64,
    /// Fundamental block (fragment) size in bytes.
    pub fragment_size: u64,
    /// Free blocks, including those reserved for the superuser.
    pub blocks_free: u64,
    /// Free blocks available to unprivileged users.
    pub blocks_available: u64,
}

/// Abstraction for the OS sources read by collectors.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    ///
    /// # Arguments
    /// * `path` - Path to the file to read
    ///
    /// # Returns
    /// The file contents as a string, or an I/O error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Queries filesystem statistics for the filesystem containing `path`.
    ///
    /// The path need not be a mount point.
    fn fs_stats(&self, path: &Path) -> io::Result<FsStats>;
}

/// Real implementation backed by `std::fs` and `statvfs(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn fs_stats(&self, path: &Path) -> io::Result<FsStats> {
        let stat = nix::sys::statvfs::statvfs(path).map_err(io::Error::from)?;

        Ok(FsStats {
            blocks: stat.blocks() as u64,
            fragment_size: stat.fragment_size() as u64,
            blocks_free: stat.blocks_free() as u64,
            blocks_available: stat.blocks_available() as u64,
        })
    }
}
