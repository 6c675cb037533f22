//! In-memory mock filesystem for testing collectors without real `/proc`.
//!
//! `MockFs` holds file contents and per-path filesystem statistics in memory,
//! so collector tests are deterministic and run on any host.

use crate::collector::traits::{FileSystem, FsStats};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct MockState {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Map from path to the statistics `fs_stats` returns for it.
    mounts: HashMap<PathBuf, FsStats>,
}

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can keep a handle and update a
/// source after the filesystem has been moved into a collector.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    state: Arc<RwLock<MockState>>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file with the given content.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.write()
            .files
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    /// Removes a file, simulating a source that disappeared.
    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.write().files.remove(path.as_ref());
    }

    /// Registers filesystem statistics for a path.
    ///
    /// Lookups walk up the ancestors of the queried path, so a mount added at
    /// `/home` also answers for `/home/user/docs`.
    pub fn add_mount(&self, path: impl AsRef<Path>, stats: FsStats) {
        self.write()
            .mounts
            .insert(path.as_ref().to_path_buf(), stats);
    }

    // Every write is a single insert or remove, so a poisoned lock still holds consistent maps.
    fn read(&self) -> RwLockReadGuard<'_, MockState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.read().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn fs_stats(&self, path: &Path) -> io::Result<FsStats> {
        let state = self.read();
        path.ancestors()
            .find_map(|p| state.mounts.get(p))
            .copied()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no filesystem for: {:?}", path),
                )
            })
    }
}
