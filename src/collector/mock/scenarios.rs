//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` and filesystem states for
//! exercising collectors under various system conditions.

use super::filesystem::MockFs;
use crate::collector::traits::FsStats;

/// `/proc/stat` of an idle four-core machine.
pub const TYPICAL_STAT: &str = "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
";

/// `/proc/meminfo` of a 16 GiB machine.
pub const TYPICAL_MEMINFO: &str = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Dirty:              1024 kB
";

impl MockFs {
    /// Creates a typical system: 4 CPUs, 16 GiB of memory and an ext4 root
    /// with the usual 5% of blocks reserved for root.
    pub fn typical_system() -> Self {
        let fs = Self::new();

        fs.add_file("/proc/stat", TYPICAL_STAT);
        fs.add_file("/proc/meminfo", TYPICAL_MEMINFO);
        fs.add_mount(
            "/",
            FsStats {
                blocks: 1_000_000,
                fragment_size: 4096,
                blocks_free: 400_000,
                blocks_available: 350_000,
            },
        );

        fs
    }

    /// Creates an old-kernel system: legacy four-field CPU line and no
    /// `MemAvailable` in meminfo.
    pub fn legacy_kernel() -> Self {
        let fs = Self::new();

        fs.add_file("/proc/stat", "cpu  4000 100 1200 50000\nctxt 1000\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:        1000 kB
MemFree:          200 kB
Buffers:           50 kB
Cached:            50 kB
",
        );
        fs.add_mount(
            "/",
            FsStats {
                blocks: 1000,
                fragment_size: 1024,
                blocks_free: 250,
                blocks_available: 250,
            },
        );

        fs
    }

    /// Creates a system with a completely full data volume mounted at `/data`
    /// on top of the typical system.
    pub fn full_disk() -> Self {
        let fs = Self::typical_system();

        fs.add_mount(
            "/data",
            FsStats {
                blocks: 500_000,
                fragment_size: 4096,
                blocks_free: 0,
                blocks_available: 0,
            },
        );

        fs
    }

    /// Creates a system whose `/proc` sources are all missing, as inside a
    /// restricted sandbox.
    pub fn without_proc() -> Self {
        let fs = Self::new();

        fs.add_mount(
            "/",
            FsStats {
                blocks: 1000,
                fragment_size: 4096,
                blocks_free: 500,
                blocks_available: 500,
            },
        );

        fs
    }
}
