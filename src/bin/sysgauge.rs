//! sysgauge - Terminal resource monitor.
//!
//! Usage:
//!   sysgauge                  # all metrics, refresh every second
//!   sysgauge -r 2 -c          # CPU only, refresh every 2 seconds
//!   sysgauge -d /home -o      # disk usage of /home, once
//!   sysgauge --json -o        # one JSON report on stdout

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use sysgauge::collector::RealFs;
use sysgauge::monitor::{Monitor, MonitorConfig, Report};
use sysgauge::render;
use sysgauge::shutdown::Shutdown;

/// Linux system monitoring tool.
#[derive(Parser, Debug)]
#[command(name = "sysgauge", about = "Linux System Monitoring Tool", version)]
struct Args {
    /// Refresh rate in seconds.
    #[arg(short, long, value_name = "SECONDS", default_value_t = 1,
          value_parser = clap::value_parser!(u64).range(1..))]
    refresh: u64,

    /// Show CPU usage.
    #[arg(short, long)]
    cpu: bool,

    /// Show memory usage.
    #[arg(short, long)]
    memory: bool,

    /// Show disk usage for the filesystem containing PATH.
    #[arg(short, long, value_name = "PATH")]
    disk: Option<PathBuf>,

    /// Run once and exit (no continuous monitoring).
    #[arg(short, long)]
    once: bool,

    /// Print each report as a JSON line instead of gauges.
    #[arg(long)]
    json: bool,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Builds the driver settings. Without any selection flag every metric is
    /// shown and the disk metric uses `/`.
    fn monitor_config(&self) -> MonitorConfig {
        let defaults = MonitorConfig::default();
        let any_selected = self.cpu || self.memory || self.disk.is_some();

        MonitorConfig {
            interval: Duration::from_secs(self.refresh),
            cpu: !any_selected || self.cpu,
            memory: !any_selected || self.memory,
            disk_path: if any_selected {
                self.disk.clone()
            } else {
                defaults.disk_path.clone()
            },
            continuous: !self.once,
            ..defaults
        }
    }
}

/// Initializes the tracing subscriber on stderr.
/// Default level is WARN. Use -q for errors only.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("sysgauge={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn emit(out: &mut impl Write, report: &Report, config: &MonitorConfig, json: bool) -> anyhow::Result<()> {
    if json {
        let line = report.to_json().context("failed to serialize report")?;
        writeln!(out, "{}", line)?;
        out.flush()?;
        return Ok(());
    }

    if config.continuous {
        render::render_frame_header(out, config.interval)?;
    }
    render::render_report(out, report)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let config = args.monitor_config();
    info!("sysgauge {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, cpu={}, memory={}, disk={:?}, continuous={}, proc={}",
        args.refresh, config.cpu, config.memory, config.disk_path, config.continuous, args.proc_path
    );

    let shutdown = Shutdown::new();
    let handler = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        handler.request();
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.json {
        render::render_banner(&mut out)?;
    }

    let mut monitor = Monitor::new(RealFs::new(), &args.proc_path, config.clone());
    let cycles = monitor.run(&shutdown, |report| emit(&mut out, report, &config, args.json))?;
    info!("Stopped after {} cycles", cycles);

    if !args.json {
        render::render_stopped(&mut out)?;
    }
    Ok(())
}
