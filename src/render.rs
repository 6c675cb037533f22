//! Text rendering of reports as colored gauges.
//!
//! Everything writes to a generic `Write` so the output can be captured in
//! tests; the binary passes a locked stdout.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::fmt::{format_bytes, format_kib};
use crate::model::{CpuUsage, DiskSample, MemorySample};
use crate::monitor::Report;

/// Number of cells in a gauge bar.
pub const BAR_WIDTH: usize = 50;

const TITLE: &str = "Linux System Monitoring Tool";
const RULE: &str = "═══════════════════════════════════════════════════════════";

/// The metric a gauge shows; each has its own color thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    Cpu,
    Memory,
    Disk,
}

impl Gauge {
    /// `(warning, critical)` thresholds in percent. Both are exclusive.
    pub fn thresholds(self) -> (f64, f64) {
        match self {
            Gauge::Cpu => (60.0, 80.0),
            Gauge::Memory => (75.0, 90.0),
            Gauge::Disk => (80.0, 90.0),
        }
    }

    /// Color hint for a percentage on this gauge.
    pub fn color(self, percent: f64) -> Color {
        let (warn, crit) = self.thresholds();
        if percent > crit {
            Color::DarkRed
        } else if percent > warn {
            Color::DarkYellow
        } else {
            Color::DarkGreen
        }
    }
}

/// Splits the bar into `(filled, empty)` cells for a percentage.
pub fn bar_cells(percent: f64) -> (usize, usize) {
    let filled = ((percent.clamp(0.0, 100.0) * BAR_WIDTH as f64 / 100.0) as usize).min(BAR_WIDTH);
    (filled, BAR_WIDTH - filled)
}

/// Prints the title shown once at startup.
pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(Color::DarkCyan),
        Print(TITLE),
        ResetColor,
        SetAttribute(Attribute::Reset),
        Print("\nPress Ctrl+C to exit\n\n"),
    )?;
    out.flush()
}

/// Clears the screen and prints the title for one continuous-mode frame.
pub fn render_frame_header<W: Write>(out: &mut W, interval: Duration) -> io::Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        SetForegroundColor(Color::DarkCyan),
        Print(TITLE),
        ResetColor,
        SetAttribute(Attribute::Reset),
        Print(format!(
            "\nPress Ctrl+C to exit | Refresh rate: {}s\n\n",
            interval.as_secs()
        )),
    )
}

/// Prints every successfully collected metric of a report.
///
/// Failed or disabled metrics are omitted; their errors are logged by the
/// monitor.
pub fn render_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(Color::Grey),
        Print(format!(
            "System Status - {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S")
        )),
        ResetColor,
        SetAttribute(Attribute::Reset),
        Print(format!("\n{}\n\n", RULE)),
    )?;

    if let Some(Ok(cpu)) = &report.cpu {
        render_cpu(out, cpu)?;
    }
    if let Some(Ok(memory)) = &report.memory {
        render_memory(out, memory)?;
    }
    if let Some(Ok(disk)) = &report.disk {
        render_disk(out, disk)?;
    }

    queue!(out, Print(format!("{}\n", RULE)))?;
    out.flush()
}

/// Prints the goodbye line after the loop ends.
pub fn render_stopped<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(Color::DarkGreen),
        Print("\nMonitoring stopped.\n"),
        ResetColor,
        SetAttribute(Attribute::Reset),
    )?;
    out.flush()
}

fn render_cpu<W: Write>(out: &mut W, cpu: &CpuUsage) -> io::Result<()> {
    section_title(out, "CPU Usage:", Color::DarkCyan)?;
    gauge(out, "CPU", cpu.usage_percent, Gauge::Cpu)?;
    details(
        out,
        "Details:",
        &format!(
            "User: {:.1}%, System: {:.1}%, Idle: {:.1}%",
            cpu.user_percent, cpu.system_percent, cpu.idle_percent
        ),
    )?;
    queue!(out, Print("\n"))
}

fn render_memory<W: Write>(out: &mut W, memory: &MemorySample) -> io::Result<()> {
    section_title(out, "Memory Usage:", Color::DarkMagenta)?;
    gauge(out, "Memory", memory.usage_percent, Gauge::Memory)?;
    details(
        out,
        "Details:",
        &format!(
            "Used: {}, Available: {}, Total: {}",
            format_kib(memory.used),
            format_kib(memory.available),
            format_kib(memory.total)
        ),
    )?;
    details(
        out,
        "Caching:",
        &format!(
            "Buffers: {}, Cached: {}",
            format_kib(memory.buffers),
            format_kib(memory.cached)
        ),
    )?;
    queue!(out, Print("\n"))
}

fn render_disk<W: Write>(out: &mut W, disk: &DiskSample) -> io::Result<()> {
    section_title(
        out,
        &format!("Disk Usage ({}):", disk.mount_point),
        Color::DarkYellow,
    )?;
    gauge(out, "Disk", disk.usage_percent, Gauge::Disk)?;
    details(
        out,
        "Details:",
        &format!(
            "Used: {}, Available: {}, Total: {}",
            format_bytes(disk.used),
            format_bytes(disk.available),
            format_bytes(disk.total)
        ),
    )?;
    queue!(out, Print("\n"))
}

fn section_title<W: Write>(out: &mut W, title: &str, color: Color) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(color),
        Print(title),
        ResetColor,
        SetAttribute(Attribute::Reset),
        Print("\n"),
    )
}

fn gauge<W: Write>(out: &mut W, label: &str, percent: f64, kind: Gauge) -> io::Result<()> {
    let (filled, empty) = bar_cells(percent);
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(format!("{:<12}", label)),
        SetAttribute(Attribute::Reset),
        Print(" ["),
        SetForegroundColor(kind.color(percent)),
        Print("█".repeat(filled)),
        ResetColor,
        Print("░".repeat(empty)),
        Print("] "),
        SetAttribute(Attribute::Bold),
        Print(format!("{:.1}%", percent)),
        SetAttribute(Attribute::Reset),
        Print("\n"),
    )
}

fn details<W: Write>(out: &mut W, heading: &str, text: &str) -> io::Result<()> {
    queue!(
        out,
        Print("  "),
        SetAttribute(Attribute::Bold),
        Print(heading),
        SetAttribute(Attribute::Reset),
        Print(format!(" {}\n", text)),
    )
}
