//! Reporting sink shared by the driver and the directory processor.
//!
//! Every status line is timestamped and written twice: to the console
//! (stderr) and appended to `tiff2webp.log` in the working directory. The
//! sink is passed explicitly to whatever needs to emit output; nothing in
//! this module holds global state.

use anyhow::{Context, Result};
use chrono::Local;
use console::strip_ansi_codes;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Name of the append-mode run log, created in the working directory.
pub const LOG_FILE_NAME: &str = "tiff2webp.log";

/// Output sink for status lines, errors, and per-file progress.
pub trait Reporter {
    fn info(&self, message: &str);

    /// Errors are reported here, never thrown across this seam.
    fn error(&self, message: &str);

    /// Per-file conversion progress: compression ratio and encode time.
    fn progress(&self, file: &str, ratio: f64, elapsed: Duration) {
        self.info(&format!(
            "{} → ratio {:.1}%, {:.1}s",
            file,
            ratio * 100.0,
            elapsed.as_secs_f64()
        ));
    }
}

/// Duplicates every line to stderr and an append-mode log file. ANSI
/// styling survives on the console but is stripped from the file copy.
pub struct TeeReporter {
    log: Mutex<File>,
}

impl TeeReporter {
    pub fn new(log_path: &Path) -> Result<Self> {
        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
        Ok(Self {
            log: Mutex::new(log),
        })
    }

    /// Opens `tiff2webp.log` in the working directory.
    pub fn open_default() -> Result<Self> {
        Self::new(Path::new(LOG_FILE_NAME))
    }

    fn emit(&self, level: &str, message: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        eprintln!("{} - {} - {}", stamp, level, message);
        if let Ok(mut log) = self.log.lock() {
            let _ = writeln!(log, "{} - {} - {}", stamp, level, strip_ansi_codes(message));
        }
    }
}

impl Reporter for TeeReporter {
    fn info(&self, message: &str) {
        self.emit("INFO", message);
    }

    fn error(&self, message: &str) {
        self.emit("ERROR", message);
    }
}

/// Captures reported lines in memory. Test sink for asserting on output.
#[derive(Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<String> {
        self.lines_at_level("INFO")
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines_at_level("ERROR")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .map(|lines| lines.iter().any(|(_, line)| line.contains(needle)))
            .unwrap_or(false)
    }

    fn lines_at_level(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| {
                lines
                    .iter()
                    .filter(|(l, _)| *l == level)
                    .map(|(_, line)| line.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, level: &'static str, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, message: &str) {
        self.record("INFO", message);
    }

    fn error(&self, message: &str) {
        self.record("ERROR", message);
    }
}
