//! Progress bar construction and display formatting.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{prefix:.cyan} ▕{bar:30.green}▏ {pos}/{len} {msg}";
const PROGRESS_CHARS: &str = "█▓░";

/// Per-directory conversion bar. Drawn on stderr so it interleaves with
/// the reporter's console lines.
pub fn create_progress_bar(total: u64, prefix: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .expect("Invalid progress bar template")
            .progress_chars(PROGRESS_CHARS),
    );
    bar.set_prefix(prefix.to_string());
    bar
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// `HH:MM:SS.mmm`, used for the wall-clock and net-encode totals.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs_f64();
    let hours = (total / 3600.0) as u64;
    let minutes = ((total % 3600.0) / 60.0) as u64;
    let seconds = total % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, seconds)
}

/// Average-per-file display: plain seconds below one minute, minutes and
/// seconds above it.
pub fn format_avg_secs(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.3}s", seconds)
    } else {
        let minutes = (seconds / 60.0) as u64;
        format!("{}m {:.3}s", minutes, seconds % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(Duration::ZERO), "00:00:00.000");
        assert_eq!(format_hms(Duration::from_millis(500)), "00:00:00.500");
        assert_eq!(format_hms(Duration::from_secs(90)), "00:01:30.000");
        assert_eq!(format_hms(Duration::from_secs_f64(3661.25)), "01:01:01.250");
    }

    #[test]
    fn test_format_avg_secs() {
        assert_eq!(format_avg_secs(0.0), "0.000s");
        assert_eq!(format_avg_secs(2.5), "2.500s");
        assert_eq!(format_avg_secs(59.999), "59.999s");
        assert_eq!(format_avg_secs(90.5), "1m 30.500s");
        assert_eq!(format_avg_secs(125.0), "2m 5.000s");
    }

    #[test]
    fn test_create_progress_bar_no_panic() {
        let bar = create_progress_bar(10, "Converting scans");
        bar.inc(3);
        bar.set_message("ratio 50.0%, 0.5s");
        bar.finish_and_clear();
    }
}
