//! Run summary rendering.
//!
//! The final report goes through the reporter like every other status line,
//! so it lands both on the console and in the run log.

use crate::logging::Reporter;
use crate::progress::{format_avg_secs, format_bytes, format_hms};
use crate::stats::RunTotals;
use console::style;
use std::time::Duration;

const RULE_WIDTH: usize = 60;

pub fn print_summary_report(reporter: &dyn Reporter, totals: &RunTotals, wall_elapsed: Duration) {
    let rule = "═".repeat(RULE_WIDTH);

    reporter.info("");
    reporter.info(&rule);
    reporter.info(&format!(
        "📊 {}",
        style("TIFF → WebP CONVERSION SUMMARY").cyan().bold()
    ));
    reporter.info(&format!("Files converted:       {}", totals.converted));
    reporter.info(&format!(
        "Total wall-clock time: {}",
        format_hms(wall_elapsed)
    ));
    reporter.info(&format!(
        "Net encode time:       {}",
        format_hms(totals.encode_time)
    ));
    reporter.info(&format!(
        "Average time per file: {}",
        format_avg_secs(totals.avg_encode_secs())
    ));
    reporter.info(&format!(
        "Total TIFF size:       {}",
        format_bytes(totals.original_bytes)
    ));
    reporter.info(&format!(
        "Total WebP size:       {}",
        format_bytes(totals.converted_bytes)
    ));
    reporter.info(&format!(
        "Compression ratio:     {:.2}%",
        totals.overall_ratio() * 100.0
    ));
    reporter.info(&format!(
        "Space saved:           {}",
        format_bytes(totals.bytes_saved())
    ));
    reporter.info(&rule);
}
