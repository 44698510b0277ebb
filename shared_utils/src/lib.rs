//! Shared utilities for the tiff2webp tool:
//! - Reporter sink (console output duplicated into the run log file)
//! - Progress bar construction and display formatting
//! - Conversion statistics (per-directory results and run totals)
//! - Summary report rendering

pub mod common_utils;
pub mod logging;
pub mod progress;
pub mod report;
pub mod stats;

pub use common_utils::{ensure_dir_exists, name_has_suffix, stem_lowercase};
pub use logging::{MemoryReporter, Reporter, TeeReporter, LOG_FILE_NAME};
pub use progress::{create_progress_bar, format_avg_secs, format_bytes, format_hms};
pub use report::print_summary_report;
pub use stats::{DirectoryResult, RunTotals};
