//! Per-directory and run-wide conversion statistics.

use std::time::Duration;

/// Outcome of converting one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectoryResult {
    /// Files successfully converted.
    pub converted: usize,
    /// Summed wall-clock time spent inside the encoder.
    pub encode_time: Duration,
    /// Mean of the per-file compression ratios, 0.0 when nothing converted.
    pub mean_ratio: f64,
    pub original_bytes: u64,
    pub converted_bytes: u64,
}

impl DirectoryResult {
    pub fn is_empty(&self) -> bool {
        self.converted == 0
    }
}

/// Field-wise accumulation across all processed directories.
///
/// Per-directory mean ratios are deliberately not averaged into the run:
/// the run-level ratio is derived from the byte totals, so directories with
/// few files cannot skew it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunTotals {
    pub converted: usize,
    pub encode_time: Duration,
    pub original_bytes: u64,
    pub converted_bytes: u64,
}

impl RunTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, result: &DirectoryResult) {
        self.converted += result.converted;
        self.encode_time += result.encode_time;
        self.original_bytes += result.original_bytes;
        self.converted_bytes += result.converted_bytes;
    }

    /// Byte-weighted compression ratio over the whole run, 0.0 when nothing
    /// was converted.
    pub fn overall_ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            self.converted_bytes as f64 / self.original_bytes as f64
        }
    }

    /// Mean encode seconds per converted file, 0.0 when nothing was
    /// converted.
    pub fn avg_encode_secs(&self) -> f64 {
        if self.converted == 0 {
            0.0
        } else {
            self.encode_time.as_secs_f64() / self.converted as f64
        }
    }

    pub fn bytes_saved(&self) -> u64 {
        self.original_bytes.saturating_sub(self.converted_bytes)
    }
}
