//! Size statistics for one encode.

use std::fmt;
use tracing::info;

/// Original and compressed sizes plus the compressed/original ratio as a
/// whole percentage (truncated). An empty original reports 0%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformReport {
    pub original_size: usize,
    pub compressed_size: usize,
    pub ratio_pct: u64,
}

impl TransformReport {
    pub fn new(original_size: usize, compressed_size: usize) -> Self {
        let ratio_pct = if original_size == 0 {
            0
        } else {
            compressed_size as u64 * 100 / original_size as u64
        };
        Self { original_size, compressed_size, ratio_pct }
    }

    pub fn saved_bytes(&self) -> usize {
        self.original_size.saturating_sub(self.compressed_size)
    }

    /// Share of the original removed, in percent.
    pub fn reduction_pct(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.saved_bytes() as f64 / self.original_size as f64 * 100.0
    }

    pub fn log(&self) {
        info!(
            original = self.original_size,
            compressed = self.compressed_size,
            ratio_pct = self.ratio_pct,
            "{}",
            self
        );
    }
}

impl fmt::Display for TransformReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Original file size: {}  ;;  Compressed file size: {}  ;;  Compression ratio: {}%",
            self.original_size, self.compressed_size, self.ratio_pct
        )
    }
}
