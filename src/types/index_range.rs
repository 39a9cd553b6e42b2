//! # Closed-Interval Index Ranges
//!
//! A rectangular row/column window with inclusive bounds, 0-based. This is
//! the range value consumed by the windowed operations (zero-out, row
//! splitting); the bounds are validated by the operations themselves
//! against the frame they apply to.

/// Closed row/column interval, 0-based inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl IndexRange {
    /// Creates a range over `[row_start,row_end] x [col_start,col_end]`.
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// Number of rows in the window.
    pub fn rows(&self) -> usize {
        self.row_end - self.row_start + 1
    }

    /// Number of columns in the window.
    pub fn cols(&self) -> usize {
        self.col_end - self.col_start + 1
    }
}
