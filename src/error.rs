//! # Frame Error Taxonomy
//!
//! All fallible operations in this crate return [`FrameError`] through the
//! crate-wide [`Result`] alias. The taxonomy is closed on purpose: callers
//! dispatch on the failure class, and every variant carries the
//! expected-vs-actual context needed for diagnosis.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `Dimension` | merge, cbind/rbind, left-indexing with oversized sources |
//! | `Index` | slicing and indexing with out-of-range bounds |
//! | `Parse` | string values that cannot coerce into a column's kind |
//! | `UnsupportedType` | kind bytes outside the fixed enumeration, kind mismatches on bulk copies |
//! | `Corrupt` | truncated or malformed serialized frame data |
//!
//! Errors are raised at the point of detection. Public range-based
//! operations validate dimensions and bounds before mutating, so a failing
//! structural mutation leaves previously published invariants intact.

use thiserror::Error;

/// Errors produced by frame block operations.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Row/column mismatch between two operands.
    #[error("dimension mismatch in {op}: {found} (expected: {expected})")]
    Dimension {
        op: &'static str,
        expected: String,
        found: String,
    },

    /// Out-of-range bounds in slicing or indexing, 0-based inclusive.
    #[error("invalid indexing in {op}: {found} must be within {valid}")]
    Index {
        op: &'static str,
        found: String,
        valid: String,
    },

    /// A string value could not be parsed into the declared column kind.
    #[error("cannot parse '{value}' as {kind}: {reason}")]
    Parse {
        kind: &'static str,
        value: String,
        reason: String,
    },

    /// A value kind outside the fixed enumeration, or a kind mismatch on a
    /// typed bulk operation. This is a caller contract violation.
    #[error("unsupported value type: {0}")]
    UnsupportedType(String),

    /// Malformed or truncated serialized frame data.
    #[error("corrupt frame block: {0}")]
    Corrupt(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FrameError>;
