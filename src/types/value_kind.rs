//! # Column Value Kinds
//!
//! This module provides the canonical `ValueKind` enum: the closed set of
//! column types a frame block can hold. Dispatch over kinds is always an
//! exhaustive match, so adding a kind is a compile-time event rather than a
//! runtime downcast.
//!
//! ## Discriminant Values
//!
//! The `#[repr(u8)]` discriminants are load-bearing: they are written as-is
//! into the serialized column header and must never be reordered.
//!
//! | Kind | Ordinal | Storage | Default |
//! |------|---------|---------|---------|
//! | String | 0 | `Option<String>` per cell | `None` (missing) |
//! | Boolean | 1 | 1 byte | `false` |
//! | Int | 2 | 8-byte signed | `0` |
//! | Float | 3 | 8-byte IEEE-754 | `0.0` |
//!
//! String is the only kind with an explicit missing state; the other kinds
//! fold missing values into their type default (see `CellValue::is_present`).

use crate::error::{FrameError, Result};
use std::fmt;

/// Canonical column type tag for frame blocks.
///
/// Uses `#[repr(u8)]` so the discriminant doubles as the single-byte wire
/// ordinal.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String = 0,
    Boolean = 1,
    Int = 2,
    Float = 3,
}

impl ValueKind {
    /// Returns the wire ordinal for this kind.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Returns the lowercase kind name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
        }
    }

    /// Returns the serialized payload size per cell, or None for
    /// variable-width kinds.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            ValueKind::String => None,
            ValueKind::Boolean => Some(1),
            ValueKind::Int => Some(8),
            ValueKind::Float => Some(8),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ValueKind {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ValueKind::String),
            1 => Ok(ValueKind::Boolean),
            2 => Ok(ValueKind::Int),
            3 => Ok(ValueKind::Float),
            _ => Err(FrameError::UnsupportedType(format!(
                "invalid value kind ordinal: {}",
                value
            ))),
        }
    }
}
