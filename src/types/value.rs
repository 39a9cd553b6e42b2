//! # Runtime Cell Values
//!
//! This module provides `CellValue`, the boxed runtime representation for a
//! single frame cell, together with the two rules every cross-column
//! operation relies on:
//!
//! 1. **Presence.** String cells are missing when null; boolean and numeric
//!    cells have no explicit null state and fold "missing" into the type
//!    default (`false` / `0` / `0.0`). `is_present` is the single predicate
//!    for this duality, used uniformly by merge and append paths.
//! 2. **Universal coercion.** Converting a value into another kind
//!    stringifies it and reparses with the target kind's string parser.
//!    There is exactly one conversion path and no per-type-pair special
//!    casing; anything the parser rejects is a `Parse` error.
//!
//! Parsing rules per kind: case-insensitive `true`/`false` literals for
//! Boolean, base-10 `i64` for Int, decimal `f64` for Float, and verbatim
//! text for String.

use crate::error::{FrameError, Result};
use crate::types::ValueKind;
use std::fmt;

/// Boxed runtime value for a single frame cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    String(String),
    Boolean(bool),
    Int(i64),
    Float(f64),
}

impl CellValue {
    /// Returns the kind a non-null value carries, or None for `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            CellValue::Null => None,
            CellValue::String(_) => Some(ValueKind::String),
            CellValue::Boolean(_) => Some(ValueKind::Boolean),
            CellValue::Int(_) => Some(ValueKind::Int),
            CellValue::Float(_) => Some(ValueKind::Float),
        }
    }

    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The single presence predicate shared by merge and append paths.
    ///
    /// Strings are present when non-null; booleans when true; numerics when
    /// non-zero. A cell that is not present holds its column's default and
    /// may be overwritten by a disjoint merge.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::String(_) => true,
            CellValue::Boolean(b) => *b,
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0,
        }
    }

    /// Parses a string-encoded value into the given kind.
    pub fn parse(kind: ValueKind, value: &str) -> Result<CellValue> {
        match kind {
            ValueKind::String => Ok(CellValue::String(value.to_owned())),
            ValueKind::Boolean => Ok(CellValue::Boolean(parse_bool(value)?)),
            ValueKind::Int => Ok(CellValue::Int(parse_int(value)?)),
            ValueKind::Float => Ok(CellValue::Float(parse_float(value)?)),
        }
    }

    /// Coerces this value into the target kind via the universal rule:
    /// null passes through, matching kinds pass through, everything else is
    /// stringified and reparsed.
    pub fn coerce_to(&self, kind: ValueKind) -> Result<CellValue> {
        match self {
            CellValue::Null => Ok(CellValue::Null),
            v if v.kind() == Some(kind) => Ok(v.clone()),
            v => CellValue::parse(kind, &v.to_string()),
        }
    }

    /// Returns the string encoding of this value, or None for null.
    pub fn to_optional_string(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            v => Some(v.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str(""),
            CellValue::String(s) => f.write_str(s),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Parses a case-insensitive boolean literal.
pub(crate) fn parse_bool(value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(FrameError::Parse {
            kind: ValueKind::Boolean.name(),
            value: value.to_owned(),
            reason: "expected 'true' or 'false'".to_owned(),
        })
    }
}

/// Parses a base-10 signed 64-bit integer.
pub(crate) fn parse_int(value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|e| FrameError::Parse {
        kind: ValueKind::Int.name(),
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses a decimal 64-bit float.
pub(crate) fn parse_float(value: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|e| FrameError::Parse {
        kind: ValueKind::Float.name(),
        value: value.to_owned(),
        reason: e.to_string(),
    })
}
