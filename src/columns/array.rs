//! # Typed Column Arrays
//!
//! Resizable, type-homogeneous storage for one frame column. The four
//! concrete arrays sit behind the `ColumnArray` sum type so every dispatch
//! is an exhaustive match over the closed kind set.
//!
//! ## Growth
//!
//! Appends grow capacity by doubling with a floor of four slots
//! (`max(2 * capacity, 4)`), preserving existing contents. The logical
//! length always equals the number of populated cells; clones and slices
//! are trimmed to logical length.
//!
//! ## Presence
//!
//! `merge_if_present` overwrites a destination cell only where the source
//! cell is present: non-null for strings, `true` for booleans, non-zero for
//! numerics. This is the same predicate as `CellValue::is_present` and is
//! what makes disjointly populated arrays recombinable without clobbering.
//!
//! ## Bulk Copies
//!
//! `bulk_set` overwrites the closed range `[lo,hi]` from a source array of
//! the same kind. Ranges are bounds-checked on both sides (`Index` errors);
//! a source of a different kind is a caller contract violation
//! (`UnsupportedType`).

use crate::encoding::{ByteReader, ByteWriter};
use crate::error::{FrameError, Result};
use crate::types::{parse_bool, parse_float, parse_int, CellValue, ValueKind};

/// Doubles capacity with a floor of 4 before an append that would overflow.
fn grow_for_append<T>(data: &mut Vec<T>) {
    if data.len() == data.capacity() {
        let target = (data.capacity() * 2).max(4);
        data.reserve_exact(target - data.len());
    }
}

/// Validates a closed destination range against an array length.
fn check_range(op: &'static str, lo: usize, hi: usize, len: usize) -> Result<()> {
    if lo > hi || hi >= len {
        return Err(FrameError::Index {
            op,
            found: format!("[{}:{}]", lo, hi),
            valid: format!("[0:{}]", len.saturating_sub(1)),
        });
    }
    Ok(())
}

/// Validates that a source array covers `count` cells from `offset`.
fn check_src(op: &'static str, offset: usize, count: usize, len: usize) -> Result<()> {
    if offset + count > len {
        return Err(FrameError::Index {
            op,
            found: format!("[{}:{}]", offset, offset + count - 1),
            valid: format!("[0:{}]", len.saturating_sub(1)),
        });
    }
    Ok(())
}

/// Column storage for string cells; `None` is the explicit missing state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringArray {
    data: Vec<Option<String>>,
}

impl StringArray {
    fn with_len(len: usize) -> Self {
        Self {
            data: vec![None; len],
        }
    }

    fn append(&mut self, value: Option<String>) {
        grow_for_append(&mut self.data);
        self.data.push(value);
    }
}

/// Column storage for fixed-width cells (boolean, int, float). Missing
/// values fold into `T::default()`, which is also the presence boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveArray<T> {
    data: Vec<T>,
}

impl<T: Copy + Default + PartialEq> PrimitiveArray<T> {
    fn with_len(len: usize) -> Self {
        Self {
            data: vec![T::default(); len],
        }
    }

    fn append(&mut self, value: T) {
        grow_for_append(&mut self.data);
        self.data.push(value);
    }

    fn bulk_set(&mut self, lo: usize, hi: usize, src: &Self, src_offset: usize) -> Result<()> {
        let count = hi - lo + 1;
        self.data[lo..=hi].copy_from_slice(&src.data[src_offset..src_offset + count]);
        Ok(())
    }

    fn merge_if_present(&mut self, lo: usize, hi: usize, src: &Self) {
        for i in lo..=hi {
            if src.data[i] != T::default() {
                self.data[i] = src.data[i];
            }
        }
    }
}

/// One frame column: a typed array behind a closed, exhaustively matched
/// variant per value kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnArray {
    String(StringArray),
    Boolean(PrimitiveArray<bool>),
    Int(PrimitiveArray<i64>),
    Float(PrimitiveArray<f64>),
}

impl ColumnArray {
    /// Allocates a column of `len` default cells for the given kind.
    pub fn with_len(kind: ValueKind, len: usize) -> Self {
        match kind {
            ValueKind::String => ColumnArray::String(StringArray::with_len(len)),
            ValueKind::Boolean => ColumnArray::Boolean(PrimitiveArray::with_len(len)),
            ValueKind::Int => ColumnArray::Int(PrimitiveArray::with_len(len)),
            ValueKind::Float => ColumnArray::Float(PrimitiveArray::with_len(len)),
        }
    }

    pub fn from_strings(data: Vec<Option<String>>) -> Self {
        ColumnArray::String(StringArray { data })
    }

    pub fn from_bools(data: Vec<bool>) -> Self {
        ColumnArray::Boolean(PrimitiveArray { data })
    }

    pub fn from_ints(data: Vec<i64>) -> Self {
        ColumnArray::Int(PrimitiveArray { data })
    }

    pub fn from_floats(data: Vec<f64>) -> Self {
        ColumnArray::Float(PrimitiveArray { data })
    }

    /// The value kind stored by this column.
    pub fn kind(&self) -> ValueKind {
        match self {
            ColumnArray::String(_) => ValueKind::String,
            ColumnArray::Boolean(_) => ValueKind::Boolean,
            ColumnArray::Int(_) => ValueKind::Int,
            ColumnArray::Float(_) => ValueKind::Float,
        }
    }

    /// Logical number of cells.
    pub fn len(&self) -> usize {
        match self {
            ColumnArray::String(a) => a.data.len(),
            ColumnArray::Boolean(a) => a.data.len(),
            ColumnArray::Int(a) => a.data.len(),
            ColumnArray::Float(a) => a.data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cell at `index` as a boxed value.
    ///
    /// Panics if `index` is out of range; frame-level accessors validate
    /// bounds before delegating here.
    pub fn get(&self, index: usize) -> CellValue {
        match self {
            ColumnArray::String(a) => match &a.data[index] {
                Some(s) => CellValue::String(s.clone()),
                None => CellValue::Null,
            },
            ColumnArray::Boolean(a) => CellValue::Boolean(a.data[index]),
            ColumnArray::Int(a) => CellValue::Int(a.data[index]),
            ColumnArray::Float(a) => CellValue::Float(a.data[index]),
        }
    }

    /// Sets the cell at `index`. Null normalizes to the type default
    /// (strings keep the explicit missing state). The value's kind must
    /// match the column's kind; coercion happens at the frame level.
    pub fn set(&mut self, index: usize, value: &CellValue) -> Result<()> {
        if index >= self.len() {
            return Err(FrameError::Index {
                op: "column set",
                found: format!("[{}]", index),
                valid: format!("[0:{}]", self.len().saturating_sub(1)),
            });
        }
        match (self, value) {
            (ColumnArray::String(a), CellValue::String(s)) => a.data[index] = Some(s.clone()),
            (ColumnArray::String(a), CellValue::Null) => a.data[index] = None,
            (ColumnArray::Boolean(a), CellValue::Boolean(b)) => a.data[index] = *b,
            (ColumnArray::Boolean(a), CellValue::Null) => a.data[index] = false,
            (ColumnArray::Int(a), CellValue::Int(i)) => a.data[index] = *i,
            (ColumnArray::Int(a), CellValue::Null) => a.data[index] = 0,
            (ColumnArray::Float(a), CellValue::Float(f)) => a.data[index] = *f,
            (ColumnArray::Float(a), CellValue::Null) => a.data[index] = 0.0,
            (col, v) => {
                return Err(FrameError::UnsupportedType(format!(
                    "cannot store {:?} in a {} column",
                    v,
                    col.kind()
                )))
            }
        }
        Ok(())
    }

    /// Appends a string-encoded cell, parsing per the column kind. `None`
    /// appends the type default.
    pub fn append_str(&mut self, value: Option<&str>) -> Result<()> {
        match self {
            ColumnArray::String(a) => a.append(value.map(str::to_owned)),
            ColumnArray::Boolean(a) => {
                let parsed = value.map(parse_bool).transpose()?.unwrap_or_default();
                a.append(parsed);
            }
            ColumnArray::Int(a) => {
                let parsed = value.map(parse_int).transpose()?.unwrap_or_default();
                a.append(parsed);
            }
            ColumnArray::Float(a) => {
                let parsed = value.map(parse_float).transpose()?.unwrap_or_default();
                a.append(parsed);
            }
        }
        Ok(())
    }

    /// Appends a native cell without parsing. The value's kind must match;
    /// null appends the type default.
    pub fn append_value(&mut self, value: &CellValue) -> Result<()> {
        match (self, value) {
            (ColumnArray::String(a), CellValue::String(s)) => a.append(Some(s.clone())),
            (ColumnArray::String(a), CellValue::Null) => a.append(None),
            (ColumnArray::Boolean(a), CellValue::Boolean(b)) => a.append(*b),
            (ColumnArray::Boolean(a), CellValue::Null) => a.append(false),
            (ColumnArray::Int(a), CellValue::Int(i)) => a.append(*i),
            (ColumnArray::Int(a), CellValue::Null) => a.append(0),
            (ColumnArray::Float(a), CellValue::Float(f)) => a.append(*f),
            (ColumnArray::Float(a), CellValue::Null) => a.append(0.0),
            (col, v) => {
                return Err(FrameError::UnsupportedType(format!(
                    "cannot append {:?} to a {} column",
                    v,
                    col.kind()
                )))
            }
        }
        Ok(())
    }

    /// Overwrites the closed range `[lo,hi]` from `src`, reading `src`
    /// starting at `src_offset`. Both sides are bounds-checked.
    pub fn bulk_set(
        &mut self,
        lo: usize,
        hi: usize,
        src: &ColumnArray,
        src_offset: usize,
    ) -> Result<()> {
        check_range("bulk_set", lo, hi, self.len())?;
        check_src("bulk_set source", src_offset, hi - lo + 1, src.len())?;
        match (self, src) {
            (ColumnArray::String(a), ColumnArray::String(b)) => {
                let count = hi - lo + 1;
                a.data[lo..=hi].clone_from_slice(&b.data[src_offset..src_offset + count]);
                Ok(())
            }
            (ColumnArray::Boolean(a), ColumnArray::Boolean(b)) => a.bulk_set(lo, hi, b, src_offset),
            (ColumnArray::Int(a), ColumnArray::Int(b)) => a.bulk_set(lo, hi, b, src_offset),
            (ColumnArray::Float(a), ColumnArray::Float(b)) => a.bulk_set(lo, hi, b, src_offset),
            (a, b) => Err(FrameError::UnsupportedType(format!(
                "bulk copy between {} and {} columns",
                a.kind(),
                b.kind()
            ))),
        }
    }

    /// Overwrites cell i in `[lo,hi]` only where `src[i]` is present,
    /// combining two disjointly populated arrays.
    pub fn merge_if_present(&mut self, lo: usize, hi: usize, src: &ColumnArray) -> Result<()> {
        check_range("merge_if_present", lo, hi, self.len())?;
        check_src("merge_if_present source", lo, hi - lo + 1, src.len())?;
        match (self, src) {
            (ColumnArray::String(a), ColumnArray::String(b)) => {
                for i in lo..=hi {
                    if b.data[i].is_some() {
                        a.data[i] = b.data[i].clone();
                    }
                }
                Ok(())
            }
            (ColumnArray::Boolean(a), ColumnArray::Boolean(b)) => {
                a.merge_if_present(lo, hi, b);
                Ok(())
            }
            (ColumnArray::Int(a), ColumnArray::Int(b)) => {
                a.merge_if_present(lo, hi, b);
                Ok(())
            }
            (ColumnArray::Float(a), ColumnArray::Float(b)) => {
                a.merge_if_present(lo, hi, b);
                Ok(())
            }
            (a, b) => Err(FrameError::UnsupportedType(format!(
                "merge between {} and {} columns",
                a.kind(),
                b.kind()
            ))),
        }
    }

    /// Returns a new independent array over the closed range `[lo,hi]`.
    pub fn slice(&self, lo: usize, hi: usize) -> Result<ColumnArray> {
        check_range("column slice", lo, hi, self.len())?;
        Ok(match self {
            ColumnArray::String(a) => ColumnArray::from_strings(a.data[lo..=hi].to_vec()),
            ColumnArray::Boolean(a) => ColumnArray::from_bools(a.data[lo..=hi].to_vec()),
            ColumnArray::Int(a) => ColumnArray::from_ints(a.data[lo..=hi].to_vec()),
            ColumnArray::Float(a) => ColumnArray::from_floats(a.data[lo..=hi].to_vec()),
        })
    }

    /// Logically resizes to `len` cells, filling with type defaults.
    pub(crate) fn resize(&mut self, len: usize) {
        match self {
            ColumnArray::String(a) => a.data.resize(len, None),
            ColumnArray::Boolean(a) => a.data.resize(len, false),
            ColumnArray::Int(a) => a.data.resize(len, 0),
            ColumnArray::Float(a) => a.data.resize(len, 0.0),
        }
    }

    /// Releases excess capacity.
    pub(crate) fn shrink_to_fit(&mut self) {
        match self {
            ColumnArray::String(a) => a.data.shrink_to_fit(),
            ColumnArray::Boolean(a) => a.data.shrink_to_fit(),
            ColumnArray::Int(a) => a.data.shrink_to_fit(),
            ColumnArray::Float(a) => a.data.shrink_to_fit(),
        }
    }

    /// Writes the column payload: one cell after another, no count prefix.
    /// Null strings are written as the empty string.
    pub(crate) fn write_payload(&self, w: &mut ByteWriter) -> Result<()> {
        match self {
            ColumnArray::String(a) => {
                for cell in &a.data {
                    w.write_utf(cell.as_deref().unwrap_or(""))?;
                }
            }
            ColumnArray::Boolean(a) => {
                for cell in &a.data {
                    w.write_bool(*cell);
                }
            }
            ColumnArray::Int(a) => {
                for cell in &a.data {
                    w.write_i64(*cell);
                }
            }
            ColumnArray::Float(a) => {
                for cell in &a.data {
                    w.write_f64(*cell);
                }
            }
        }
        Ok(())
    }

    /// Reads a column payload of `num_rows` cells; the row count comes from
    /// the frame header. Empty strings decode to null.
    pub(crate) fn read_payload(
        kind: ValueKind,
        num_rows: usize,
        r: &mut ByteReader<'_>,
    ) -> Result<ColumnArray> {
        Ok(match kind {
            ValueKind::String => {
                let mut data = Vec::with_capacity(num_rows);
                for _ in 0..num_rows {
                    let s = r.read_utf()?;
                    data.push(if s.is_empty() { None } else { Some(s) });
                }
                ColumnArray::from_strings(data)
            }
            ValueKind::Boolean => {
                let mut data = Vec::with_capacity(num_rows);
                for _ in 0..num_rows {
                    data.push(r.read_bool()?);
                }
                ColumnArray::from_bools(data)
            }
            ValueKind::Int => {
                let mut data = Vec::with_capacity(num_rows);
                for _ in 0..num_rows {
                    data.push(r.read_i64()?);
                }
                ColumnArray::from_ints(data)
            }
            ValueKind::Float => {
                let mut data = Vec::with_capacity(num_rows);
                for _ in 0..num_rows {
                    data.push(r.read_f64()?);
                }
                ColumnArray::from_floats(data)
            }
        })
    }

    /// Heap bytes held by the cell payload (estimate, for cache accounting).
    pub(crate) fn in_memory_size(&self) -> usize {
        match self {
            ColumnArray::String(a) => {
                a.data.capacity() * std::mem::size_of::<Option<String>>()
                    + a.data
                        .iter()
                        .map(|s| s.as_ref().map_or(0, |s| s.capacity()))
                        .sum::<usize>()
            }
            ColumnArray::Boolean(a) => a.data.capacity(),
            ColumnArray::Int(a) => a.data.capacity() * 8,
            ColumnArray::Float(a) => a.data.capacity() * 8,
        }
    }

    /// Exact serialized payload size in bytes.
    pub(crate) fn serialized_size(&self) -> usize {
        match self {
            ColumnArray::String(a) => a
                .data
                .iter()
                .map(|s| crate::encoding::utf_size(s.as_deref().unwrap_or("")))
                .sum(),
            ColumnArray::Boolean(a) => a.data.len(),
            ColumnArray::Int(a) => a.data.len() * 8,
            ColumnArray::Float(a) => a.data.len() * 8,
        }
    }
}
