//! # Row Iterators
//!
//! Row-major traversal over a column-major block, in two flavors: string
//! rows (every cell rendered through its string form, null as `None`) and
//! boxed value rows. Both gather one row at a time into a small inline
//! buffer; blocks up to eight columns allocate nothing per row.
//!
//! Iterators snapshot nothing: they read the live block, so the block
//! must not be mutated while an iterator is outstanding (the borrow
//! checker enforces this).

use crate::error::Result;
use crate::frame::FrameBlock;
use crate::types::CellValue;
use smallvec::SmallVec;

/// One row rendered as strings; `None` marks a missing string cell.
pub type StringRow = SmallVec<[Option<String>; 8]>;

/// One row of boxed values.
pub type ValueRow = SmallVec<[CellValue; 8]>;

/// Iterator over `[pos, end)` yielding [`StringRow`]s.
pub struct StringRowIter<'a> {
    frame: &'a FrameBlock,
    pos: usize,
    end: usize,
}

impl Iterator for StringRowIter<'_> {
    type Item = StringRow;

    fn next(&mut self) -> Option<StringRow> {
        if self.pos >= self.end {
            return None;
        }
        let row = (0..self.frame.num_columns())
            .map(|j| self.frame.coldata[j].get(self.pos).to_optional_string())
            .collect();
        self.pos += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }
}

impl ExactSizeIterator for StringRowIter<'_> {}

/// Iterator over `[pos, end)` yielding [`ValueRow`]s.
pub struct ValueRowIter<'a> {
    frame: &'a FrameBlock,
    pos: usize,
    end: usize,
}

impl Iterator for ValueRowIter<'_> {
    type Item = ValueRow;

    fn next(&mut self) -> Option<ValueRow> {
        if self.pos >= self.end {
            return None;
        }
        let row = (0..self.frame.num_columns())
            .map(|j| self.frame.coldata[j].get(self.pos))
            .collect();
        self.pos += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ValueRowIter<'_> {}

impl FrameBlock {
    /// True when the block carries a row count without column storage
    /// (possible after `reset` on a never-allocated block); such rows hold
    /// no data to iterate.
    fn rows_lack_storage(&self) -> bool {
        self.coldata.len() < self.num_columns()
    }

    fn check_row_window(&self, op: &'static str, rl: usize, ru: usize) -> Result<()> {
        if rl > ru || ru > self.num_rows || (ru > rl && self.rows_lack_storage()) {
            return Err(crate::error::FrameError::Index {
                op,
                found: format!("[{}:{})", rl, ru),
                valid: format!("[0:{})", self.num_rows),
            });
        }
        Ok(())
    }

    /// Iterates all rows as string rows.
    pub fn string_rows(&self) -> StringRowIter<'_> {
        StringRowIter {
            frame: self,
            pos: 0,
            end: if self.rows_lack_storage() { 0 } else { self.num_rows },
        }
    }

    /// Iterates the half-open row window `[rl, ru)` as string rows.
    pub fn string_rows_range(&self, rl: usize, ru: usize) -> Result<StringRowIter<'_>> {
        self.check_row_window("string row iterator", rl, ru)?;
        Ok(StringRowIter {
            frame: self,
            pos: rl,
            end: ru,
        })
    }

    /// Iterates all rows as boxed value rows.
    pub fn value_rows(&self) -> ValueRowIter<'_> {
        ValueRowIter {
            frame: self,
            pos: 0,
            end: if self.rows_lack_storage() { 0 } else { self.num_rows },
        }
    }

    /// Iterates the half-open row window `[rl, ru)` as boxed value rows.
    pub fn value_rows_range(&self, rl: usize, ru: usize) -> Result<ValueRowIter<'_>> {
        self.check_row_window("value row iterator", rl, ru)?;
        Ok(ValueRowIter {
            frame: self,
            pos: rl,
            end: ru,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;

    fn sample() -> FrameBlock {
        let mut block = FrameBlock::with_schema(vec![ValueKind::String, ValueKind::Int]);
        block.append_row_strings(&[Some("a"), Some("1")]).unwrap();
        block.append_row_strings(&[None, Some("2")]).unwrap();
        block.append_row_strings(&[Some("c"), Some("3")]).unwrap();
        block
    }

    #[test]
    fn string_rows_render_null_as_none() {
        let block = sample();
        let rows: Vec<StringRow> = block.string_rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].as_slice(), &[Some("a".into()), Some("1".into())]);
        assert_eq!(rows[1].as_slice(), &[None, Some("2".into())]);
    }

    #[test]
    fn value_rows_yield_boxed_cells() {
        let block = sample();
        let rows: Vec<ValueRow> = block.value_rows().collect();
        assert_eq!(rows[1].as_slice(), &[CellValue::Null, CellValue::Int(2)]);
        assert_eq!(rows[2][1], CellValue::Int(3));
    }

    #[test]
    fn range_iterators_are_half_open() {
        let block = sample();
        let rows: Vec<ValueRow> = block.value_rows_range(1, 3).unwrap().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], CellValue::Int(2));

        assert!(block.value_rows_range(2, 1).is_err());
        assert!(block.string_rows_range(0, 4).is_err());
        assert_eq!(block.string_rows_range(3, 3).unwrap().count(), 0);
    }

    #[test]
    fn rows_without_storage_yield_nothing() {
        let mut block = FrameBlock::with_schema(vec![ValueKind::Int]);
        block.reset(2, false);
        assert_eq!(block.value_rows().count(), 0);
        assert_eq!(block.string_rows().count(), 0);
        assert!(block.value_rows_range(0, 2).is_err());
        assert_eq!(block.string_rows_range(1, 1).unwrap().count(), 0);
    }

    #[test]
    fn size_hint_is_exact() {
        let block = sample();
        let mut iter = block.value_rows();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }
}
