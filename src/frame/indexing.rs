//! # Range Indexing
//!
//! Rectangular read and write operations over closed, 0-based index
//! ranges: `slice` copies a window out, `left_index` overlays a block
//! onto a window of a copy, `split_rows` routes a window's rows across a
//! cut point, and `zero_out` assembles the kept complement of a window
//! into a destination block.
//!
//! All bounds are validated before any mutation; the receiving block is
//! never modified in place.

use crate::columns::ColumnArray;
use crate::error::{FrameError, Result};
use crate::frame::FrameBlock;
use crate::types::{CellValue, IndexRange};

impl FrameBlock {
    pub(crate) fn check_block_range(
        &self,
        op: &'static str,
        rl: usize,
        ru: usize,
        cl: usize,
        cu: usize,
    ) -> Result<()> {
        // the storage check catches a reset block that carries a row count
        // without column arrays
        if rl > ru
            || cl > cu
            || ru >= self.num_rows
            || cu >= self.num_columns()
            || cu >= self.coldata.len()
        {
            return Err(FrameError::Index {
                op,
                found: format!("[{}:{},{}:{}]", rl, ru, cl, cu),
                valid: format!(
                    "[0:{},0:{}]",
                    self.num_rows.max(1) - 1,
                    self.num_columns().max(1) - 1
                ),
            });
        }
        Ok(())
    }

    /// Copies the closed window `[rl:ru, cl:cu]` into a new block.
    ///
    /// The result carries the window's schema slice and a deep copy of the
    /// window's metadata. Names are copied only when the source carries
    /// non-default names; a default-named source yields a default-named
    /// slice.
    pub fn slice(&self, rl: usize, ru: usize, cl: usize, cu: usize) -> Result<FrameBlock> {
        self.check_block_range("slice", rl, ru, cl, cu)?;
        let mut ret = FrameBlock::with_schema(self.schema[cl..=cu].to_vec());
        ret.colmeta = self.colmeta[cl..=cu].to_vec();
        if !self.is_column_names_default() {
            let names = self.column_names();
            ret.colnames = Some(names[cl..=cu].to_vec());
        }
        ret.coldata = self.coldata[cl..=cu]
            .iter()
            .map(|col| col.slice(rl, ru))
            .collect::<Result<Vec<ColumnArray>>>()?;
        ret.num_rows = ru - rl + 1;
        Ok(ret)
    }

    /// Returns a copy of `self` with `rhs` written over the closed window
    /// `[rl:ru, cl:cu]`. The window must lie within `self` and `rhs` must
    /// not exceed it; a smaller source overlays only its own extent,
    /// anchored at the window origin. Mismatched column kinds fail the
    /// bulk copy.
    pub fn left_index(
        &self,
        rhs: &FrameBlock,
        rl: usize,
        ru: usize,
        cl: usize,
        cu: usize,
    ) -> Result<FrameBlock> {
        self.check_block_range("left indexing", rl, ru, cl, cu)?;
        let (rows, cols) = (ru - rl + 1, cu - cl + 1);
        if rhs.num_rows > rows || rhs.num_columns() > cols {
            return Err(FrameError::Dimension {
                op: "left indexing",
                expected: format!("at most {}x{} block", rows, cols),
                found: format!("{}x{} block", rhs.num_rows, rhs.num_columns()),
            });
        }
        let mut ret = self.clone();
        if rhs.num_rows > 0 {
            for j in cl..cl + rhs.num_columns() {
                ret.coldata[j].bulk_set(rl, rl + rhs.num_rows - 1, &rhs.coldata[j - cl], 0)?;
            }
        }
        Ok(ret)
    }

    /// Routes the rows of the window `range` into `top` (rows below
    /// `row_cut`) and `bottom` (rows at or above it), appending row by row
    /// and keeping only the window's columns. A side that receives no rows
    /// may be absent; a missing side that is needed is an error.
    pub fn split_rows(
        &self,
        range: &IndexRange,
        row_cut: usize,
        mut top: Option<&mut FrameBlock>,
        mut bottom: Option<&mut FrameBlock>,
    ) -> Result<()> {
        self.check_block_range(
            "split rows",
            range.row_start,
            range.row_end,
            range.col_start,
            range.col_end,
        )?;
        let mut row: Vec<CellValue> = Vec::with_capacity(range.cols());
        for r in range.row_start..=range.row_end {
            let dest = if r < row_cut {
                top.as_deref_mut()
            } else {
                bottom.as_deref_mut()
            };
            let dest = dest.ok_or_else(|| FrameError::Dimension {
                op: "split rows",
                expected: "a destination block".to_string(),
                found: format!("none for row {}", r),
            })?;
            row.clear();
            for c in range.col_start..=range.col_end {
                row.push(self.coldata[c].get(r));
            }
            dest.append_row(&row)?;
        }
        Ok(())
    }

    /// Copies everything outside the window `range` into `dest` (or, with
    /// `complementary`, only the window itself), shifting rows by the
    /// source and destination offsets. `dest` is reset to `self`'s schema
    /// and reallocated to `block_row_count` rows; at most
    /// `max_rows_to_copy` destination rows are filled.
    #[allow(clippy::too_many_arguments)]
    pub fn zero_out(
        &self,
        dest: Option<FrameBlock>,
        range: &IndexRange,
        complementary: bool,
        src_row_offset: usize,
        dest_row_offset: usize,
        block_row_count: usize,
        max_rows_to_copy: usize,
    ) -> Result<FrameBlock> {
        let mut result = match dest {
            Some(mut block) => {
                block.reset(0, true);
                block.set_schema(self.schema.clone());
                block
            }
            None => FrameBlock::with_schema(self.schema.clone()),
        };
        result.ensure_allocated(block_row_count);

        if complementary {
            let mut r = range.row_start;
            while r <= range.row_end && r + dest_row_offset < block_row_count {
                for c in range.col_start..=range.col_end {
                    result.set(r + dest_row_offset, c, &self.get(r + src_row_offset, c)?)?;
                }
                r += 1;
            }
            return Ok(result);
        }

        // destination row r reads source row r - dest_offset + src_offset
        let src_row = |r: usize| r - dest_row_offset + src_row_offset;
        let mut r = dest_row_offset;
        while r < range.row_start && r - dest_row_offset < max_rows_to_copy {
            for c in 0..self.num_columns() {
                result.set(r, c, &self.get(src_row(r), c)?)?;
            }
            r += 1;
        }
        while r <= range.row_end && r - dest_row_offset < max_rows_to_copy {
            for c in 0..range.col_start {
                result.set(r, c, &self.get(src_row(r), c)?)?;
            }
            for c in range.col_end + 1..self.num_columns() {
                result.set(r, c, &self.get(src_row(r), c)?)?;
            }
            r += 1;
        }
        while r - dest_row_offset < max_rows_to_copy {
            for c in 0..self.num_columns() {
                result.set(r, c, &self.get(src_row(r), c)?)?;
            }
            r += 1;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;

    fn sample() -> FrameBlock {
        let mut block =
            FrameBlock::with_schema(vec![ValueKind::String, ValueKind::Int, ValueKind::Float]);
        block
            .append_row_strings(&[Some("a"), Some("1"), Some("1.5")])
            .unwrap();
        block
            .append_row_strings(&[Some("b"), Some("2"), Some("2.5")])
            .unwrap();
        block
            .append_row_strings(&[Some("c"), Some("3"), Some("3.5")])
            .unwrap();
        block
    }

    #[test]
    fn slice_copies_window_and_metadata() {
        let mut block = sample();
        block.column_metadata_mut(1).set_num_distinct(3);
        let sub = block.slice(1, 2, 1, 2).unwrap();
        assert_eq!(sub.num_rows(), 2);
        assert_eq!(sub.schema(), &[ValueKind::Int, ValueKind::Float]);
        assert_eq!(sub.get(0, 0).unwrap(), CellValue::Int(2));
        assert_eq!(sub.get(1, 1).unwrap(), CellValue::Float(3.5));
        assert_eq!(sub.column_metadata(0).num_distinct(), 3);
        // default names stay default, not copied as "C2","C3"
        assert!(sub.column_names_raw().is_none());
        assert_eq!(sub.column_names(), vec!["C1", "C2"]);
    }

    #[test]
    fn slice_carries_explicit_names() {
        let mut block = sample();
        block
            .set_column_names(Some(vec!["x".into(), "y".into(), "z".into()]))
            .unwrap();
        let sub = block.slice(0, 0, 1, 2).unwrap();
        assert_eq!(sub.column_names(), vec!["y", "z"]);
    }

    #[test]
    fn slice_is_independent_of_source() {
        let block = sample();
        let mut sub = block.slice(0, 1, 0, 0).unwrap();
        sub.set(0, 0, &CellValue::String("zzz".into())).unwrap();
        assert_eq!(block.get(0, 0).unwrap(), CellValue::String("a".into()));
    }

    #[test]
    fn slice_rejects_bad_ranges() {
        let block = sample();
        for (rl, ru, cl, cu) in [(2, 1, 0, 0), (0, 3, 0, 0), (0, 0, 2, 1), (0, 0, 0, 3)] {
            assert!(matches!(
                block.slice(rl, ru, cl, cu).unwrap_err(),
                FrameError::Index { .. }
            ));
        }
    }

    #[test]
    fn left_index_overlays_window_on_copy() {
        let block = sample();
        let mut rhs = FrameBlock::with_schema(vec![ValueKind::Int, ValueKind::Float]);
        rhs.append_row_strings(&[Some("9"), Some("9.5")]).unwrap();
        rhs.append_row_strings(&[Some("8"), Some("8.5")]).unwrap();

        let out = block.left_index(&rhs, 1, 2, 1, 2).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), CellValue::Int(9));
        assert_eq!(out.get(2, 2).unwrap(), CellValue::Float(8.5));
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Int(1));
        // receiver untouched
        assert_eq!(block.get(1, 1).unwrap(), CellValue::Int(2));
    }

    #[test]
    fn left_index_allows_smaller_rhs_and_rejects_oversized() {
        let block = sample();
        let mut rhs = FrameBlock::with_schema(vec![ValueKind::Int]);
        rhs.append_row_strings(&[Some("9")]).unwrap();

        // a one-row source over a two-row window overlays only its own row
        let out = block.left_index(&rhs, 0, 1, 1, 1).unwrap();
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Int(9));
        assert_eq!(out.get(1, 1).unwrap(), CellValue::Int(2));

        // an oversized source cannot fit the window
        rhs.append_row_strings(&[Some("8")]).unwrap();
        rhs.append_row_strings(&[Some("7")]).unwrap();
        assert!(matches!(
            block.left_index(&rhs, 0, 1, 1, 1).unwrap_err(),
            FrameError::Dimension { .. }
        ));

        // same shape, wrong kind
        let mut bad = FrameBlock::with_schema(vec![ValueKind::String]);
        bad.append_row_strings(&[Some("9")]).unwrap();
        bad.append_row_strings(&[Some("8")]).unwrap();
        assert!(matches!(
            block.left_index(&bad, 0, 1, 1, 1).unwrap_err(),
            FrameError::UnsupportedType(_)
        ));
    }

    #[test]
    fn split_rows_routes_across_the_cut() {
        let block = sample();
        let mut top = FrameBlock::with_schema(vec![ValueKind::String, ValueKind::Int]);
        let mut bottom = FrameBlock::with_schema(vec![ValueKind::String, ValueKind::Int]);
        block
            .split_rows(
                &IndexRange::new(0, 2, 0, 1),
                2,
                Some(&mut top),
                Some(&mut bottom),
            )
            .unwrap();
        assert_eq!(top.num_rows(), 2);
        assert_eq!(bottom.num_rows(), 1);
        assert_eq!(bottom.get(0, 0).unwrap(), CellValue::String("c".into()));
        assert_eq!(top.get(1, 1).unwrap(), CellValue::Int(2));
    }

    #[test]
    fn split_rows_requires_a_destination_for_routed_rows() {
        let block = sample();
        let mut top = FrameBlock::with_schema(vec![ValueKind::String]);
        let err = block
            .split_rows(&IndexRange::new(0, 2, 0, 0), 2, Some(&mut top), None)
            .unwrap_err();
        assert!(matches!(err, FrameError::Dimension { .. }));
    }

    #[test]
    fn zero_out_keeps_the_complement_of_the_window() {
        let block = sample();
        // carve out rows 1..=1, cols 1..=1; keep everything else
        let out = block
            .zero_out(None, &IndexRange::new(1, 1, 1, 1), false, 0, 0, 3, 3)
            .unwrap();
        assert_eq!(out.num_rows(), 3);
        // row 0 copied in full
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Int(1));
        // the window itself stays at the column default
        assert_eq!(out.get(1, 1).unwrap(), CellValue::Int(0));
        // columns outside the window copied even on window rows
        assert_eq!(out.get(1, 0).unwrap(), CellValue::String("b".into()));
        assert_eq!(out.get(1, 2).unwrap(), CellValue::Float(2.5));
        // rows past the window copied in full
        assert_eq!(out.get(2, 1).unwrap(), CellValue::Int(3));
    }

    #[test]
    fn zero_out_complementary_copies_only_the_window() {
        let block = sample();
        let out = block
            .zero_out(None, &IndexRange::new(1, 2, 1, 2), true, 0, 0, 3, 3)
            .unwrap();
        assert_eq!(out.get(1, 1).unwrap(), CellValue::Int(2));
        assert_eq!(out.get(2, 2).unwrap(), CellValue::Float(3.5));
        // outside the window stays default
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Int(0));
        assert_eq!(out.get(1, 0).unwrap(), CellValue::Null);
    }

    #[test]
    fn zero_out_honors_offsets_and_row_budget() {
        let block = sample();
        // copy at most one destination row, shifted down by one
        let out = block
            .zero_out(None, &IndexRange::new(2, 2, 0, 0), false, 0, 1, 3, 1)
            .unwrap();
        assert_eq!(out.get(1, 1).unwrap(), CellValue::Int(1));
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Int(0));
        assert_eq!(out.get(2, 1).unwrap(), CellValue::Int(0));
    }

    #[test]
    fn zero_out_reads_through_a_source_offset() {
        let block = sample();
        // carve out cell (0,0); source rows shifted down by one
        let out = block
            .zero_out(None, &IndexRange::new(0, 0, 0, 0), false, 1, 0, 2, 2)
            .unwrap();
        // the window cell stays default; its row reads source row 1
        assert_eq!(out.get(0, 0).unwrap(), CellValue::Null);
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Int(2));
        assert_eq!(out.get(0, 2).unwrap(), CellValue::Float(2.5));
        // rows past the window read the shifted source rows in full
        assert_eq!(out.get(1, 0).unwrap(), CellValue::String("c".into()));
        assert_eq!(out.get(1, 1).unwrap(), CellValue::Int(3));
    }

    #[test]
    fn zero_out_complementary_with_offsets_stops_at_block_end() {
        let block = sample();
        // two-row window shifted down by one in a two-row destination:
        // only the first window row fits before the block end
        let out = block
            .zero_out(None, &IndexRange::new(0, 1, 0, 2), true, 1, 1, 2, 2)
            .unwrap();
        assert_eq!(out.num_rows(), 2);
        assert_eq!(out.get(1, 0).unwrap(), CellValue::String("b".into()));
        assert_eq!(out.get(1, 1).unwrap(), CellValue::Int(2));
        assert_eq!(out.get(1, 2).unwrap(), CellValue::Float(2.5));
        // nothing lands on row 0, and the second window row is cut off
        assert_eq!(out.get(0, 0).unwrap(), CellValue::Null);
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Int(0));
    }

    #[test]
    fn range_ops_on_unallocated_storage_fail_with_index() {
        let mut block = FrameBlock::with_schema(vec![ValueKind::Int]);
        block.reset(2, false);
        assert!(matches!(
            block.slice(0, 1, 0, 0).unwrap_err(),
            FrameError::Index { .. }
        ));
        let mut dest = FrameBlock::with_schema(vec![ValueKind::Int]);
        assert!(matches!(
            block
                .split_rows(&IndexRange::new(0, 1, 0, 0), 2, Some(&mut dest), None)
                .unwrap_err(),
            FrameError::Index { .. }
        ));
    }

    #[test]
    fn zero_out_recycles_a_destination_block() {
        let block = sample();
        let mut stale = FrameBlock::with_schema(vec![ValueKind::Boolean]);
        stale.append_row_strings(&[Some("true")]).unwrap();
        let out = block
            .zero_out(
                Some(stale),
                &IndexRange::new(0, 0, 0, 2),
                true,
                0,
                0,
                3,
                3,
            )
            .unwrap();
        assert_eq!(out.schema(), block.schema());
        assert_eq!(out.num_rows(), 3);
        assert_eq!(out.get(0, 0).unwrap(), CellValue::String("a".into()));
    }
}
