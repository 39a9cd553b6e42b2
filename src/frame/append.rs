//! # Concatenation and Merge
//!
//! Column-wise (`cbind`) and row-wise (`rbind`) concatenation, in-place
//! merge of disjointly populated blocks, and bulk copies from another
//! block. Concatenation produces a new block; merge and copy mutate the
//! receiver after validating dimensions.

use crate::columns::ColumnArray;
use crate::error::{FrameError, Result};
use crate::frame::FrameBlock;

/// Deep-cloned column storage, materializing default columns for a
/// schema-only block.
fn cloned_columns(block: &FrameBlock) -> Vec<ColumnArray> {
    if block.is_allocated() {
        block.coldata.clone()
    } else {
        block
            .schema
            .iter()
            .map(|kind| ColumnArray::with_len(*kind, block.num_rows))
            .collect()
    }
}

impl FrameBlock {
    /// Concatenates `self` and `other` into a new block.
    ///
    /// With `cbind`, the row counts must match and the result carries
    /// `self`'s columns followed by `other`'s, with names materialized on
    /// both sides. Without it, the column counts must match and every row
    /// of `other` is appended below `self`'s rows, coercing each value
    /// into the receiving column's kind; `self`'s names and metadata are
    /// kept.
    pub fn append(&self, other: &FrameBlock, cbind: bool) -> Result<FrameBlock> {
        if cbind {
            if self.num_rows != other.num_rows {
                return Err(FrameError::Dimension {
                    op: "cbind",
                    expected: format!("{} rows", self.num_rows),
                    found: format!("{} rows", other.num_rows),
                });
            }
            let mut ret =
                FrameBlock::with_schema([self.schema.clone(), other.schema.clone()].concat());
            ret.colnames = Some([self.column_names(), other.column_names()].concat());
            ret.colmeta = [self.colmeta.clone(), other.colmeta.clone()].concat();
            ret.coldata = [cloned_columns(self), cloned_columns(other)].concat();
            ret.num_rows = self.num_rows;
            Ok(ret)
        } else {
            if self.num_columns() != other.num_columns() {
                return Err(FrameError::Dimension {
                    op: "rbind",
                    expected: format!("{} columns", self.num_columns()),
                    found: format!("{} columns", other.num_columns()),
                });
            }
            let mut ret = self.clone();
            for row in other.value_rows() {
                ret.append_row(&row)?;
            }
            Ok(ret)
        }
    }

    /// Merges `other` into `self` cell-wise: a cell of `other` overwrites
    /// the corresponding cell of `self` only where it is present (non-null
    /// string, true boolean, non-zero numeric). Non-default column
    /// metadata of `other` is adopted. An empty `other` is a no-op.
    pub fn merge(&mut self, other: &FrameBlock) -> Result<()> {
        // a source without materialized columns carries no data
        if other.num_rows == 0 || (other.coldata.is_empty() && other.num_columns() > 0) {
            return Ok(());
        }
        if self.num_rows != other.num_rows || self.num_columns() != other.num_columns() {
            return Err(FrameError::Dimension {
                op: "merge",
                expected: format!("{}x{}", self.num_rows, self.num_columns()),
                found: format!("{}x{}", other.num_rows, other.num_columns()),
            });
        }
        self.ensure_allocated(self.num_rows);
        for j in 0..self.num_columns() {
            if !other.colmeta[j].is_default() {
                self.colmeta[j] = other.colmeta[j].clone();
            }
        }
        for j in 0..self.num_columns() {
            if self.schema[j] == other.schema[j] {
                self.coldata[j].merge_if_present(0, self.num_rows - 1, &other.coldata[j])?;
            } else {
                for i in 0..self.num_rows {
                    let value = other.coldata[j].get(i);
                    if value.is_present() {
                        self.set(i, j, &value)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Replaces `self` with a deep copy of `src`.
    pub fn copy(&mut self, src: &FrameBlock) {
        self.num_rows = src.num_rows;
        self.schema = src.schema.clone();
        self.colnames = src.colnames.clone();
        self.colmeta = src.colmeta.clone();
        self.coldata = src.coldata.clone();
    }

    /// Copies `src` into the closed window `[rl:ru, cl:cu]` of `self`,
    /// reading `src` from its origin. Columns of matching kind copy in
    /// bulk; mismatched kinds copy cell-wise with coercion. Allocates
    /// `self`'s columns if missing; an empty `src` is a no-op.
    pub fn copy_range(
        &mut self,
        rl: usize,
        ru: usize,
        cl: usize,
        cu: usize,
        src: &FrameBlock,
    ) -> Result<()> {
        if src.num_rows == 0 {
            return Ok(());
        }
        self.ensure_allocated(ru - rl + 1);
        self.check_block_range("copy range", rl, ru, cl, cu)?;
        if ru - rl + 1 > src.num_rows || cu - cl + 1 > src.num_columns() {
            return Err(FrameError::Dimension {
                op: "copy range",
                expected: format!("at least {}x{}", ru - rl + 1, cu - cl + 1),
                found: format!("{}x{}", src.num_rows, src.num_columns()),
            });
        }
        for j in cl..=cu {
            if self.schema[j] == src.schema[j - cl] {
                self.coldata[j].bulk_set(rl, ru, &src.coldata[j - cl], 0)?;
            } else {
                for r in rl..=ru {
                    self.set(r, j, &src.coldata[j - cl].get(r - rl))?;
                }
            }
        }
        Ok(())
    }
}
