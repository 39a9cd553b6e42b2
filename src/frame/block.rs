//! # Frame Block Core
//!
//! `FrameBlock` is a columnar, heterogeneously-typed in-memory table
//! block: an ordered schema of value kinds, optional column names,
//! per-column metadata, and one typed column array per schema entry.
//!
//! ## Structure
//!
//! ```text
//! FrameBlock
//! ├── num_rows: usize            // authoritative logical row count
//! ├── schema:   Vec<ValueKind>   // ordered column kinds
//! ├── colnames: Option<Vec<String>>  // None => defaults "C1","C2",...
//! ├── colmeta:  Vec<ColumnMetadata>  // parallel to schema
//! ├── coldata:  Vec<ColumnArray>     // parallel to schema once allocated
//! └── recode-map cache (weak, per column)
//! ```
//!
//! ## Lifecycle
//!
//! A block moves through three phases: *empty* (no schema), *schema-only*
//! (schema set, no column storage), and *allocated*. `ensure_allocated`,
//! `append_column`, and `reset` drive the transitions; most range
//! operations produce a new block and leave the receiver untouched.
//!
//! ## Invariants
//!
//! After any public mutator returns: schema, metadata, and column arrays
//! (when allocated) have equal length; every column's logical length
//! equals `num_rows`; column names, when materialized, cover every column.
//!
//! ## Concurrency
//!
//! No internal locking beyond the recode-cache mutex. A block is safe for
//! concurrent read-only access, but not for mutation concurrent with any
//! other access, since structural mutators can replace column storage.

use crate::columns::ColumnArray;
use crate::error::{FrameError, Result};
use crate::frame::recode::RecodeMap;
use crate::types::{CellValue, ColumnMetadata, ValueKind};
use hashbrown::HashMap;
use parking_lot::Mutex;
use std::sync::Weak;

/// Returns the default name for a 0-based column index: `"C" + (index+1)`.
pub(crate) fn default_col_name(index: usize) -> String {
    format!("C{}", index + 1)
}

/// Columnar in-memory table block with exact binary serialization.
#[derive(Debug, Default)]
pub struct FrameBlock {
    pub(crate) num_rows: usize,
    pub(crate) schema: Vec<ValueKind>,
    pub(crate) colnames: Option<Vec<String>>,
    pub(crate) colmeta: Vec<ColumnMetadata>,
    pub(crate) coldata: Vec<ColumnArray>,
    pub(crate) rcd_map_cache: Mutex<HashMap<usize, Weak<RecodeMap>>>,
}

impl Clone for FrameBlock {
    /// Deep copy of schema, names, metadata, and column data. The recode
    /// cache starts empty in the copy and is rebuilt on demand.
    fn clone(&self) -> Self {
        Self {
            num_rows: self.num_rows,
            schema: self.schema.clone(),
            colnames: self.colnames.clone(),
            colmeta: self.colmeta.clone(),
            coldata: self.coldata.clone(),
            rcd_map_cache: Mutex::new(HashMap::new()),
        }
    }
}

impl PartialEq for FrameBlock {
    /// Structural equality over dimensions, schema, names, metadata, and
    /// cell data; the recode cache is transient and ignored. A schema-only
    /// block equals an allocated block holding no rows, so equality is
    /// insensitive to the allocation phase.
    fn eq(&self, other: &Self) -> bool {
        if self.num_rows != other.num_rows
            || self.schema != other.schema
            || self.colnames != other.colnames
            || self.colmeta != other.colmeta
        {
            return false;
        }
        if self.coldata.len() == other.coldata.len() {
            return self.coldata == other.coldata;
        }
        let allocated = if self.coldata.is_empty() {
            &other.coldata
        } else {
            &self.coldata
        };
        self.num_rows == 0 && allocated.iter().all(ColumnArray::is_empty)
    }
}

impl FrameBlock {
    /// Creates an empty block with no schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema-only block; columns materialize on first append or
    /// explicit allocation.
    pub fn with_schema(schema: Vec<ValueKind>) -> Self {
        let ncols = schema.len();
        Self {
            num_rows: 0,
            schema,
            colnames: None,
            colmeta: vec![ColumnMetadata::default(); ncols],
            coldata: Vec::new(),
            rcd_map_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a schema-only block with explicit column names.
    pub fn with_schema_and_names(schema: Vec<ValueKind>, names: Vec<String>) -> Result<Self> {
        if names.len() != schema.len() {
            return Err(FrameError::Dimension {
                op: "column names",
                expected: format!("{} names", schema.len()),
                found: format!("{} names", names.len()),
            });
        }
        let mut block = Self::with_schema(schema);
        block.colnames = Some(names);
        Ok(block)
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns, as defined by the schema.
    pub fn num_columns(&self) -> usize {
        self.schema.len()
    }

    /// The ordered column kinds.
    pub fn schema(&self) -> &[ValueKind] {
        &self.schema
    }

    /// Replaces the schema. Used when recycling a reset block for a new
    /// shape; does not touch existing column storage.
    pub fn set_schema(&mut self, schema: Vec<ValueKind>) {
        self.schema = schema;
    }

    /// Returns the column names, generating defaults where none are
    /// materialized.
    pub fn column_names(&self) -> Vec<String> {
        match &self.colnames {
            Some(names) => names.clone(),
            None => (0..self.num_columns()).map(default_col_name).collect(),
        }
    }

    /// Returns the materialized names, if any.
    pub fn column_names_raw(&self) -> Option<&[String]> {
        self.colnames.as_deref()
    }

    /// Returns the name of column `c` (default if not materialized).
    ///
    /// Panics if `c` is out of range.
    pub fn column_name(&self, c: usize) -> String {
        match &self.colnames {
            Some(names) => names[c].clone(),
            None => {
                assert!(c < self.num_columns());
                default_col_name(c)
            }
        }
    }

    /// Sets or clears the materialized column names.
    pub fn set_column_names(&mut self, names: Option<Vec<String>>) -> Result<()> {
        if let Some(names) = &names {
            if names.len() != self.num_columns() {
                return Err(FrameError::Dimension {
                    op: "column names",
                    expected: format!("{} names", self.num_columns()),
                    found: format!("{} names", names.len()),
                });
            }
        }
        self.colnames = names;
        Ok(())
    }

    pub(crate) fn materialize_column_names(&mut self) {
        if self.colnames.is_none() {
            self.colnames = Some((0..self.num_columns()).map(default_col_name).collect());
        }
    }

    /// True iff the column names are absent or all equal their defaults.
    pub fn is_column_names_default(&self) -> bool {
        match &self.colnames {
            None => true,
            Some(names) => names
                .iter()
                .enumerate()
                .all(|(j, name)| *name == default_col_name(j)),
        }
    }

    /// Metadata of column `c`.
    pub fn column_metadata(&self, c: usize) -> &ColumnMetadata {
        &self.colmeta[c]
    }

    /// Mutable metadata of column `c`.
    pub fn column_metadata_mut(&mut self, c: usize) -> &mut ColumnMetadata {
        &mut self.colmeta[c]
    }

    /// True iff column `c` carries only default metadata.
    pub fn is_column_metadata_default(&self, c: usize) -> bool {
        self.colmeta[c].is_default()
    }

    /// True iff every column carries only default metadata.
    pub fn is_metadata_default(&self) -> bool {
        self.colmeta.iter().all(ColumnMetadata::is_default)
    }

    /// The typed storage of column `c`, if allocated.
    pub fn column(&self, c: usize) -> Option<&ColumnArray> {
        self.coldata.get(c)
    }

    /// Maps column names to 1-based column ids.
    pub fn column_id_map(&self) -> HashMap<String, usize> {
        (0..self.num_columns())
            .map(|j| (self.column_name(j), j + 1))
            .collect()
    }

    /// Refreshes each column's distinct count from the data, counting
    /// non-missing cells.
    pub fn recompute_column_cardinality(&mut self) {
        for j in 0..self.coldata.len() {
            let card = (0..self.num_rows)
                .filter(|&i| !self.coldata[j].get(i).is_null())
                .count();
            self.colmeta[j].set_num_distinct(card as u64);
        }
    }

    /// True once column storage exists for every schema entry.
    pub(crate) fn is_allocated(&self) -> bool {
        !self.coldata.is_empty() && self.coldata.len() == self.schema.len()
    }

    /// Allocates one column array per schema entry, sized to `num_rows`
    /// default cells, if not already allocated. Resets metadata to
    /// defaults when the column count changed underneath it.
    pub fn ensure_allocated(&mut self, num_rows: usize) {
        if self.is_allocated() {
            return;
        }
        if self.colmeta.len() != self.schema.len() {
            self.colmeta = vec![ColumnMetadata::default(); self.schema.len()];
        }
        self.coldata = self
            .schema
            .iter()
            .map(|kind| ColumnArray::with_len(*kind, num_rows))
            .collect();
        self.num_rows = num_rows;
    }

    /// Checks that a new column of `new_len` cells matches the existing
    /// column length.
    pub(crate) fn ensure_column_compatibility(&self, new_len: usize) -> Result<()> {
        if !self.coldata.is_empty() && self.num_rows != new_len {
            return Err(FrameError::Dimension {
                op: "append column",
                expected: format!("{} rows", self.num_rows),
                found: format!("{} rows", new_len),
            });
        }
        Ok(())
    }

    fn check_cell(&self, op: &'static str, r: usize, c: usize) -> Result<()> {
        // a reset block can carry a row count with no column storage yet
        if r >= self.num_rows || c >= self.num_columns() || c >= self.coldata.len() {
            return Err(FrameError::Index {
                op,
                found: format!("[{},{}]", r, c),
                valid: format!("[0:{},0:{}]", self.num_rows.max(1) - 1, self.num_columns().max(1) - 1),
            });
        }
        Ok(())
    }

    /// Returns the boxed value at `(r, c)`.
    pub fn get(&self, r: usize, c: usize) -> Result<CellValue> {
        self.check_cell("get", r, c)?;
        Ok(self.coldata[c].get(r))
    }

    /// Sets the value at `(r, c)`, coercing it into the column's kind via
    /// the universal coercion rule.
    pub fn set(&mut self, r: usize, c: usize, value: &CellValue) -> Result<()> {
        self.check_cell("set", r, c)?;
        let coerced = value.coerce_to(self.schema[c])?;
        self.coldata[c].set(r, &coerced)
    }

    /// Appends one row of boxed values, one per column in lock-step,
    /// coercing each into its column's kind.
    pub fn append_row(&mut self, row: &[CellValue]) -> Result<()> {
        self.ensure_allocated(0);
        self.check_row_width(row.len())?;
        for (j, value) in row.iter().enumerate() {
            let coerced = value.coerce_to(self.schema[j])?;
            self.coldata[j].append_value(&coerced)?;
        }
        self.num_rows += 1;
        Ok(())
    }

    /// Appends one row of string-encoded values; each column parses its
    /// cell independently.
    pub fn append_row_strings(&mut self, row: &[Option<&str>]) -> Result<()> {
        self.ensure_allocated(0);
        self.check_row_width(row.len())?;
        for (j, value) in row.iter().enumerate() {
            self.coldata[j].append_str(*value)?;
        }
        self.num_rows += 1;
        Ok(())
    }

    fn check_row_width(&self, width: usize) -> Result<()> {
        if width != self.num_columns() {
            return Err(FrameError::Dimension {
                op: "append row",
                expected: format!("{} values", self.num_columns()),
                found: format!("{} values", width),
            });
        }
        Ok(())
    }

    /// Appends a new trailing column, inferring its kind from the array.
    /// Existing default names are materialized first so the new column
    /// slots in behind them; the column length must match existing
    /// columns.
    pub fn append_column(&mut self, col: ColumnArray) -> Result<()> {
        self.ensure_column_compatibility(col.len())?;
        if !self.schema.is_empty() && self.coldata.is_empty() {
            // schema-only block: materialize the declared columns first
            self.ensure_allocated(col.len());
        }
        self.materialize_column_names();
        if let Some(names) = &mut self.colnames {
            names.push(default_col_name(self.schema.len()));
        }
        self.schema.push(col.kind());
        self.colmeta.push(ColumnMetadata::default());
        self.num_rows = col.len();
        self.coldata.push(col);
        Ok(())
    }

    /// Logically resets the block for reuse. Column storage is resized to
    /// `num_rows` default-filled cells; with `clear_meta` the schema,
    /// names, non-default metadata, and column storage are dropped,
    /// returning the block to the empty phase.
    pub fn reset(&mut self, num_rows: usize, clear_meta: bool) {
        if clear_meta {
            self.schema.clear();
            self.colnames = None;
            for meta in &mut self.colmeta {
                if !meta.is_default() {
                    *meta = ColumnMetadata::default();
                }
            }
            self.coldata.clear();
        } else {
            for col in &mut self.coldata {
                col.resize(num_rows);
            }
        }
        self.num_rows = num_rows;
    }
}
