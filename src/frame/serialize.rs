//! # Frame Wire Format
//!
//! Exact binary serialization of a frame block. All multi-byte values are
//! big-endian; strings use the 2-byte length-prefixed `utf` encoding.
//!
//! ## Layout
//!
//! ```text
//! header:      [i32 num_rows][i32 num_cols][u8 default_meta]
//! per column:  [u8 kind]
//!              if !default_meta:
//!                [utf name][i64 num_distinct][utf mv_value | ""]
//!              payload (see column codec):
//!                string:  num_rows x utf   (null <-> "")
//!                boolean: num_rows x 1 byte
//!                int:     num_rows x i64
//!                float:   num_rows x f64
//! ```
//!
//! `default_meta` is 1 when the names are default and every column's
//! metadata is default; names and metadata are then elided entirely and
//! reconstructed as defaults on read. An absent missing-value marker is
//! written as the empty string.

use crate::cache::CacheBlock;
use crate::columns::ColumnArray;
use crate::encoding::{utf_size, ByteReader, ByteWriter};
use crate::error::{FrameError, Result};
use crate::frame::FrameBlock;
use crate::types::{ColumnMetadata, ValueKind};

impl FrameBlock {
    /// True when names and per-column metadata can be elided on the wire.
    fn is_default_meta(&self) -> bool {
        self.is_column_names_default() && self.is_metadata_default()
    }

    /// Serializes the block into a fresh buffer of exactly
    /// [`CacheBlock::exact_serialized_size`] bytes.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let num_rows = i32::try_from(self.num_rows).map_err(|_| {
            FrameError::Corrupt(format!("{} rows exceed the i32 wire limit", self.num_rows))
        })?;
        let num_cols = i32::try_from(self.num_columns()).map_err(|_| {
            FrameError::Corrupt(format!(
                "{} columns exceed the i32 wire limit",
                self.num_columns()
            ))
        })?;

        let default_meta = self.is_default_meta();
        let mut w = ByteWriter::with_capacity(self.exact_serialized_size());
        w.write_i32(num_rows);
        w.write_i32(num_cols);
        w.write_bool(default_meta);
        for j in 0..self.num_columns() {
            w.write_u8(self.schema[j].ordinal());
            if !default_meta {
                w.write_utf(&self.column_name(j))?;
                let distinct =
                    i64::try_from(self.colmeta[j].num_distinct()).map_err(|_| {
                        FrameError::Corrupt(format!(
                            "distinct count {} exceeds the i64 wire limit",
                            self.colmeta[j].num_distinct()
                        ))
                    })?;
                w.write_i64(distinct);
                w.write_utf(self.colmeta[j].mv_value().unwrap_or(""))?;
            }
            // a schema-only block has zero rows and an empty payload
            if let Some(col) = self.coldata.get(j) {
                col.write_payload(&mut w)?;
            }
        }
        Ok(w.into_bytes())
    }

    /// Reconstructs a block from its serialized form. Fails with
    /// [`FrameError::Corrupt`] on truncation, negative counts, or trailing
    /// bytes, and with [`FrameError::UnsupportedType`] on unknown kind
    /// bytes.
    pub fn deserialize(data: &[u8]) -> Result<FrameBlock> {
        let mut r = ByteReader::new(data);
        let num_rows = r.read_i32()?;
        let num_cols = r.read_i32()?;
        if num_rows < 0 || num_cols < 0 {
            return Err(FrameError::Corrupt(format!(
                "negative dimensions {}x{}",
                num_rows, num_cols
            )));
        }
        let (num_rows, num_cols) = (num_rows as usize, num_cols as usize);
        let default_meta = r.read_bool()?;

        let mut schema = Vec::with_capacity(num_cols);
        let mut names = Vec::with_capacity(if default_meta { 0 } else { num_cols });
        let mut colmeta = Vec::with_capacity(num_cols);
        let mut coldata = Vec::with_capacity(num_cols);
        for _ in 0..num_cols {
            let kind = ValueKind::try_from(r.read_u8()?)?;
            schema.push(kind);
            if default_meta {
                colmeta.push(ColumnMetadata::default());
            } else {
                names.push(r.read_utf()?);
                let num_distinct = u64::try_from(r.read_i64()?).map_err(|_| {
                    FrameError::Corrupt("negative distinct count".to_string())
                })?;
                let mv = r.read_utf()?;
                colmeta.push(ColumnMetadata::with_mv_value(
                    num_distinct,
                    (!mv.is_empty()).then_some(mv),
                ));
            }
            coldata.push(ColumnArray::read_payload(kind, num_rows, &mut r)?);
        }
        if r.remaining() != 0 {
            return Err(FrameError::Corrupt(format!(
                "{} trailing bytes after frame payload",
                r.remaining()
            )));
        }

        let mut block = FrameBlock::with_schema(schema);
        block.colnames = (!default_meta).then_some(names);
        block.colmeta = colmeta;
        block.coldata = coldata;
        block.num_rows = num_rows;
        Ok(block)
    }
}

impl CacheBlock for FrameBlock {
    fn in_memory_size(&self) -> usize {
        let mut size = std::mem::size_of::<FrameBlock>();
        size += self.schema.capacity() * std::mem::size_of::<ValueKind>();
        if let Some(names) = &self.colnames {
            size += names.capacity() * std::mem::size_of::<String>();
            size += names.iter().map(|n| n.capacity()).sum::<usize>();
        }
        size += self.colmeta.capacity() * std::mem::size_of::<ColumnMetadata>();
        size += self
            .colmeta
            .iter()
            .map(|m| m.mv_value().map_or(0, str::len))
            .sum::<usize>();
        size += self
            .coldata
            .iter()
            .map(|col| std::mem::size_of::<ColumnArray>() + col.in_memory_size())
            .sum::<usize>();
        size
    }

    fn exact_serialized_size(&self) -> usize {
        let default_meta = self.is_default_meta();
        // header
        let mut size = 4 + 4 + 1;
        for j in 0..self.num_columns() {
            size += 1;
            if !default_meta {
                size += utf_size(&self.column_name(j));
                size += 8;
                size += utf_size(self.colmeta[j].mv_value().unwrap_or(""));
            }
            size += self.coldata.get(j).map_or(0, ColumnArray::serialized_size);
        }
        size
    }

    fn is_shallow_serialize(&self) -> bool {
        self.schema.iter().all(|kind| *kind != ValueKind::String)
    }

    fn compact_empty_block(&mut self) {
        if self.num_rows == 0 {
            for col in &mut self.coldata {
                col.shrink_to_fit();
            }
        }
    }
}
