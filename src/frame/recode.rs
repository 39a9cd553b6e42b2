//! # Recode Map Cache
//!
//! Columns holding recode vocabularies store one `"token#code"` string
//! per row. `get_recode_map` parses such a column into a token-to-code
//! map and memoizes it per column behind a weak reference, so repeated
//! lookups share one map while unused maps stay reclaimable.
//!
//! The cache is never invalidated on mutation; callers are expected to
//! build recode maps from columns they no longer mutate.

use crate::error::{FrameError, Result};
use crate::frame::FrameBlock;
use hashbrown::HashMap;
use std::sync::Arc;

/// Separator between a recode token and its code. Tokens may contain the
/// separator themselves; the code starts after the last occurrence.
pub const RECODE_SEPARATOR: char = '#';

/// Token-to-code vocabulary of one recode column.
pub type RecodeMap = HashMap<String, i64>;

impl FrameBlock {
    /// Returns the recode map of column `col`, building and caching it on
    /// first use. Null cells are skipped; a non-null cell must carry a
    /// `"token#code"` entry with an integer code after the last separator.
    pub fn get_recode_map(&self, col: usize) -> Result<Arc<RecodeMap>> {
        if col >= self.num_columns() || (self.num_rows > 0 && col >= self.coldata.len()) {
            return Err(FrameError::Index {
                op: "recode map",
                found: format!("column {}", col),
                valid: format!("[0:{}]", self.num_columns().max(1) - 1),
            });
        }
        if let Some(weak) = self.rcd_map_cache.lock().get(&col) {
            if let Some(map) = weak.upgrade() {
                return Ok(map);
            }
        }

        let mut map = RecodeMap::new();
        for i in 0..self.num_rows {
            let entry = match self.coldata[col].get(i).to_optional_string() {
                Some(entry) => entry,
                None => continue,
            };
            let sep = entry.rfind(RECODE_SEPARATOR).ok_or_else(|| FrameError::Parse {
                kind: "recode entry",
                value: entry.clone(),
                reason: format!("missing '{}' separator", RECODE_SEPARATOR),
            })?;
            let code: i64 = entry[sep + 1..].parse().map_err(|e| FrameError::Parse {
                kind: "recode code",
                value: entry.clone(),
                reason: format!("{}", e),
            })?;
            map.insert(entry[..sep].to_string(), code);
        }

        let map = Arc::new(map);
        self.rcd_map_cache.lock().insert(col, Arc::downgrade(&map));
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;

    fn recode_block(entries: &[Option<&str>]) -> FrameBlock {
        let mut block = FrameBlock::with_schema(vec![ValueKind::String]);
        for entry in entries {
            block.append_row_strings(&[*entry]).unwrap();
        }
        block
    }

    #[test]
    fn builds_vocabulary_from_token_code_entries() {
        let block = recode_block(&[Some("apple#1"), Some("banana#2"), Some("apple#1"), None]);
        let map = block.get_recode_map(0).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["apple"], 1);
        assert_eq!(map["banana"], 2);
    }

    #[test]
    fn splits_on_the_last_separator() {
        let block = recode_block(&[Some("a#b#3")]);
        let map = block.get_recode_map(0).unwrap();
        assert_eq!(map["a#b"], 3);
    }

    #[test]
    fn repeated_lookups_share_one_map() {
        let block = recode_block(&[Some("x#1")]);
        let a = block.get_recode_map(0).unwrap();
        let b = block.get_recode_map(0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn dropped_maps_are_rebuilt_on_demand() {
        let block = recode_block(&[Some("x#1")]);
        let first = block.get_recode_map(0).unwrap();
        drop(first);
        let second = block.get_recode_map(0).unwrap();
        assert_eq!(second["x"], 1);
    }

    #[test]
    fn malformed_entries_fail_parse() {
        let block = recode_block(&[Some("no-separator")]);
        assert!(matches!(
            block.get_recode_map(0).unwrap_err(),
            FrameError::Parse { .. }
        ));

        let block = recode_block(&[Some("token#notanumber")]);
        assert!(matches!(
            block.get_recode_map(0).unwrap_err(),
            FrameError::Parse { .. }
        ));
    }

    #[test]
    fn rows_without_storage_are_out_of_bounds() {
        let mut block = FrameBlock::with_schema(vec![ValueKind::String]);
        block.reset(1, false);
        assert!(matches!(
            block.get_recode_map(0).unwrap_err(),
            FrameError::Index { .. }
        ));
    }

    #[test]
    fn column_index_is_checked() {
        let block = recode_block(&[Some("x#1")]);
        assert!(matches!(
            block.get_recode_map(1).unwrap_err(),
            FrameError::Index { .. }
        ));
    }
}
