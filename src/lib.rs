//! # frameblock - Columnar Heterogeneous Frame Blocks
//!
//! `frameblock` stores a table of mixed-type columns — strings, booleans,
//! 64-bit integers, 64-bit floats — behind one uniform cell interface,
//! with an exact big-endian wire format for moving blocks between
//! processes and caches.
//!
//! ## Quick Start
//!
//! ```
//! use frameblock::{FrameBlock, ValueKind};
//!
//! # fn main() -> frameblock::Result<()> {
//! let mut block = FrameBlock::with_schema(vec![ValueKind::String, ValueKind::Float]);
//! block.append_row_strings(&[Some("a"), Some("1.0")])?;
//! block.append_row_strings(&[Some("b"), Some("2.0")])?;
//!
//! let tail = block.slice(1, 1, 0, 1)?;
//! let bytes = tail.serialize()?;
//! assert_eq!(FrameBlock::deserialize(&bytes)?, tail);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │      FrameBlock (schema + names       │
//! │        + metadata + row count)        │
//! ├───────────────────────────────────────┤
//! │  Range ops: slice / left-index /      │
//! │  split / zero-out / cbind / merge     │
//! ├───────────────────────────────────────┤
//! │  ColumnArray (typed column storage,   │
//! │  doubling growth, presence rules)     │
//! ├───────────────────────────────────────┤
//! │  Wire codec (big-endian, utf strings) │
//! └───────────────────────────────────────┘
//! ```
//!
//! ## Semantics Worth Knowing
//!
//! - **Presence**: string columns track null explicitly; boolean, int,
//!   and float columns treat `false`/`0`/`0.0` as absent. Merge and
//!   append decide per cell through this one predicate.
//! - **Universal coercion**: any value converts into any column kind by
//!   stringifying and reparsing under the target kind's rule; there are
//!   no per-type-pair conversions.
//! - **Most operations copy**: slicing, concatenation, and left-indexing
//!   produce new blocks; only row append, merge, and bulk copy mutate the
//!   receiver.
//!
//! ## Module Overview
//!
//! - [`types`]: value kinds, boxed cell values, column metadata, ranges
//! - [`columns`]: typed column arrays with amortized growth
//! - [`frame`]: the block and its operation families
//! - [`encoding`]: big-endian wire primitives
//! - [`cache`]: size accounting for buffer pools
//! - [`error`]: the closed error taxonomy

pub mod cache;
pub mod columns;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod types;

pub use cache::CacheBlock;
pub use columns::ColumnArray;
pub use error::{FrameError, Result};
pub use frame::{FrameBlock, RecodeMap, StringRow, ValueRow, RECODE_SEPARATOR};
pub use types::{CellValue, ColumnMetadata, IndexRange, ValueKind};
