//! # Frame Type System
//!
//! Canonical type definitions shared across the crate.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `ValueKind` | Closed column type tag (wire ordinal is load-bearing) |
//! | `CellValue` | Boxed runtime value with presence + universal coercion |
//! | `ColumnMetadata` | Distinct count + optional missing-value marker |
//! | `IndexRange` | Closed-interval row/column window |

mod index_range;
mod metadata;
mod value;
mod value_kind;

pub use index_range::IndexRange;
pub use metadata::ColumnMetadata;
pub use value::CellValue;
pub(crate) use value::{parse_bool, parse_float, parse_int};
pub use value_kind::ValueKind;
