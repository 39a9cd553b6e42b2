//! # Column Storage
//!
//! Typed, amortized-growth column arrays behind the `ColumnArray` sum
//! type. See `array` for the growth, presence, and bulk-copy contracts.

mod array;

pub use array::{ColumnArray, PrimitiveArray, StringArray};
