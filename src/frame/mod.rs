//! # Frame Block
//!
//! The block itself plus its operation families, one per module:
//!
//! | Module | Operations |
//! |--------|------------|
//! | `block` | construction, allocation, cell access, row/column append, reset |
//! | `indexing` | slice, left-index, row split, zero-out |
//! | `append` | cbind/rbind, merge, bulk copy |
//! | `iter` | string-row and value-row iterators |
//! | `recode` | recode-map construction and caching |
//! | `serialize` | the binary wire format and cache accounting |

mod append;
mod block;
mod indexing;
mod iter;
mod recode;
mod serialize;

pub use block::FrameBlock;
pub use iter::{StringRow, StringRowIter, ValueRow, ValueRowIter};
pub use recode::{RecodeMap, RECODE_SEPARATOR};
