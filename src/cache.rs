//! # Cache Block Interface
//!
//! Buffer-pool facing view of a block: size accounting for eviction
//! decisions and hints about how expensive serialization will be. The
//! serialized-size contract is exact, not an estimate, so a pool can
//! reserve the output buffer up front.

/// Size and serialization accounting for pooled blocks.
pub trait CacheBlock {
    /// Estimated bytes held in memory, including heap payloads.
    fn in_memory_size(&self) -> usize;

    /// Exact byte length of the serialized form. Must equal the length of
    /// the buffer produced by serialization.
    fn exact_serialized_size(&self) -> usize;

    /// True when serialization involves no per-cell variable-length work,
    /// so the block could be written out by flat copies.
    fn is_shallow_serialize(&self) -> bool;

    /// Gives the block a chance to shrink internal buffers when it holds
    /// no data.
    fn compact_empty_block(&mut self);
}
