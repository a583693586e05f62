//! Chunking engine for processing byte streams.
//!
//! - [`Chunker`] - Stateful CDC engine with `next_chunk()`/`reset()` API
//! - [`ChunkIter`] - Iterator adapter yielding owned chunks

mod engine;
mod iter;

pub use engine::Chunker;
pub use iter::ChunkIter;
