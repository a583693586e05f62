//! Chunk types.
//!
//! - [`Chunk`] - Borrowed view of a chunk inside the chunker's buffer
//! - [`OwnedChunk`] - Chunk whose data has been copied out

mod data;

pub use data::{Chunk, OwnedChunk};
