//! gearcdc
//!
//! Streaming FastCDC 2020 Content-Defined Chunking (CDC) for Rust.
//!
//! `gearcdc` splits a byte stream into variable-length, content-aligned
//! chunks, so that repeated data re-chunks identically even after insertions
//! or deletions elsewhere in the stream. It is a building block for:
//!
//! - deduplication
//! - backup systems
//! - delta synchronization
//! - content-addressable storage
//!
//! The crate intentionally:
//! - does NOT hash chunk contents
//! - does NOT store, compress or encrypt chunks
//! - does NOT manage files, readers or threads
//!
//! It only does one thing: **Read bytes → yield chunks** (offset, bytes and
//! rolling fingerprint).
//!
//! Output is bit-for-bit compatible with the FastCDC 2020 reference vectors,
//! including seeded gear tables.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use gearcdc::{ChunkError, ChunkOptions, Chunker};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("data.bin")?;
//!     let mut chunker = Chunker::new(file, ChunkOptions::new(16 * 1024))?;
//!
//!     while let Some(chunk) = chunker.next_chunk()? {
//!         println!("chunk @ {}: {} bytes", chunk.offset, chunk.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Owned chunks
//!
//! ```
//! use gearcdc::{ChunkOptions, Chunker};
//!
//! let data = vec![42u8; 10_000];
//! let chunker = Chunker::new(&data[..], ChunkOptions::new(1024).with_seed(666))?;
//!
//! for chunk in chunker {
//!     let chunk = chunk?;
//!     assert!(chunk.len() <= 4096);
//! }
//! # Ok::<(), gearcdc::ChunkError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;

mod buffer; // internal sliding read buffer
pub mod cdc;

//
// Public surface (intentionally tiny)
//

pub use chunk::{Chunk, OwnedChunk};
pub use chunker::{ChunkIter, Chunker};
pub use config::{
    ChunkConfig, ChunkOptions, DEFAULT_NORMALIZATION, MAX_CHUNK_SIZE_LIMIT, MAX_NORMALIZATION,
    MIN_CHUNK_SIZE_LIMIT,
};
pub use error::{ChunkError, ConfigError, Result};
