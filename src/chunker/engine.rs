//! Core chunking engine - Chunker with a pull-based streaming API.
//!
//! This module implements the synchronous chunking API using the FastCDC
//! 2020 algorithm:
//!
//! - [`Chunker`] - Stateful CDC engine that reads from any [`std::io::Read`]
//! - `next_chunk()` - Yields one borrowed chunk per call, `Ok(None)` at the end
//! - `reset()` - Starts over with a new reader, reusing buffer and tables
//!
//! # Example
//!
//! ```
//! use gearcdc::{ChunkOptions, Chunker};
//!
//! let data = vec![0u8; 100_000];
//! let mut chunker = Chunker::new(&data[..], ChunkOptions::new(4096))?;
//!
//! let mut total = 0;
//! while let Some(chunk) = chunker.next_chunk()? {
//!     total += chunk.len();
//! }
//! assert_eq!(total, data.len());
//! # Ok::<(), gearcdc::ChunkError>(())
//! ```

use std::io::Read;

use crate::buffer::SlidingBuffer;
use crate::cdc::FastCdc;
use crate::chunk::Chunk;
use crate::config::{ChunkConfig, ChunkOptions};
use crate::error::Result;

use super::ChunkIter;

/// A chunker that splits a byte stream into content-defined chunks.
///
/// `Chunker` owns a read buffer of `buffer_size` bytes and the gear tables
/// for its seed. Each call to [`next_chunk`](Chunker::next_chunk) tops the
/// buffer up so that at least `max_size` bytes are available (or the stream
/// has ended), runs the cut-point search over the buffered bytes and returns
/// the chunk as a view into the buffer.
///
/// # Determinism
///
/// Identical byte streams and configurations produce identical chunks
/// (offsets, lengths and fingerprints), regardless of how the reader splits
/// its data across `read` calls.
///
/// # Zero-Copy
///
/// [`Chunk::data`] borrows the internal buffer, so the chunk must be dropped
/// before the next call. Copy it out with [`Chunk::to_owned_chunk`], or use
/// [`Chunker::into_chunks`] to get owned chunks directly.
///
/// # Errors
///
/// Interrupted reads are retried. Any other read error is returned as
/// [`ChunkError::Io`](crate::ChunkError::Io); after it the stream position
/// is not meaningful,
/// call [`reset`](Chunker::reset) before using the chunker again.
///
/// # Example
///
/// ```
/// use gearcdc::{ChunkOptions, Chunker};
///
/// let first = vec![1u8; 50_000];
/// let second = vec![2u8; 20_000];
///
/// let mut chunker = Chunker::new(&first[..], ChunkOptions::new(4096))?;
/// let mut lengths = Vec::new();
/// while let Some(chunk) = chunker.next_chunk()? {
///     lengths.push(chunk.len());
/// }
///
/// // Same buffer, same tables, new stream.
/// chunker.reset(&second[..]);
/// assert_eq!(chunker.next_chunk()?.map(|c| c.offset), Some(0));
/// # Ok::<(), gearcdc::ChunkError>(())
/// ```
#[derive(Debug)]
pub struct Chunker<R> {
    reader: R,
    cdc: FastCdc,
    buffer: SlidingBuffer,
    config: ChunkConfig,
}

impl<R: Read> Chunker<R> {
    /// Resolves `options` and creates a chunker reading from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::Config`](crate::ChunkError::Config) if the
    /// options are rejected. No buffer is allocated in that case.
    pub fn new(reader: R, options: ChunkOptions) -> Result<Self> {
        let config = options.resolve()?;
        Ok(Self::with_config(reader, config))
    }

    /// Creates a chunker from an already validated configuration.
    pub fn with_config(reader: R, config: ChunkConfig) -> Self {
        tracing::debug!(
            min_size = config.min_size(),
            avg_size = config.avg_size(),
            max_size = config.max_size(),
            normalization = config.normalization(),
            seeded = config.seed() != 0,
            buffer_size = config.buffer_size(),
            "creating chunker"
        );

        Self {
            reader,
            cdc: FastCdc::new(&config),
            buffer: SlidingBuffer::new(config.buffer_size()),
            config,
        }
    }

    /// Returns the next chunk, or `Ok(None)` once the stream is exhausted.
    ///
    /// May block while the reader is read. Chunks come out in stream order,
    /// contiguous and non-overlapping, starting at offset 0. Every chunk is
    /// between `min_size` and `max_size` bytes long except the last one,
    /// which may be shorter.
    ///
    /// Calling again after `Ok(None)` keeps returning `Ok(None)` without
    /// touching the reader.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::Io`](crate::ChunkError::Io) if the reader fails.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'_>>> {
        self.buffer.fill(&mut self.reader, self.config.max_size())?;

        if self.buffer.window().is_empty() {
            debug_assert!(self.buffer.is_eof());
            return Ok(None);
        }

        let cut = self.cdc.cut(self.buffer.window());
        let offset = self.buffer.position();
        let data = self.buffer.consume(cut.length);

        tracing::trace!(offset, length = cut.length, "emitting chunk");

        Ok(Some(Chunk {
            offset,
            data,
            fingerprint: cut.fingerprint,
        }))
    }

    /// Consumes the chunker and returns an iterator over owned chunks.
    ///
    /// Each chunk's data is copied out of the buffer.
    pub fn into_chunks(self) -> ChunkIter<R> {
        ChunkIter::new(self)
    }
}

impl<R> Chunker<R> {
    /// Starts over on a new reader and returns the previous one.
    ///
    /// The stream position goes back to 0 and any buffered bytes are
    /// dropped. The buffer allocation and gear tables are kept, so this is
    /// the cheap way to chunk many streams with one configuration. The
    /// returned reader is not closed or otherwise touched.
    pub fn reset(&mut self, reader: R) -> R {
        tracing::debug!(position = self.buffer.position(), "resetting chunker");
        self.buffer.reset();
        std::mem::replace(&mut self.reader, reader)
    }

    /// Returns the stream offset of the next chunk.
    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns a mutable reference to the underlying reader.
    ///
    /// Reading from it directly skips those bytes in the chunk stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes the chunker and returns the underlying reader.
    ///
    /// Bytes already buffered but not yet emitted are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> IntoIterator for Chunker<R> {
    type Item = Result<crate::chunk::OwnedChunk>;
    type IntoIter = ChunkIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_chunks()
    }
}
