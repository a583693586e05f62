//! Chunk types - a borrowed view and an owned copy.

use bytes::Bytes;
use std::fmt;
use std::ops::Range;

/// A content-defined chunk borrowed from the chunker's buffer.
///
/// `data` aliases the chunker's internal buffer, so the borrow checker keeps
/// the chunk from outliving the next [`Chunker::next_chunk`] or
/// [`Chunker::reset`] call. Use [`Chunk::to_owned_chunk`] to keep it longer.
///
/// # Fingerprint
///
/// `fingerprint` is the gear hash at the cut. It is a weak signature of the
/// bytes just before the boundary, not a content hash of the whole chunk. A
/// final chunk no longer than `min_size` is emitted without scanning and
/// carries the sentinel `0`. Compute a proper hash of `data` if you need a
/// deduplication key.
///
/// [`Chunker::next_chunk`]: crate::Chunker::next_chunk
/// [`Chunker::reset`]: crate::Chunker::reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Absolute position in the stream where the chunk starts.
    pub offset: u64,

    /// The chunk bytes.
    pub data: &'a [u8],

    /// Rolling hash value at the boundary.
    pub fingerprint: u64,
}

impl Chunk<'_> {
    /// Returns the length of the chunk.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data. Never true for emitted chunks.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a stream range.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }

    /// Copies the chunk out of the chunker's buffer.
    pub fn to_owned_chunk(self) -> OwnedChunk {
        OwnedChunk {
            offset: self.offset,
            data: Bytes::copy_from_slice(self.data),
            fingerprint: self.fingerprint,
        }
    }
}

/// A chunk that owns its data.
///
/// Produced by [`Chunk::to_owned_chunk`] and by
/// [`ChunkIter`](crate::ChunkIter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedChunk {
    /// Absolute position in the stream where the chunk starts.
    pub offset: u64,

    /// The chunk bytes.
    pub data: Bytes,

    /// Rolling hash value at the boundary (see [`Chunk`]).
    pub fingerprint: u64,
}

impl OwnedChunk {
    /// Returns the length of the chunk.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a stream range.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }

    /// Borrows this chunk as a [`Chunk`].
    pub fn as_chunk(&self) -> Chunk<'_> {
        Chunk {
            offset: self.offset,
            data: &self.data,
            fingerprint: self.fingerprint,
        }
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl From<Chunk<'_>> for OwnedChunk {
    fn from(chunk: Chunk<'_>) -> Self {
        chunk.to_owned_chunk()
    }
}

impl fmt::Display for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk({} bytes @ {}, fingerprint={:#018x})",
            self.len(),
            self.offset,
            self.fingerprint
        )
    }
}

impl fmt::Display for OwnedChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_chunk().fmt(f)
    }
}
