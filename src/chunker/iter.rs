//! Owned-chunk iterator over a [`Chunker`].

use std::io::Read;
use std::iter::FusedIterator;

use super::Chunker;
use crate::chunk::OwnedChunk;
use crate::error::Result;

/// An iterator that yields owned chunks from a [`Chunker`].
///
/// Created by [`Chunker::into_chunks`] or by iterating a `Chunker` directly.
/// Each chunk's data is copied into its own [`bytes::Bytes`]. The iterator is
/// fused: after the stream ends or the first error it only returns `None`.
///
/// # Example
///
/// ```
/// use gearcdc::{ChunkOptions, Chunker};
///
/// let data = vec![7u8; 20_000];
/// let chunker = Chunker::new(&data[..], ChunkOptions::new(1024))?;
///
/// let chunks = chunker.into_chunks().collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(chunks.iter().map(|c| c.len()).sum::<usize>(), data.len());
/// # Ok::<(), gearcdc::ChunkError>(())
/// ```
#[derive(Debug)]
pub struct ChunkIter<R> {
    chunker: Chunker<R>,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    pub(super) fn new(chunker: Chunker<R>) -> Self {
        Self {
            chunker,
            finished: false,
        }
    }

    /// Returns the wrapped chunker.
    pub fn into_inner(self) -> Chunker<R> {
        self.chunker
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<OwnedChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.chunker.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk.to_owned_chunk())),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for ChunkIter<R> {}
