//! Fixed-capacity read buffer with a sliding window of unread bytes.

use std::io::{self, ErrorKind, Read};

/// A read buffer allocated once and reused across streams.
///
/// `data[cursor..end]` holds bytes read from the source but not yet emitted.
/// `position` is the stream offset of `data[cursor]`.
pub struct SlidingBuffer {
    data: Box<[u8]>,
    cursor: usize,
    end: usize,
    position: u64,
    eof: bool,
}

impl SlidingBuffer {
    /// Allocates a buffer of `capacity` bytes with an empty window.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            cursor: 0,
            end: 0,
            position: 0,
            eof: false,
        }
    }

    /// Ensures at least `min_available` bytes are buffered, unless the source runs dry.
    ///
    /// Does nothing when the window already holds `min_available` bytes.
    /// Otherwise the unread tail is moved to the front of the buffer and, if
    /// the source has not signalled end-of-stream, the rest of the buffer is
    /// filled. A read returning `Ok(0)` marks the source as exhausted; later
    /// calls never read from it again.
    ///
    /// # Errors
    ///
    /// Any read error other than [`ErrorKind::Interrupted`] is returned as is.
    /// Bytes read before the failure stay in the window.
    pub fn fill<R: Read>(&mut self, reader: &mut R, min_available: usize) -> io::Result<()> {
        let available = self.end - self.cursor;
        if available >= min_available {
            return Ok(());
        }

        self.data.copy_within(self.cursor..self.end, 0);
        self.cursor = 0;
        self.end = available;

        if self.eof {
            return Ok(());
        }

        while self.end < self.data.len() {
            match reader.read(&mut self.data[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    tracing::debug!(
                        position = self.position,
                        buffered = self.end,
                        "end of source reached"
                    );
                    break;
                }
                Ok(n) => self.end += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Returns the unread bytes.
    pub fn window(&self) -> &[u8] {
        &self.data[self.cursor..self.end]
    }

    /// Consumes `len` bytes from the start of the window and returns them.
    ///
    /// The returned slice stays valid until the buffer is next mutated.
    pub fn consume(&mut self, len: usize) -> &[u8] {
        debug_assert!(len <= self.end - self.cursor);
        let start = self.cursor;
        self.cursor += len;
        self.position += len as u64;
        &self.data[start..self.cursor]
    }

    /// Stream offset of the first unread byte.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns true once the source has reported end-of-stream.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Empties the window and rewinds the position for a new source.
    ///
    /// The allocation is kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.end = 0;
        self.position = 0;
        self.eof = false;
    }
}

impl std::fmt::Debug for SlidingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingBuffer")
            .field("capacity", &self.data.len())
            .field("cursor", &self.cursor)
            .field("end", &self.end)
            .field("position", &self.position)
            .field("eof", &self.eof)
            .finish()
    }
}
