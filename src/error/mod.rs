//! Error types for gearcdc.
//!
//! Configuration problems are reported once, when a chunker is built.
//! Everything after that is an I/O failure from the underlying reader.
//! End-of-stream is not an error: [`Chunker::next_chunk`](crate::Chunker::next_chunk)
//! returns `Ok(None)` for it.

use thiserror::Error;

/// Result type for chunking operations.
pub type Result<T> = std::result::Result<T, ChunkError>;

/// A violated configuration invariant.
///
/// Each variant maps to exactly one check performed by
/// [`ChunkOptions::resolve`](crate::ChunkOptions::resolve). Checks run in a
/// fixed order and the first failure is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The average size is outside `[64 B, 1 GiB]`.
    #[error("average size {0} must be in range 64B to 1GiB")]
    AverageSizeOutOfRange(usize),

    /// The average size is not a power of two.
    #[error("average size {0} must be a power of 2")]
    AverageSizeNotPowerOfTwo(usize),

    /// The minimum size is outside `[64 B, 1 GiB]`.
    #[error("min size {0} must be in range 64B to 1GiB")]
    MinSizeOutOfRange(usize),

    /// The maximum size is outside `[64 B, 1 GiB]`.
    #[error("max size {0} must be in range 64B to 1GiB")]
    MaxSizeOutOfRange(usize),

    /// The maximum size does not exceed the minimum size.
    #[error("min size {min} must be less than max size {max}")]
    MaxNotAboveMin {
        /// Resolved minimum size.
        min: usize,
        /// Resolved maximum size.
        max: usize,
    },

    /// The average size falls outside `[min, max]`.
    #[error("average size {avg} must be between min size {min} and max size {max}")]
    AverageOutsideBounds {
        /// Requested average size.
        avg: usize,
        /// Resolved minimum size.
        min: usize,
        /// Resolved maximum size.
        max: usize,
    },

    /// Normalization level other than 0, 1, 2 or 3.
    #[error("normalization {0} must be 0, 1, 2, or 3")]
    InvalidNormalization(u32),

    /// The read buffer cannot hold more than one maximum-size chunk.
    #[error("buffer size {buffer} must be greater than max size {max}")]
    BufferTooSmall {
        /// Resolved buffer size.
        buffer: usize,
        /// Resolved maximum size.
        max: usize,
    },

    /// `log2(avg) ± normalization` leaves the mask table.
    #[error(
        "average size / normalization combination needs mask bits {large_bits}..={small_bits}, \
         outside the supported range 5..=25"
    )]
    MaskBitsOutOfRange {
        /// `log2(avg) + normalization`.
        small_bits: u32,
        /// `log2(avg) - normalization` (saturating at zero).
        large_bits: u32,
    },
}

/// Errors that can occur while building or driving a chunker.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// The chunker configuration was rejected.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    /// An I/O error occurred while reading input data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
