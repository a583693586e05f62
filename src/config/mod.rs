//! Configuration for chunking behavior.
//!
//! - [`ChunkOptions`] - Builder holding the requested average size and any overrides
//! - [`ChunkConfig`] - The validated, immutable result of [`ChunkOptions::resolve`]
//!
//! Every size except the average is optional. Unset values are derived from
//! the average size:
//!
//! | field           | default          |
//! |-----------------|------------------|
//! | `min_size`      | `avg_size / 4`   |
//! | `max_size`      | `avg_size * 4`   |
//! | `normalization` | `2`              |
//! | `buffer_size`   | `max_size * 2`   |
//! | `seed`          | `0` (unseeded)   |
//!
//! # Example
//!
//! ```
//! use gearcdc::ChunkOptions;
//!
//! let config = ChunkOptions::new(16 * 1024)
//!     .with_min_size(4096)
//!     .with_max_size(65535)
//!     .with_normalization(1)
//!     .resolve()?;
//!
//! assert_eq!(config.buffer_size(), 65535 * 2);
//! # Ok::<(), gearcdc::ConfigError>(())
//! ```

use crate::cdc::Masks;
use crate::error::ConfigError;

/// Smallest size accepted for any of the average, minimum or maximum sizes.
pub const MIN_CHUNK_SIZE_LIMIT: usize = 64;

/// Largest size accepted for any of the average, minimum or maximum sizes (1 GiB).
pub const MAX_CHUNK_SIZE_LIMIT: usize = 1 << 30;

/// Normalization level used when none is requested.
pub const DEFAULT_NORMALIZATION: u32 = 2;

/// Highest supported normalization level.
pub const MAX_NORMALIZATION: u32 = 3;

/// Requested chunking parameters, before defaults and validation.
///
/// Setters only record values; nothing is checked until
/// [`resolve`](ChunkOptions::resolve). An explicitly set value is always
/// validated as given, so `with_min_size(0)` is an error rather than a
/// request for the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkOptions {
    avg_size: usize,
    min_size: Option<usize>,
    max_size: Option<usize>,
    normalization: Option<u32>,
    seed: u64,
    buffer_size: Option<usize>,
}

impl ChunkOptions {
    /// Starts a set of options for the given average chunk size.
    ///
    /// The average must be a power of two within `[64 B, 1 GiB]`.
    pub fn new(avg_size: usize) -> Self {
        Self {
            avg_size,
            min_size: None,
            max_size: None,
            normalization: None,
            seed: 0,
            buffer_size: None,
        }
    }

    /// Overrides the minimum chunk size (defaults to `avg_size / 4`).
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = Some(size);
        self
    }

    /// Overrides the maximum chunk size (defaults to `avg_size * 4`).
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Sets the normalization level, 0 through 3 (defaults to 2).
    ///
    /// Higher levels pull chunk lengths towards the average by making cuts
    /// harder below it and easier above it.
    ///
    /// - `0`: normalization disabled, one mask for the whole chunk
    /// - `1`: fewer chunks outside the desired range
    /// - `2`: most chunks close to the average
    /// - `3`: nearly all chunks close to the average
    pub fn with_normalization(mut self, level: u32) -> Self {
        self.normalization = Some(level);
        self
    }

    /// Disables normalization. Same as `with_normalization(0)`.
    pub fn without_normalization(self) -> Self {
        self.with_normalization(0)
    }

    /// XORs the gear tables with `seed`.
    ///
    /// Seeding hides content from observers who can only see chunk lengths.
    /// Chunks produced under different seeds are not comparable with one
    /// another. A seed of `0` leaves the tables untouched.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the read buffer size (defaults to `max_size * 2`).
    ///
    /// Must exceed the maximum chunk size. Larger buffers mean fewer reads.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = Some(size);
        self
    }

    /// Fills in defaults and validates, producing an immutable [`ChunkConfig`].
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, checked in this order:
    ///
    /// 1. average size within `[64 B, 1 GiB]`
    /// 2. average size is a power of two
    /// 3. min size within `[64 B, 1 GiB]`
    /// 4. max size within `[64 B, 1 GiB]`
    /// 5. `min_size < max_size`
    /// 6. `min_size <= avg_size <= max_size`
    /// 7. normalization is 0, 1, 2 or 3
    /// 8. `buffer_size > max_size`
    /// 9. `log2(avg_size) ± normalization` within the mask table (5..=25)
    pub fn resolve(&self) -> Result<ChunkConfig, ConfigError> {
        let avg_size = self.avg_size;
        let min_size = self.min_size.unwrap_or(avg_size / 4);
        let max_size = self.max_size.unwrap_or(avg_size.saturating_mul(4));
        let buffer_size = self.buffer_size.unwrap_or(max_size.saturating_mul(2));
        let normalization = self.normalization.unwrap_or(DEFAULT_NORMALIZATION);

        let in_range = |size: usize| (MIN_CHUNK_SIZE_LIMIT..=MAX_CHUNK_SIZE_LIMIT).contains(&size);

        if !in_range(avg_size) {
            return Err(ConfigError::AverageSizeOutOfRange(avg_size));
        }
        if !avg_size.is_power_of_two() {
            return Err(ConfigError::AverageSizeNotPowerOfTwo(avg_size));
        }
        if !in_range(min_size) {
            return Err(ConfigError::MinSizeOutOfRange(min_size));
        }
        if !in_range(max_size) {
            return Err(ConfigError::MaxSizeOutOfRange(max_size));
        }
        if max_size <= min_size {
            return Err(ConfigError::MaxNotAboveMin {
                min: min_size,
                max: max_size,
            });
        }
        if avg_size < min_size || avg_size > max_size {
            return Err(ConfigError::AverageOutsideBounds {
                avg: avg_size,
                min: min_size,
                max: max_size,
            });
        }
        if normalization > MAX_NORMALIZATION {
            return Err(ConfigError::InvalidNormalization(normalization));
        }
        if buffer_size <= max_size {
            return Err(ConfigError::BufferTooSmall {
                buffer: buffer_size,
                max: max_size,
            });
        }

        let avg_bits = avg_size.trailing_zeros();
        let masks = Masks::select(avg_bits, normalization).ok_or(ConfigError::MaskBitsOutOfRange {
            small_bits: avg_bits + normalization,
            large_bits: avg_bits.saturating_sub(normalization),
        })?;

        Ok(ChunkConfig {
            min_size,
            avg_size,
            max_size,
            normalization,
            seed: self.seed,
            buffer_size,
            masks,
        })
    }
}

/// Validated configuration for content-defined chunking.
///
/// Only obtainable through [`ChunkOptions::resolve`], so every instance
/// satisfies `64 <= min_size <= avg_size <= max_size < buffer_size`, with
/// `min_size < max_size` and all sizes at most 1 GiB.
///
/// # Example
///
/// ```
/// use gearcdc::ChunkOptions;
///
/// let config = ChunkOptions::new(8192).resolve()?;
/// assert_eq!(config.min_size(), 2048);
/// assert_eq!(config.max_size(), 32768);
/// assert_eq!(config.normalization(), 2);
/// # Ok::<(), gearcdc::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    min_size: usize,
    avg_size: usize,
    max_size: usize,
    normalization: u32,
    seed: u64,
    buffer_size: usize,
    masks: Masks,
}

impl ChunkConfig {
    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the average/target chunk size.
    ///
    /// This is also the point where the cut-point search switches from the
    /// strict mask to the relaxed one.
    pub fn avg_size(&self) -> usize {
        self.avg_size
    }

    /// Returns the maximum chunk size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the normalization level (0 when disabled).
    pub fn normalization(&self) -> u32 {
        self.normalization
    }

    /// Returns the gear table seed (0 when unseeded).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the read buffer capacity.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub(crate) fn masks(&self) -> &Masks {
        &self.masks
    }
}
