//! FastCDC 2020 cut-point search.
//!
//! # Algorithm Overview
//!
//! The gear hash is updated as `fp = (fp << 1) + GEAR[byte]` and a cut is
//! declared where `fp & mask == 0`. The search here processes two bytes per
//! iteration (section 3.7 of the paper):
//!
//! - `fp = (fp << 2) + GEAR_SHIFTED[data[i]]`, tested against `mask << 1`
//! - `fp = fp + GEAR[data[i + 1]]`, tested against `mask`
//!
//! which is the single-byte recurrence unrolled once, so the result does not
//! depend on the pairing.
//!
//! Normalized chunking splits the scan in two phases. From `min_size` up to
//! the average size the strict `small` mask is used; from there up to
//! `max_size` the relaxed `large` mask takes over. If neither phase finds a
//! cut the chunk is cut at `max_size`.
//!
//! # References
//!
//! Wen Xia et al., "The Design of Fast Content-Defined Chunking for Data
//! Deduplication Based Storage Systems", IEEE TPDS 2020.

use super::{GearTables, Masks};
use crate::config::ChunkConfig;

/// Result of a cut-point search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cut {
    /// Number of bytes from the start of the region that form the chunk.
    pub length: usize,
    /// Rolling hash at the cut, or `0` when no scan was performed.
    pub fingerprint: u64,
}

/// Stateless FastCDC cut-point finder.
///
/// Holds the size bounds, masks and (possibly seeded) gear tables of one
/// configuration. [`FastCdc::cut`] is a pure function of its input and this
/// state, so one instance can be used for any number of streams.
#[derive(Debug, Clone)]
pub struct FastCdc {
    min_size: usize,
    max_size: usize,
    normalize_size: usize,
    masks: Masks,
    gear: GearTables,
}

impl FastCdc {
    /// Creates a finder for a validated configuration.
    pub fn new(config: &ChunkConfig) -> Self {
        Self {
            min_size: config.min_size(),
            max_size: config.max_size(),
            normalize_size: config.avg_size(),
            masks: *config.masks(),
            gear: GearTables::new(config.seed()),
        }
    }

    /// Finds the first cut point in `data`.
    ///
    /// A region of at most `min_size` bytes is returned whole with a
    /// fingerprint of `0`. The chunker only passes such a region at the end
    /// of the stream, since it otherwise keeps at least `max_size` bytes
    /// buffered. That `0` says nothing about the content.
    ///
    /// Otherwise the returned length is at most `min(data.len(), max_size)`.
    /// Cuts land on the scan position itself, so with an odd `min_size` a
    /// chunk can be one byte shorter than `min_size`.
    pub fn cut(&self, data: &[u8]) -> Cut {
        let data_len = data.len();
        if data_len <= self.min_size {
            return Cut {
                length: data_len,
                fingerprint: 0,
            };
        }

        let max_boundary = data_len.min(self.max_size);
        let normalize_boundary = self.normalize_size.min(max_boundary);

        // Even positions for the two-bytes-per-iteration scan.
        let scan_start = self.min_size & !1;
        let normalize_at = normalize_boundary & !1;
        let scan_end = max_boundary & !1;

        let data = &data[..max_boundary];
        let gear = &self.gear.base;
        let gear_shifted = &self.gear.shifted;
        let Masks {
            small,
            large,
            small_shifted,
            large_shifted,
        } = self.masks;

        let mut fingerprint = 0u64;

        let mut i = scan_start;
        while i < normalize_at {
            fingerprint = (fingerprint << 2).wrapping_add(gear_shifted[data[i] as usize]);
            if fingerprint & small_shifted == 0 {
                return Cut {
                    length: i,
                    fingerprint,
                };
            }
            fingerprint = fingerprint.wrapping_add(gear[data[i + 1] as usize]);
            if fingerprint & small == 0 {
                return Cut {
                    length: i + 1,
                    fingerprint,
                };
            }
            i += 2;
        }

        let mut i = normalize_at;
        while i < scan_end {
            fingerprint = (fingerprint << 2).wrapping_add(gear_shifted[data[i] as usize]);
            if fingerprint & large_shifted == 0 {
                return Cut {
                    length: i,
                    fingerprint,
                };
            }
            fingerprint = fingerprint.wrapping_add(gear[data[i + 1] as usize]);
            if fingerprint & large == 0 {
                return Cut {
                    length: i + 1,
                    fingerprint,
                };
            }
            i += 2;
        }

        Cut {
            length: max_boundary,
            fingerprint,
        }
    }

    /// Returns the minimum size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the maximum size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
