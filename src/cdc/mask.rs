//! Normalized cut masks.

/// Lowest bit-width with an entry in [`MASKS`].
pub const MIN_MASK_BITS: u32 = 5;

/// Highest bit-width with an entry in [`MASKS`].
pub const MAX_MASK_BITS: u32 = 25;

/// Zero-padded masks from the FastCDC 2020 paper (Table II).
///
/// Indexed by `log2(chunk_size)`, e.g. `MASKS[13]` is the 8 KiB mask. Entries
/// 0 through 4 are padding. Entries 5 and 25 only exist so that normalization
/// level 3 can reach past the 64 B and 16 MiB averages.
pub const MASKS: [u64; 26] = [
    0,                     // 0: padding
    0,                     // 1: padding
    0,                     // 2: padding
    0,                     // 3: padding
    0,                     // 4: padding
    0x0000_0000_0180_4110, // 5: NC 3 only
    0x0000_0000_0180_3110, // 6: 64B
    0x0000_0000_1803_5100, // 7: 128B
    0x0000_0018_0003_5300, // 8: 256B
    0x0000_0190_0035_3000, // 9: 512B
    0x0000_5900_0353_0000, // 10: 1KB
    0x0000_d900_0353_0000, // 11: 2KB
    0x0000_d901_0353_0000, // 12: 4KB
    0x0000_d903_0353_0000, // 13: 8KB
    0x0000_d903_1353_0000, // 14: 16KB
    0x0000_d90f_0353_0000, // 15: 32KB
    0x0000_d903_0353_7000, // 16: 64KB
    0x0000_d907_0353_7000, // 17: 128KB
    0x0000_d907_0753_7000, // 18: 256KB
    0x0000_d917_0753_7000, // 19: 512KB
    0x0000_d917_4753_7000, // 20: 1MB
    0x0000_d917_6753_7000, // 21: 2MB
    0x0000_d937_6753_7000, // 22: 4MB
    0x0000_d937_7753_7000, // 23: 8MB
    0x0000_d937_7757_7000, // 24: 16MB
    0x0000_db37_7757_7000, // 25: NC 3 only
];

/// The four masks tested by the cut-point search.
///
/// `small` applies below the average size and has more bits set, so cuts are
/// rarer there. `large` applies from the average size on and has fewer bits
/// set. The `*_shifted` variants are the same masks shifted left by one bit,
/// matched against the fingerprint after the first byte of each pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Masks {
    pub(crate) small: u64,
    pub(crate) large: u64,
    pub(crate) small_shifted: u64,
    pub(crate) large_shifted: u64,
}

impl Masks {
    /// Looks up the masks for an average of `2^avg_bits` bytes.
    ///
    /// Returns `None` when `avg_bits + normalization` or
    /// `avg_bits - normalization` falls outside
    /// [`MIN_MASK_BITS`]`..=`[`MAX_MASK_BITS`].
    pub fn select(avg_bits: u32, normalization: u32) -> Option<Self> {
        let small_bits = avg_bits.checked_add(normalization)?;
        let large_bits = avg_bits.checked_sub(normalization)?;
        if small_bits > MAX_MASK_BITS || large_bits < MIN_MASK_BITS {
            return None;
        }

        let small = MASKS[small_bits as usize];
        let large = MASKS[large_bits as usize];
        Some(Self {
            small,
            large,
            small_shifted: small << 1,
            large_shifted: large << 1,
        })
    }
}
