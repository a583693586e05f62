// Integration tests for the Chunker pull API
// Tests cover: reconstruction, offsets, bounds, determinism, seeding, reset,
// reference vectors, error propagation, edge cases

use std::io::{self, Cursor, Read};
use std::path::Path;

use gearcdc::{ChunkError, ChunkOptions, Chunker, OwnedChunk};
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};

// ============================================================================
// Helpers
// ============================================================================

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

fn collect<R: Read>(reader: R, options: ChunkOptions) -> Vec<OwnedChunk> {
    Chunker::new(reader, options)
        .expect("valid options")
        .into_chunks()
        .collect::<Result<Vec<_>, _>>()
        .expect("reader does not fail")
}

fn lengths(chunks: &[OwnedChunk]) -> Vec<usize> {
    chunks.iter().map(|c| c.len()).collect()
}

/// Returns between 1 and `max_step` bytes per read, chosen at random.
struct RandomSplitReader {
    data: Vec<u8>,
    pos: usize,
    rng: StdRng,
    max_step: usize,
}

impl RandomSplitReader {
    fn new(data: Vec<u8>, seed: u64, max_step: usize) -> Self {
        Self {
            data,
            pos: 0,
            rng: StdRng::seed_from_u64(seed),
            max_step,
        }
    }
}

impl Read for RandomSplitReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.data.len() - self.pos;
        let step = self.rng.gen_range(1..=self.max_step);
        let n = step.min(buf.len()).min(remaining);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Serves `good` bytes, then fails every read.
struct FailingReader {
    good: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.good.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away")),
            n => Ok(n),
        }
    }
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_input() {
    let mut chunker = Chunker::new(io::empty(), ChunkOptions::new(1024)).unwrap();
    assert!(
        chunker.next_chunk().unwrap().is_none(),
        "Empty input should produce no chunks"
    );
}

#[test]
fn test_small_input_single_chunk() {
    let data = random_bytes(10, 51);
    let mut chunker =
        Chunker::new(&data[..], ChunkOptions::new(1024).without_normalization()).unwrap();

    let chunk = chunker.next_chunk().unwrap().expect("one chunk");
    assert_eq!(chunk.data, &data[..]);
    assert_eq!(chunk.len(), data.len());
    assert_eq!(chunk.fingerprint, 0, "Unscanned chunk carries the 0 sentinel");

    assert!(chunker.next_chunk().unwrap().is_none());
}

#[test]
fn test_input_exactly_min_size() {
    let options = ChunkOptions::new(1024);
    let min = options.resolve().unwrap().min_size();
    let data = random_bytes(min, 5);

    let chunks = collect(&data[..], options);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].len(), min);
    assert_eq!(chunks[0].fingerprint, 0);
}

#[test]
fn test_basic_chunking_reconstructs_input() {
    let data = random_bytes(1_000_000, 63);
    let mut chunker = Chunker::new(&data[..], ChunkOptions::new(1024)).unwrap();

    let mut rebuilt = Vec::with_capacity(data.len());
    let mut expected_offset = 0u64;
    let mut count = 0;
    while let Some(chunk) = chunker.next_chunk().unwrap() {
        assert_eq!(
            chunk.offset, expected_offset,
            "Chunk {} offset should be {}",
            count, expected_offset
        );
        expected_offset += chunk.len() as u64;
        rebuilt.extend_from_slice(chunk.data);
        count += 1;
    }

    assert!(count > 1, "1 MB at a 1 KiB average must produce many chunks");
    assert_eq!(rebuilt, data, "Reconstructed data must match the original");
}

// ============================================================================
// Size Constraints
// ============================================================================

#[test]
fn test_chunk_bounds() {
    let data = random_bytes(500_000, 11);
    for normalization in 0..=3 {
        let options = ChunkOptions::new(4096).with_normalization(normalization);
        let config = options.resolve().unwrap();
        let chunks = collect(&data[..], options);

        let (last, body) = chunks.split_last().unwrap();
        for (i, chunk) in body.iter().enumerate() {
            assert!(
                chunk.len() >= config.min_size() && chunk.len() <= config.max_size(),
                "normalization {}: chunk {} has length {}",
                normalization,
                i,
                chunk.len()
            );
        }
        assert!(last.len() <= config.max_size());
    }
}

#[test]
fn test_odd_min_with_tight_buffer() {
    let data = random_bytes(200_000, 23);
    let options = ChunkOptions::new(512)
        .with_min_size(97)
        .with_max_size(1001)
        .without_normalization()
        .with_buffer_size(1002);
    let config = options.resolve().unwrap();

    let chunks = collect(&data[..], options);
    let (last, body) = chunks.split_last().unwrap();
    for chunk in body {
        // Cuts land on even scan positions, one short of an odd minimum at most
        assert!(chunk.len() >= 96, "chunk of {} bytes", chunk.len());
        assert!(chunk.len() <= config.max_size());
    }
    assert!(last.len() <= config.max_size());

    let rebuilt: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
    assert_eq!(rebuilt, data);

    let split = collect(RandomSplitReader::new(data, 7, 300), options);
    assert_eq!(split, chunks, "A tight buffer must not depend on read sizes");
}

#[test]
fn test_all_zeros_saturate_to_max() {
    let data = vec![0u8; 10240];
    let options = ChunkOptions::new(256)
        .with_min_size(64)
        .with_max_size(1024)
        .with_normalization(1);

    let chunks = collect(&data[..], options);
    assert_eq!(chunks.len(), 10);
    for chunk in &chunks {
        assert_eq!(chunk.len(), 1024, "Constant input never satisfies a mask");
    }
}

#[test]
fn test_all_zeros_with_short_remainder() {
    let data = vec![0u8; 10240 + 100];
    let options = ChunkOptions::new(256).with_min_size(64).with_max_size(1024);

    let chunks = collect(&data[..], options);
    assert_eq!(chunks.len(), 11);
    assert!(chunks[..10].iter().all(|c| c.len() == 1024));
    assert_eq!(chunks[10].len(), 100);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_deterministic() {
    let data = random_bytes(100_000, 42);
    let first = collect(&data[..], ChunkOptions::new(4096));
    let second = collect(&data[..], ChunkOptions::new(4096));
    assert_eq!(first, second);
}

#[test]
fn test_determinism_across_read_sizes() {
    let data = random_bytes(300_000, 9);
    let options = ChunkOptions::new(2048).with_seed(123);
    let whole = collect(&data[..], options);

    for (seed, max_step) in [(1u64, 1usize), (2, 7), (3, 1000), (4, 70_000)] {
        let split = collect(RandomSplitReader::new(data.clone(), seed, max_step), options);
        assert_eq!(
            split, whole,
            "Chunks must not depend on read sizes (max_step {})",
            max_step
        );
    }
}

#[test]
fn test_determinism_across_buffer_sizes() {
    let data = random_bytes(300_000, 10);
    let options = ChunkOptions::new(2048);
    let default = collect(&data[..], options);

    let max = options.resolve().unwrap().max_size();
    for buffer_size in [max + 1, max + 13, max * 3, 1 << 20] {
        let chunks = collect(&data[..], options.with_buffer_size(buffer_size));
        assert_eq!(chunks, default, "buffer size {}", buffer_size);
    }
}

// ============================================================================
// Seeding
// ============================================================================

#[test]
fn test_seed_changes_boundaries() {
    let data = random_bytes(200_000, 17);
    let unseeded = collect(&data[..], ChunkOptions::new(2048));
    let seeded_a = collect(&data[..], ChunkOptions::new(2048).with_seed(666));
    let seeded_b = collect(&data[..], ChunkOptions::new(2048).with_seed(667));

    assert_ne!(lengths(&unseeded), lengths(&seeded_a));
    assert_ne!(lengths(&seeded_a), lengths(&seeded_b));

    let again = collect(&data[..], ChunkOptions::new(2048).with_seed(666));
    assert_eq!(seeded_a, again, "Same seed must reproduce the same chunks");
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_equivalence() {
    let data = random_bytes(50_000, 77);
    let other = random_bytes(30_000, 78);
    let options = ChunkOptions::new(4096);

    let fresh = collect(&data[..], options);

    let mut chunker = Chunker::new(&other[..], options).unwrap();
    // Stop partway through the first stream.
    chunker.next_chunk().unwrap();
    chunker.reset(&data[..]);

    let mut after_reset = Vec::new();
    while let Some(chunk) = chunker.next_chunk().unwrap() {
        after_reset.push(chunk.to_owned_chunk());
    }
    assert_eq!(after_reset, fresh);
}

#[test]
fn test_reset_after_error() {
    let data = random_bytes(40_000, 5);
    let options = ChunkOptions::new(1024);

    let mut chunker = Chunker::new(
        Box::new(FailingReader {
            good: Cursor::new(data[..1000].to_vec()),
        }) as Box<dyn Read>,
        options,
    )
    .unwrap();
    let err = chunker.next_chunk().unwrap_err();
    assert!(matches!(&err, ChunkError::Io(e) if e.kind() == io::ErrorKind::ConnectionReset));
    assert!(err.to_string().contains("peer went away"));

    chunker.reset(Box::new(Cursor::new(data.clone())));
    let mut rebuilt = Vec::new();
    while let Some(chunk) = chunker.next_chunk().unwrap() {
        rebuilt.extend_from_slice(chunk.data);
    }
    assert_eq!(rebuilt, data);
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_read_error_propagates() {
    let options = ChunkOptions::new(1024);
    let max = options.resolve().unwrap().max_size();

    // Enough good bytes for a few chunks before the reader fails.
    let reader = FailingReader {
        good: Cursor::new(random_bytes(max * 3, 8)),
    };
    let results: Vec<_> = Chunker::new(reader, options)
        .unwrap()
        .into_chunks()
        .collect();

    let (last, ok) = results.split_last().unwrap();
    assert!(ok.iter().all(|r| r.is_ok()));
    assert!(matches!(last, Err(ChunkError::Io(_))));
}

#[test]
fn test_invalid_options_rejected() {
    let cases = [
        ChunkOptions::new(0),
        ChunkOptions::new(8192).with_min_size(10000).with_max_size(5000),
        ChunkOptions::new(8192).with_min_size(1024).with_max_size(4096),
        ChunkOptions::new(8192).with_normalization(5),
        ChunkOptions::new(8192).with_buffer_size(1024),
    ];
    for options in cases {
        assert!(
            matches!(
                Chunker::new(io::empty(), options),
                Err(ChunkError::Config(_))
            ),
            "{:?} should be rejected",
            options
        );
    }

    let valid = [
        ChunkOptions::new(8192),
        ChunkOptions::new(8192)
            .with_min_size(2048)
            .with_max_size(32768)
            .with_normalization(1)
            .with_buffer_size(65536),
        ChunkOptions::new(8192).without_normalization(),
        ChunkOptions::new(8192).with_seed(666),
    ];
    for options in valid {
        assert!(Chunker::new(io::empty(), options).is_ok(), "{:?}", options);
    }
}

// ============================================================================
// Reference Vectors
// ============================================================================

// The published FastCDC 2020 vectors. Drop the fixture in place and run
// `cargo test -- --ignored`.
const FIXTURE: &str = "tests/fixtures/SekienAkashita.jpg";

fn load_fixture() -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(FIXTURE);
    std::fs::read(&path).unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e))
}

fn reference_options(normalization: u32, seed: u64) -> ChunkOptions {
    ChunkOptions::new(16384)
        .with_min_size(4096)
        .with_max_size(65535)
        .with_normalization(normalization)
        .with_seed(seed)
}

fn check_vector(data: &[u8], options: ChunkOptions, expected: &[(u64, usize, u64)]) {
    let chunks = collect(data, options);
    let actual: Vec<(u64, usize, u64)> = chunks
        .iter()
        .map(|c| (c.offset, c.len(), c.fingerprint))
        .collect();
    assert_eq!(actual, expected, "{:?}", options);
}

#[test]
#[ignore = "requires tests/fixtures/SekienAkashita.jpg"]
fn test_reference_normalization_2_unseeded() {
    let data = load_fixture();
    check_vector(
        &data,
        reference_options(2, 0),
        &[
            (0, 19186, 17583755766661134474),
            (19186, 19279, 4098594969649699419),
            (38465, 17354, 2365586132076908760),
            (55819, 16387, 16009206469796846404),
            (72206, 19940, 2473608525189754172),
            (92146, 17320, 2504464741100432583),
        ],
    );
}

#[test]
#[ignore = "requires tests/fixtures/SekienAkashita.jpg"]
fn test_reference_normalization_2_seeded() {
    let data = load_fixture();
    check_vector(
        &data,
        reference_options(2, 666),
        &[
            (0, 17635, 17021115692437263050),
            (17635, 17334, 8231525949846907466),
            (34969, 19136, 10944310959829698982),
            (54105, 17467, 13602876513398592944),
            (71572, 23593, 2945079350535657389),
            (95165, 14301, 8981594897574481255),
        ],
    );
}

#[test]
#[ignore = "requires tests/fixtures/SekienAkashita.jpg"]
fn test_reference_normalization_1_unseeded() {
    let data = load_fixture();
    check_vector(
        &data,
        reference_options(1, 0),
        &[
            (0, 21325, 17968276318003433923),
            (21325, 17140, 8197189939299398838),
            (38465, 28084, 13019990849178155730),
            (66549, 18217, 4509236223063678303),
            (84766, 24700, 2504464741100432583),
        ],
    );
}

#[test]
#[ignore = "requires tests/fixtures/SekienAkashita.jpg"]
fn test_reference_normalization_1_seeded() {
    let data = load_fixture();
    check_vector(
        &data,
        reference_options(1, 666),
        &[
            (0, 10605, 9312357714466240148),
            (10605, 55745, 226910853333574584),
            (66350, 11346, 12271755243986371352),
            (77696, 5883, 14153975939352546047),
            (83579, 11586, 5890158701071314778),
            (95165, 14301, 8981594897574481255),
        ],
    );
}

#[test]
#[ignore = "requires tests/fixtures/SekienAkashita.jpg"]
fn test_reference_vectors_across_read_sizes() {
    let data = load_fixture();
    let options = reference_options(2, 0);
    let whole = collect(&data[..], options);
    let split = collect(RandomSplitReader::new(data, 99, 4096), options);
    assert_eq!(split, whole);
}
