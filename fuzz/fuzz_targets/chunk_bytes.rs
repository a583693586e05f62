#![no_main]

use gearcdc::{ChunkOptions, Chunker};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let configs = [
        // Small chunks
        ChunkOptions::new(256),
        // Medium chunks, seeded
        ChunkOptions::new(1024).with_seed(0x5eed),
        // Normalization disabled
        ChunkOptions::new(4096).without_normalization(),
        // Odd bounds, tight buffer
        ChunkOptions::new(512)
            .with_min_size(97)
            .with_max_size(1001)
            .with_normalization(3)
            .with_buffer_size(1002),
    ];

    for options in configs {
        let config = options.resolve().unwrap();
        let mut chunker = Chunker::with_config(&data[..], config);

        let mut expected_offset = 0u64;
        let mut rebuilt = Vec::with_capacity(data.len());
        let mut lengths = Vec::new();
        while let Some(chunk) = chunker.next_chunk().unwrap() {
            // Verify: offsets are contiguous
            assert_eq!(chunk.offset, expected_offset);
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= config.max_size());
            expected_offset += chunk.len() as u64;
            rebuilt.extend_from_slice(chunk.data);
            lengths.push(chunk.len());
        }

        // Verify: total bytes match input
        assert_eq!(rebuilt, data);

        // Verify: only the last chunk may fall short of min_size (minus one
        // byte for odd min sizes, where cuts land on even scan positions)
        if let Some((_, body)) = lengths.split_last() {
            for &len in body {
                assert!(len >= config.min_size() & !1);
            }
        }
    }
});
