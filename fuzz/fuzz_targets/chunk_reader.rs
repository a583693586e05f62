#![no_main]

use std::io::{self, Read};

use gearcdc::{ChunkOptions, Chunker, OwnedChunk};
use libfuzzer_sys::fuzz_target;

/// Serves the payload in read sizes taken from the fuzz input.
struct SplitReader<'a> {
    data: &'a [u8],
    steps: &'a [u8],
    turn: usize,
}

impl Read for SplitReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let step = match self.steps {
            [] => usize::MAX,
            steps => steps[self.turn % steps.len()] as usize * 64 + 1,
        };
        self.turn += 1;
        let n = step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn chunk_all<R: Read>(reader: R, options: ChunkOptions) -> Vec<OwnedChunk> {
    Chunker::new(reader, options)
        .unwrap()
        .into_chunks()
        .collect::<Result<_, _>>()
        .unwrap()
}

fuzz_target!(|input: (Vec<u8>, Vec<u8>, u64)| {
    let (data, steps, seed) = input;
    let options = ChunkOptions::new(512).with_seed(seed);

    let whole = chunk_all(&data[..], options);
    let split = chunk_all(
        SplitReader {
            data: &data,
            steps: &steps,
            turn: 0,
        },
        options,
    );

    // Verify: read partitioning never changes the chunk stream
    assert_eq!(whole, split);

    // Verify: reset reproduces a fresh run
    let mut chunker = Chunker::new(&steps[..], options).unwrap();
    let _ = chunker.next_chunk().unwrap();
    chunker.reset(&data[..]);
    let again: Vec<OwnedChunk> = chunker.into_chunks().collect::<Result<_, _>>().unwrap();
    assert_eq!(whole, again);
});
