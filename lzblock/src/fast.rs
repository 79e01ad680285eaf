//! Fast (default) LZ4 block compression.
//!
//! A single greedy pass over the input. Each position is hashed once into a
//! [`HashIndex`] holding one candidate per bucket; the first verified
//! candidate is taken and extended as far as it goes in both directions.

use crate::encode::Match;
use crate::hash::{HashIndex, read_u32};
use crate::matcher::{MatchFinder, SearchWindow, compress_block, count_backward, count_forward};
use lzblock_core::error::Result;
use lzblock_core::format::{MAX_DISTANCE, MIN_MATCH};
use lzblock_core::traits::BlockCompressor;

/// Largest accepted acceleration.
pub const MAX_ACCELERATION: usize = 65537;

/// Greedy single-candidate matcher.
struct FastMatcher {
    index: HashIndex,
    step: usize,
}

impl MatchFinder for FastMatcher {
    fn reset(&mut self) {
        self.index.reset();
    }

    fn find_match(&mut self, input: &[u8], pos: usize, window: SearchWindow) -> Option<Match> {
        let candidate = self.index.lookup(input, pos);
        self.index.insert(input, pos);

        let candidate = candidate?;
        let offset = pos - candidate;
        if offset > MAX_DISTANCE || read_u32(input, candidate) != read_u32(input, pos) {
            return None;
        }

        let forward = MIN_MATCH
            + count_forward(input, candidate + MIN_MATCH, pos + MIN_MATCH, window.limit);
        let back = count_backward(input, candidate, pos, window.anchor);

        Some(Match {
            start: pos - back,
            offset,
            len: forward + back,
        })
    }

    fn after_match(&mut self, input: &[u8], m: &Match) {
        // Backward extension can move the start below the probed position.
        // The match end itself is indexed by the next probe.
        self.index.insert(input, m.start);
        self.index.insert(input, m.end() - 2);
    }

    fn miss_step(&self) -> usize {
        self.step
    }
}

/// Reusable fast-strategy encoder.
///
/// The hash table is allocated once and cleared before every block.
pub struct FastEncoder {
    matcher: FastMatcher,
}

impl FastEncoder {
    /// Create an encoder that probes every position.
    pub fn new() -> Self {
        Self::with_acceleration(1)
    }

    /// Create an encoder that advances `acceleration` bytes after each
    /// position without a match.
    ///
    /// Larger values trade ratio for speed on poorly compressible data.
    /// Values are clamped to `1..=MAX_ACCELERATION`.
    pub fn with_acceleration(acceleration: usize) -> Self {
        Self {
            matcher: FastMatcher {
                index: HashIndex::new(),
                step: acceleration.clamp(1, MAX_ACCELERATION),
            },
        }
    }

    /// The miss step in use.
    pub fn acceleration(&self) -> usize {
        self.matcher.step
    }

    /// Compress `input` into `output`, returning the bytes written.
    pub fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let written = compress_block(&mut self.matcher, input, output)?;
        tracing::debug!(
            input = input.len(),
            output = written,
            acceleration = self.matcher.step,
            "fast block compressed"
        );
        Ok(written)
    }
}

impl Default for FastEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCompressor for FastEncoder {
    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.compress(input, output)
    }
}

/// Compress `input` into `output` with the fast strategy.
///
/// Returns the number of bytes written. Fails with
/// [`InsufficientOutputSpace`](lzblock_core::LzBlockError::InsufficientOutputSpace)
/// if `output` is too small; a buffer of
/// [`compress_bound`](lzblock_core::compress_bound)`(input.len())` bytes is
/// always large enough.
pub fn compress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    FastEncoder::new().compress(input, output)
}

/// Compress with the fast strategy and a custom acceleration.
pub fn compress_fast(input: &[u8], output: &mut [u8], acceleration: usize) -> Result<usize> {
    FastEncoder::with_acceleration(acceleration).compress(input, output)
}

/// Compress into a new buffer with the fast strategy.
pub fn compress_to_vec(input: &[u8]) -> Result<Vec<u8>> {
    FastEncoder::new().compress_to_vec(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decompress;
    use lzblock_core::error::{ErrorKind, LzBlockError};
    use lzblock_core::format::{LAST_LITERALS, compress_bound};

    fn roundtrip(data: &[u8]) -> Vec<u8> {
        let compressed = compress_to_vec(data).unwrap();
        let mut out = vec![0u8; data.len()];
        let read = decompress(&compressed, &mut out).unwrap();
        assert_eq!(read, compressed.len());
        assert_eq!(out, data);
        compressed
    }

    #[test]
    fn test_compress_empty() {
        let compressed = roundtrip(b"");
        assert_eq!(compressed, vec![0x00]);
    }

    #[test]
    fn test_roundtrip_small() {
        roundtrip(b"a");
        roundtrip(b"ab");
        roundtrip(b"Hello, World!");
    }

    #[test]
    fn test_roundtrip_repeated() {
        let data = b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        let compressed = roundtrip(data);
        // Repeated data should compress well
        assert!(
            compressed.len() < data.len(),
            "compressed: {}, original: {}",
            compressed.len(),
            data.len()
        );
    }

    #[test]
    fn test_roundtrip_pattern() {
        roundtrip(b"abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd");
    }

    #[test]
    fn test_run_uses_overlapping_match() {
        // 64 equal bytes: one literal, one offset-1 match, five closing literals.
        let data = [0x5Au8; 64];
        let compressed = roundtrip(&data);
        assert_eq!(compressed[0], 0x1F);
        assert_eq!(compressed[1], 0x5A);
        assert_eq!(&compressed[2..4], &[1, 0]);
    }

    #[test]
    fn test_tail_is_literal() {
        let data = b"xyzxyzxyzxyzxyzxyzxyzxyzxyzxyzxyzxyz";
        let compressed = roundtrip(data);
        // The closing sequence holds exactly the last five bytes.
        let tail = &compressed[compressed.len() - 6..];
        assert_eq!(tail[0], 0x50);
        assert_eq!(&tail[1..], &data[data.len() - 5..]);
    }

    #[test]
    fn test_zero_output_buffer() {
        let data = b"Hello world, this is quite something".repeat(10);
        let err = compress(&data, &mut [0u8; 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientOutputSpace);

        let err = compress(b"", &mut [0u8; 0]).unwrap_err();
        assert_eq!(err, LzBlockError::insufficient_output(1, 0));
    }

    #[test]
    fn test_one_byte_output_buffer() {
        let data = b"Hello world, this is quite something".repeat(10);
        let mut out = [0u8; 1];
        assert!(compress(&data, &mut out).is_err());
    }

    #[test]
    fn test_incompressible_fits_bound() {
        let mut seed: u32 = 0x9E37_79B9;
        let data: Vec<u8> = (0..5000)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                seed as u8
            })
            .collect();
        let mut out = vec![0u8; compress_bound(data.len())];
        let n = compress(&data, &mut out).unwrap();
        assert!(n <= compress_bound(data.len()));
        roundtrip(&data);
    }

    #[test]
    fn test_acceleration() {
        let data = b"The quick brown fox jumps over the lazy dog. ".repeat(40);
        for acceleration in [0, 1, 2, 8, 1000] {
            let mut encoder = FastEncoder::with_acceleration(acceleration);
            assert!(encoder.acceleration() >= 1);
            let compressed = encoder.compress_to_vec(&data).unwrap();
            let mut out = vec![0u8; data.len()];
            decompress(&compressed, &mut out).unwrap();
            assert_eq!(out, data);
        }
        assert_eq!(
            FastEncoder::with_acceleration(usize::MAX).acceleration(),
            MAX_ACCELERATION
        );
    }

    #[test]
    fn test_backward_extended_start_is_indexed() {
        let input = b"0123456789abcdefghij0123456789abcdefghij!!!!!!";
        let mut matcher = FastMatcher {
            index: HashIndex::new(),
            step: 1,
        };
        for pos in 0..20 {
            matcher.index.insert(input, pos);
        }

        let window = SearchWindow {
            anchor: 20,
            limit: input.len() - LAST_LITERALS,
        };
        let m = matcher.find_match(input, 25, window).unwrap();
        assert_eq!((m.start, m.offset, m.len), (20, 20, 20));
        assert_eq!(matcher.index.lookup(input, 20), Some(0));

        matcher.after_match(input, &m);
        assert_eq!(matcher.index.lookup(input, 20), Some(20));
        assert_eq!(matcher.index.lookup(input, 38), Some(38));
    }

    #[test]
    fn test_encoder_reuse_is_stateless() {
        let first = b"Once upon a time there was a block. Once upon a time.".to_vec();
        let second = b"Completely different content, nothing shared at all!!".to_vec();
        let mut encoder = FastEncoder::new();
        encoder.compress_to_vec(&first).unwrap();
        let reused = encoder.compress_to_vec(&second).unwrap();
        assert_eq!(reused, compress_to_vec(&second).unwrap());
    }
}
