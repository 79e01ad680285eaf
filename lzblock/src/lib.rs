//! Pure Rust LZ4 block compression.
//!
//! LZ4 is a lossless compression algorithm focusing on compression and
//! decompression speed. This crate implements the raw block format with two
//! compression strategies sharing one wire format:
//!
//! - **Fast**: a single greedy pass with one hash candidate per position
//! - **HC**: hash chains searched to a level-dependent depth, with lazy
//!   matching, for better ratios at higher CPU cost
//!
//! Blocks carry no header, length, or checksum. The caller keeps the
//! original size and hands the decoder an output buffer of exactly that size.
//!
//! # Example
//!
//! ```
//! use lzblock::{compress, compress_bound, decompress};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let mut compressed = vec![0u8; compress_bound(data.len())];
//! let n = compress(data, &mut compressed).unwrap();
//!
//! let mut restored = vec![0u8; data.len()];
//! let read = decompress(&compressed[..n], &mut restored).unwrap();
//! assert_eq!(read, n);
//! assert_eq!(&restored, data);
//! ```

mod chain;
mod decode;
mod encode;
mod fast;
mod hash;
pub mod hc;
mod matcher;

pub use decode::{BlockDecoder, Decoded, decompress, decompress_to_vec};
pub use fast::{FastEncoder, MAX_ACCELERATION, compress, compress_fast, compress_to_vec};
pub use hc::{HcEncoder, HcLevel, compress_hc, compress_hc_to_vec};
pub use lzblock_core::format;
pub use lzblock_core::{
    BlockCompressor, BlockDecompressor, ErrorKind, LzBlockError, Result, compress_bound,
};

/// Compression strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fast compression (default).
    Fast {
        /// Miss step, see [`FastEncoder::with_acceleration`].
        acceleration: usize,
    },
    /// High compression (slower but better ratio).
    High(HcLevel),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Fast { acceleration: 1 }
    }
}

impl Strategy {
    /// Build a reusable encoder for this strategy.
    pub fn encoder(self) -> Box<dyn BlockCompressor + Send> {
        match self {
            Self::Fast { acceleration } => Box::new(FastEncoder::with_acceleration(acceleration)),
            Self::High(level) => Box::new(HcEncoder::with_level(level)),
        }
    }
}

/// Compress `input` into `output` with the given strategy.
pub fn compress_with(strategy: Strategy, input: &[u8], output: &mut [u8]) -> Result<usize> {
    match strategy {
        Strategy::Fast { acceleration } => compress_fast(input, output, acceleration),
        Strategy::High(level) => HcEncoder::with_level(level).compress(input, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_empty() {
        let data: &[u8] = b"";
        let compressed = compress_to_vec(data).unwrap();
        let decompressed = decompress_to_vec(&compressed, 0).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_roundtrip_hello() {
        let data = b"Hello, World!";
        let compressed = compress_to_vec(data).unwrap();
        let decompressed = decompress_to_vec(&compressed, data.len()).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_strategy_default() {
        assert_eq!(Strategy::default(), Strategy::Fast { acceleration: 1 });
    }

    #[test]
    fn test_strategies_share_wire_format() {
        let data = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
        for strategy in [
            Strategy::default(),
            Strategy::Fast { acceleration: 4 },
            Strategy::High(HcLevel::DEFAULT),
            Strategy::High(HcLevel::MAX),
        ] {
            let mut buf = vec![0u8; compress_bound(data.len())];
            let n = compress_with(strategy, &data, &mut buf).unwrap();
            let boxed = strategy.encoder().compress_to_vec(&data).unwrap();
            assert_eq!(&buf[..n], &boxed[..]);

            let mut decoder = BlockDecoder::new();
            let restored = decoder.decompress_to_vec(&boxed, data.len()).unwrap();
            assert_eq!(restored, data);
        }
    }
}
