//! LZ4-HC (High Compression) mode.
//!
//! LZ4-HC trades compression speed for better compression ratios.
//! It uses a more aggressive match finding strategy with:
//! - Larger hash table
//! - Chain table linking every position to the previous one with the same hash
//! - Longest-match selection over up to `search_depth()` candidates
//! - One-step lazy evaluation before committing to a match
//! - Compression levels 0-16

use crate::chain::ChainIndex;
use crate::encode::Match;
use crate::fast;
use crate::hash::read_u32;
use crate::matcher::{MatchFinder, SearchWindow, compress_block, count_backward, count_forward};
use lzblock_core::error::Result;
use lzblock_core::format::MIN_MATCH;
use lzblock_core::traits::BlockCompressor;

/// LZ4-HC compression level (0-16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HcLevel(u8);

impl HcLevel {
    /// Minimum HC compression level.
    pub const MIN: Self = Self(0);
    /// Default HC compression level.
    pub const DEFAULT: Self = Self(0);
    /// Maximum HC compression level.
    pub const MAX: Self = Self(16);

    /// Levels at or below this share the default search depth.
    const DEFAULT_DEPTH_LOG: u8 = 6;

    /// Create a compression level, clamping to `MIN..=MAX`.
    pub fn new(level: i32) -> Self {
        Self(level.clamp(Self::MIN.0 as i32, Self::MAX.0 as i32) as u8)
    }

    /// Get the level value.
    pub fn level(self) -> u8 {
        self.0
    }

    /// Maximum number of chain candidates examined per position.
    ///
    /// `2^max(level, 6)`: 64 up to level 6, doubling per level up to 65536
    /// at level 16, where the whole window can be searched.
    pub fn search_depth(self) -> usize {
        1 << self.0.max(Self::DEFAULT_DEPTH_LOG)
    }
}

impl Default for HcLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for HcLevel {
    fn from(level: u8) -> Self {
        Self::new(level as i32)
    }
}

/// Chained multi-candidate matcher.
struct HcMatcher {
    chain: ChainIndex,
    depth: usize,
}

impl MatchFinder for HcMatcher {
    fn reset(&mut self) {
        self.chain.reset();
    }

    fn find_match(&mut self, input: &[u8], pos: usize, window: SearchWindow) -> Option<Match> {
        self.chain.insert_up_to(input, pos);

        let prefix = read_u32(input, pos);
        let max_forward = window.limit - pos;
        let mut best: Option<Match> = None;

        for candidate in self.chain.candidates(input, pos).take(self.depth) {
            if read_u32(input, candidate) != prefix {
                continue;
            }

            let forward = MIN_MATCH
                + count_forward(input, candidate + MIN_MATCH, pos + MIN_MATCH, window.limit);
            let back = count_backward(input, candidate, pos, window.anchor);
            let len = forward + back;

            // Strictly longer only: on ties the closer candidate, seen first, wins.
            if best.is_none_or(|b| len > b.len) {
                best = Some(Match {
                    start: pos - back,
                    offset: pos - candidate,
                    len,
                });
                if forward == max_forward {
                    break;
                }
            }
        }

        best
    }

    fn lazy(&self) -> bool {
        true
    }
}

/// LZ4-HC encoder.
///
/// Tables are allocated once per encoder and reset for every block, so an
/// encoder can be reused across calls without carrying state between them.
pub struct HcEncoder {
    level: HcLevel,
    matcher: HcMatcher,
}

impl HcEncoder {
    /// Create a new HC encoder with default compression level.
    pub fn new() -> Self {
        Self::with_level(HcLevel::default())
    }

    /// Create a new HC encoder with specific compression level.
    pub fn with_level(level: HcLevel) -> Self {
        Self {
            level,
            matcher: HcMatcher {
                chain: ChainIndex::new(),
                depth: level.search_depth(),
            },
        }
    }

    /// The level this encoder compresses at.
    pub fn level(&self) -> HcLevel {
        self.level
    }

    /// Compress `input` into `output`, returning the bytes written.
    pub fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        // Nothing to search: the fast path produces the same trivial block.
        if input.is_empty() || output.is_empty() {
            return fast::compress(input, output);
        }

        let written = compress_block(&mut self.matcher, input, output)?;
        tracing::debug!(
            input = input.len(),
            output = written,
            level = self.level.level(),
            "hc block compressed"
        );
        Ok(written)
    }
}

impl Default for HcEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCompressor for HcEncoder {
    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.compress(input, output)
    }
}

/// Compress `input` into `output` using LZ4-HC at `level`.
///
/// Out-of-range levels are clamped to `0..=16`.
pub fn compress_hc(input: &[u8], output: &mut [u8], level: i32) -> Result<usize> {
    HcEncoder::with_level(HcLevel::new(level)).compress(input, output)
}

/// Compress into a new buffer using LZ4-HC with a specific compression level.
pub fn compress_hc_to_vec(input: &[u8], level: HcLevel) -> Result<Vec<u8>> {
    HcEncoder::with_level(level).compress_to_vec(input)
}
