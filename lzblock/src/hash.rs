//! Hash index used by the fast strategy.
//!
//! Each bucket remembers only the most recent position whose 4-byte prefix
//! hashed there. Older positions are overwritten, so a lookup costs one probe.

/// Multiplier for the 4-byte multiplicative hash.
const PRIME: u32 = 2654435761;

/// Marks a bucket or chain link with no position.
pub(crate) const EMPTY: u32 = u32::MAX;

/// Fast-path table size (log2).
pub(crate) const HASH_LOG: u32 = 12;

/// Read 4 bytes as u32 (little-endian).
///
/// Callers guarantee `pos + 4 <= data.len()`.
#[inline]
pub(crate) fn read_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

/// Hash a 4-byte word down to `bits` bits.
#[inline]
pub(crate) fn hash4(word: u32, bits: u32) -> usize {
    (word.wrapping_mul(PRIME) >> (32 - bits)) as usize
}

/// Single-candidate hash table keyed by 4-byte prefixes.
pub(crate) struct HashIndex {
    table: Vec<u32>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self {
            table: vec![EMPTY; 1 << HASH_LOG],
        }
    }

    /// Forget every recorded position.
    pub fn reset(&mut self) {
        self.table.fill(EMPTY);
    }

    #[inline]
    fn bucket(input: &[u8], pos: usize) -> usize {
        hash4(read_u32(input, pos), HASH_LOG)
    }

    /// Record `pos` under the hash of `input[pos..pos + 4]`.
    #[inline]
    pub fn insert(&mut self, input: &[u8], pos: usize) {
        if pos + 4 > input.len() {
            return;
        }
        self.table[Self::bucket(input, pos)] = pos as u32;
    }

    /// Most recent position sharing the hash of `input[pos..pos + 4]`.
    #[inline]
    pub fn lookup(&self, input: &[u8], pos: usize) -> Option<usize> {
        if pos + 4 > input.len() {
            return None;
        }
        match self.table[Self::bucket(input, pos)] {
            EMPTY => None,
            p => Some(p as usize),
        }
    }
}
