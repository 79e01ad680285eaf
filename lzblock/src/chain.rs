//! Chained hash index for the HC strategy.
//!
//! Two flat arrays form the chain graph:
//! - `head[hash]` is the most recent position with that hash
//! - `prev[pos % WINDOW_SIZE]` is the previous position with the same hash
//!
//! A `prev` slot is reused once the position it describes falls out of the
//! window, which is exactly when it can no longer be referenced.

use crate::hash::{EMPTY, hash4, read_u32};
use lzblock_core::format::{MAX_DISTANCE, WINDOW_SIZE};

/// HC hash table size (log2).
pub(crate) const HC_HASH_LOG: u32 = 15;

const CHAIN_MASK: usize = WINDOW_SIZE - 1;

pub(crate) struct ChainIndex {
    head: Vec<u32>,
    prev: Vec<u32>,
    /// Every position below this has been inserted.
    next_to_update: usize,
}

impl ChainIndex {
    pub fn new() -> Self {
        Self {
            head: vec![EMPTY; 1 << HC_HASH_LOG],
            prev: vec![EMPTY; WINDOW_SIZE],
            next_to_update: 0,
        }
    }

    pub fn reset(&mut self) {
        self.head.fill(EMPTY);
        self.prev.fill(EMPTY);
        self.next_to_update = 0;
    }

    #[inline]
    fn bucket(input: &[u8], pos: usize) -> usize {
        hash4(read_u32(input, pos), HC_HASH_LOG)
    }

    /// Insert a single position into its bucket's chain.
    #[inline]
    fn insert(&mut self, input: &[u8], pos: usize) {
        if pos + 4 > input.len() {
            return;
        }
        let h = Self::bucket(input, pos);
        self.prev[pos & CHAIN_MASK] = self.head[h];
        self.head[h] = pos as u32;
    }

    /// Insert every position in `[next_to_update, target)`.
    pub fn insert_up_to(&mut self, input: &[u8], target: usize) {
        while self.next_to_update < target {
            self.insert(input, self.next_to_update);
            self.next_to_update += 1;
        }
    }

    /// Candidates for `input[pos..pos + 4]`, most recent first, stopping at
    /// the window edge.
    pub fn candidates(&self, input: &[u8], pos: usize) -> Candidates<'_> {
        let first = if pos + 4 <= input.len() {
            self.head[Self::bucket(input, pos)]
        } else {
            EMPTY
        };
        Candidates {
            prev: &self.prev,
            pos,
            next: first,
        }
    }
}

/// Walk of one hash chain.
pub(crate) struct Candidates<'a> {
    prev: &'a [u32],
    pos: usize,
    next: u32,
}

impl Iterator for Candidates<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next == EMPTY {
            return None;
        }
        let candidate = self.next as usize;
        // Links must point strictly backwards and stay inside the window.
        if candidate >= self.pos || self.pos - candidate > MAX_DISTANCE {
            self.next = EMPTY;
            return None;
        }
        let link = self.prev[candidate & CHAIN_MASK];
        self.next = if link != EMPTY && (link as usize) < candidate {
            link
        } else {
            EMPTY
        };
        Some(candidate)
    }
}
