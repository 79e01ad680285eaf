//! Match finder abstraction and the shared parse loop.
//!
//! Both strategies plug a [`MatchFinder`] into [`compress_block`], which owns
//! the anchor bookkeeping, the parsing restrictions at the block tail, and the
//! calls into the [`SequenceWriter`].

use crate::encode::{Match, SequenceWriter};
use lzblock_core::error::{LzBlockError, Result};
use lzblock_core::format::{LAST_LITERALS, MAX_INPUT_SIZE, MFLIMIT, MIN_INPUT_LENGTH};

/// Limits for one match search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchWindow {
    /// Start of the pending literal run; backward extension stops here.
    pub anchor: usize,
    /// Matches must end at or before this position.
    pub limit: usize,
}

/// A strategy for finding matches at a position.
pub(crate) trait MatchFinder {
    /// Prepare internal tables for a new block.
    fn reset(&mut self);

    /// Find a match for the bytes at `pos`.
    ///
    /// The returned match may start before `pos` (backward extension) but
    /// never before `window.anchor`, and ends at or before `window.limit`.
    fn find_match(&mut self, input: &[u8], pos: usize, window: SearchWindow) -> Option<Match>;

    /// Called after a match was emitted; parsing resumes at `m.end()`.
    fn after_match(&mut self, _input: &[u8], _m: &Match) {}

    /// How far to advance after a position produced no match.
    fn miss_step(&self) -> usize {
        1
    }

    /// Whether to try the next position before committing to a match.
    fn lazy(&self) -> bool {
        false
    }
}

/// Count equal bytes going forward from `a` and `b` (`a < b`), with `b`
/// stopping at `limit`.
#[inline]
pub(crate) fn count_forward(input: &[u8], a: usize, b: usize, limit: usize) -> usize {
    let max = limit.saturating_sub(b);
    input[a..a + max]
        .iter()
        .zip(&input[b..b + max])
        .take_while(|(x, y)| x == y)
        .count()
}

/// Count equal bytes going backward from `a` and `b` (`a < b`), with `b`
/// stopping at `anchor`.
#[inline]
pub(crate) fn count_backward(input: &[u8], a: usize, b: usize, anchor: usize) -> usize {
    let max = (b - anchor).min(a);
    input[a - max..a]
        .iter()
        .rev()
        .zip(input[b - max..b].iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Compress one block with the given match finder.
pub(crate) fn compress_block<M: MatchFinder>(
    finder: &mut M,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize> {
    if input.len() > MAX_INPUT_SIZE {
        return Err(LzBlockError::input_too_large(input.len(), MAX_INPUT_SIZE));
    }

    let mut writer = SequenceWriter::new(output);
    let len = input.len();

    if len < MIN_INPUT_LENGTH {
        // Too small to compress, emit as literals
        writer.write_last_literals(input)?;
        return Ok(writer.written());
    }

    finder.reset();

    // Last position a match may start at, and the end every match must respect.
    let last_start = len - MFLIMIT;
    let limit = len - LAST_LITERALS;

    let mut anchor = 0;
    let mut pos = 0;

    while pos <= last_start {
        let window = SearchWindow { anchor, limit };
        let Some(mut best) = finder.find_match(input, pos, window) else {
            pos += finder.miss_step();
            continue;
        };

        if finder.lazy() {
            let mut next = pos + 1;
            while next <= last_start {
                match finder.find_match(input, next, window) {
                    Some(later) if later.len > best.len => {
                        best = later;
                        next += 1;
                    }
                    _ => break,
                }
            }
        }

        writer.write_sequence(&input[anchor..best.start], &best)?;
        finder.after_match(input, &best);

        pos = best.end();
        anchor = pos;
    }

    writer.write_last_literals(&input[anchor..])?;
    Ok(writer.written())
}
