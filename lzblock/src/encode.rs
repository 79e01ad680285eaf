//! Sequence encoder.
//!
//! Writes (literal run, match) decisions into a caller-provided buffer using
//! the LZ4 token encoding. Every write is bounds-checked; running out of room
//! aborts the whole call with [`LzBlockError::InsufficientOutputSpace`].

use lzblock_core::error::{LzBlockError, Result};
use lzblock_core::format::{EXTENSION_CONTINUE, MAX_DISTANCE, MIN_MATCH, ML_MASK, RUN_MASK};

/// A match chosen by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Match {
    /// Position of the first matched byte.
    pub start: usize,
    /// Distance back to the earlier copy, `1..=MAX_DISTANCE`.
    pub offset: usize,
    /// Number of matched bytes, at least `MIN_MATCH`.
    pub len: usize,
}

impl Match {
    /// Position just past the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Number of extension bytes needed for a length whose nibble saturated.
#[inline]
fn extension_len(value: usize, mask: usize) -> usize {
    if value >= mask {
        (value - mask) / 255 + 1
    } else {
        0
    }
}

/// Token/sequence writer over a fixed output slice.
pub(crate) struct SequenceWriter<'a> {
    output: &'a mut [u8],
    pos: usize,
}

impl<'a> SequenceWriter<'a> {
    pub fn new(output: &'a mut [u8]) -> Self {
        Self { output, pos: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.pos
    }

    /// Emit literals followed by a match reference.
    pub fn write_sequence(&mut self, literals: &[u8], m: &Match) -> Result<()> {
        debug_assert!(m.offset >= 1 && m.offset <= MAX_DISTANCE);
        debug_assert!(m.len >= MIN_MATCH);

        let match_code = m.len - MIN_MATCH;
        let needed = 1
            + extension_len(literals.len(), RUN_MASK)
            + literals.len()
            + 2
            + extension_len(match_code, ML_MASK);
        self.reserve(needed)?;

        self.put_token(literals.len(), match_code);
        self.put_literals(literals);

        // Offset: 2 bytes little-endian
        self.put(&(m.offset as u16).to_le_bytes());

        if match_code >= ML_MASK {
            self.put_extension(match_code - ML_MASK);
        }
        Ok(())
    }

    /// Emit the closing literal-only sequence.
    pub fn write_last_literals(&mut self, literals: &[u8]) -> Result<()> {
        let needed = 1 + extension_len(literals.len(), RUN_MASK) + literals.len();
        self.reserve(needed)?;

        self.put_token(literals.len(), 0);
        self.put_literals(literals);
        Ok(())
    }

    fn reserve(&self, needed: usize) -> Result<()> {
        let total = self.pos + needed;
        if total > self.output.len() {
            return Err(LzBlockError::insufficient_output(total, self.output.len()));
        }
        Ok(())
    }

    /// Token byte plus literal length extension.
    fn put_token(&mut self, literal_len: usize, match_code: usize) {
        let lit_nibble = literal_len.min(RUN_MASK);
        let match_nibble = match_code.min(ML_MASK);
        self.put(&[((lit_nibble << 4) | match_nibble) as u8]);

        if literal_len >= RUN_MASK {
            self.put_extension(literal_len - RUN_MASK);
        }
    }

    fn put_literals(&mut self, literals: &[u8]) {
        self.put(literals);
    }

    fn put_extension(&mut self, mut remaining: usize) {
        while remaining >= EXTENSION_CONTINUE as usize {
            self.put(&[EXTENSION_CONTINUE]);
            remaining -= EXTENSION_CONTINUE as usize;
        }
        self.put(&[remaining as u8]);
    }

    /// Callers reserve space first.
    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        self.output[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_block_is_single_token() {
        let mut buf = [0xAAu8; 4];
        let mut writer = SequenceWriter::new(&mut buf);
        writer.write_last_literals(&[]).unwrap();
        assert_eq!(writer.written(), 1);
        assert_eq!(buf[0], 0x00);
    }

    #[test]
    fn test_short_sequence_layout() {
        let mut buf = [0u8; 16];
        let mut writer = SequenceWriter::new(&mut buf);
        let m = Match {
            start: 3,
            offset: 0x0102,
            len: 6,
        };
        writer.write_sequence(b"abc", &m).unwrap();
        let n = writer.written();
        assert_eq!(&buf[..n], &[0x32, b'a', b'b', b'c', 0x02, 0x01]);
    }

    #[test]
    fn test_literal_extension_bytes() {
        // 15 + 255 + 10 literals -> nibble 15, then 255, 10
        let literals = vec![b'x'; 280];
        let mut buf = vec![0u8; 300];
        let mut writer = SequenceWriter::new(&mut buf);
        writer.write_last_literals(&literals).unwrap();
        assert_eq!(writer.written(), 1 + 2 + 280);
        assert_eq!(&buf[..3], &[0xF0, 255, 10]);
    }

    #[test]
    fn test_match_extension_bytes() {
        let mut buf = [0u8; 8];
        let mut writer = SequenceWriter::new(&mut buf);
        let m = Match {
            start: 0,
            offset: 1,
            len: MIN_MATCH + 15,
        };
        writer.write_sequence(&[], &m).unwrap();
        let n = writer.written();
        // Exactly saturated nibble still needs a terminating zero byte.
        assert_eq!(&buf[..n], &[0x0F, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_insufficient_space() {
        let mut buf = [0u8; 3];
        let mut writer = SequenceWriter::new(&mut buf);
        let err = writer.write_last_literals(b"abcd").unwrap_err();
        assert_eq!(err, LzBlockError::insufficient_output(5, 3));
        assert_eq!(writer.written(), 0);
    }
}
