//! LZ4 block decoder.
//!
//! The decoder is a small state machine over the compressed bytes. Every
//! length read from the stream is checked against both the remaining input
//! and the remaining output before any byte is copied, so malformed input
//! produces an error and never an out-of-bounds access.

use lzblock_core::error::{LzBlockError, Result};
use lzblock_core::format::{EXTENSION_CONTINUE, MIN_MATCH, ML_MASK, RUN_MASK};
use lzblock_core::traits::BlockDecompressor;

/// Outcome of decoding one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Compressed bytes consumed.
    pub bytes_read: usize,
    /// Decompressed bytes produced.
    pub bytes_written: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadToken,
    ReadLiteralExtension { literal_len: usize, match_nibble: usize },
    CopyLiterals { literal_len: usize, match_nibble: usize },
    ReadOffset { match_nibble: usize },
    ReadMatchExtension { offset: usize },
    CopyMatch { offset: usize, match_len: usize },
    Done,
}

/// LZ4 block decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockDecoder;

impl BlockDecoder {
    /// Create a decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode a whole block into `output`.
    ///
    /// Decoding ends when the input is exhausted right after a literal run.
    /// `output` may be larger than the decoded data; the number of bytes
    /// actually produced is reported in [`Decoded::bytes_written`].
    pub fn decode(&self, input: &[u8], output: &mut [u8]) -> Result<Decoded> {
        let mut cursor = Cursor { input, pos: 0 };
        let mut written = 0usize;
        let mut state = State::ReadToken;

        loop {
            state = match state {
                State::ReadToken => {
                    let token = cursor.read_byte("token")? as usize;
                    let literal_len = token >> 4;
                    let match_nibble = token & ML_MASK;
                    if literal_len == RUN_MASK {
                        State::ReadLiteralExtension {
                            literal_len,
                            match_nibble,
                        }
                    } else {
                        State::CopyLiterals {
                            literal_len,
                            match_nibble,
                        }
                    }
                }
                State::ReadLiteralExtension {
                    literal_len,
                    match_nibble,
                } => State::CopyLiterals {
                    literal_len: cursor.read_extension(literal_len, "literal length")?,
                    match_nibble,
                },
                State::CopyLiterals {
                    literal_len,
                    match_nibble,
                } => {
                    let end = written.saturating_add(literal_len);
                    if end > output.len() {
                        return Err(LzBlockError::output_overrun(
                            cursor.pos,
                            end,
                            output.len(),
                        ));
                    }
                    let literals = cursor.read_slice(literal_len, "literals")?;
                    output[written..end].copy_from_slice(literals);
                    written = end;

                    if cursor.is_empty() {
                        State::Done
                    } else {
                        State::ReadOffset { match_nibble }
                    }
                }
                State::ReadOffset { match_nibble } => {
                    let at = cursor.pos;
                    let offset = cursor.read_u16_le("match offset")? as usize;
                    if offset == 0 || offset > written {
                        return Err(LzBlockError::corrupt_offset(at, offset, written));
                    }
                    if match_nibble == ML_MASK {
                        State::ReadMatchExtension { offset }
                    } else {
                        State::CopyMatch {
                            offset,
                            match_len: match_nibble + MIN_MATCH,
                        }
                    }
                }
                State::ReadMatchExtension { offset } => State::CopyMatch {
                    offset,
                    match_len: cursor
                        .read_extension(ML_MASK, "match length")?
                        .saturating_add(MIN_MATCH),
                },
                State::CopyMatch { offset, match_len } => {
                    let end = written.saturating_add(match_len);
                    if end > output.len() {
                        return Err(LzBlockError::output_overrun(
                            cursor.pos,
                            end,
                            output.len(),
                        ));
                    }
                    // Byte by byte: the source may overlap bytes written by this copy.
                    let start = written - offset;
                    for i in 0..match_len {
                        output[written + i] = output[start + i];
                    }
                    written = end;
                    State::ReadToken
                }
                State::Done => break,
            };
        }

        Ok(Decoded {
            bytes_read: cursor.pos,
            bytes_written: written,
        })
    }

    /// Decode a block whose original size is exactly `output.len()`.
    ///
    /// Returns the number of compressed bytes read, which is always
    /// `input.len()` on success.
    pub fn decompress(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let decoded = self.decode(input, output)?;
        if decoded.bytes_written != output.len() {
            return Err(LzBlockError::truncated(
                decoded.bytes_read,
                format!(
                    "block ended after {} of {} bytes",
                    decoded.bytes_written,
                    output.len()
                ),
            ));
        }
        tracing::debug!(
            input = decoded.bytes_read,
            output = decoded.bytes_written,
            "block decompressed"
        );
        Ok(decoded.bytes_read)
    }
}

impl BlockDecompressor for BlockDecoder {
    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        BlockDecoder::decompress(self, input, output)
    }
}

/// Bounds-checked reader over the compressed bytes.
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn read_byte(&mut self, what: &str) -> Result<u8> {
        let b = *self
            .input
            .get(self.pos)
            .ok_or_else(|| LzBlockError::truncated(self.pos, format!("missing {what}")))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_u16_le(&mut self, what: &str) -> Result<u16> {
        let bytes = self.read_slice(2, what)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_slice(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let available = self.input.len() - self.pos;
        if len > available {
            return Err(LzBlockError::truncated(
                self.pos,
                format!("{what} need {len} bytes, {available} left"),
            ));
        }
        let slice = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Add 255-continuation extension bytes to a saturated nibble.
    fn read_extension(&mut self, base: usize, what: &str) -> Result<usize> {
        let mut len = base;
        loop {
            let b = self.read_byte(what)?;
            len = len.saturating_add(b as usize);
            if b != EXTENSION_CONTINUE {
                return Ok(len);
            }
        }
    }
}

/// Decompress a block whose original size is exactly `output.len()`.
///
/// Returns the number of compressed bytes read.
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    BlockDecoder::new().decompress(input, output)
}

/// Decompress a block of unknown size, producing at most `max_output` bytes.
///
/// `max_output` is an upper bound: the result is truncated to the bytes the
/// block actually decodes to. This differs from
/// [`BlockDecompressor::decompress_to_vec`], whose length must match the
/// original size exactly.
pub fn decompress_to_vec(input: &[u8], max_output: usize) -> Result<Vec<u8>> {
    let mut output = vec![0u8; max_output];
    let decoded = BlockDecoder::new().decode(input, &mut output)?;
    output.truncate(decoded.bytes_written);
    Ok(output)
}
