//! Core traits for block compression and decompression.
//!
//! These traits are implemented by every strategy in the `lzblock` crate.
//! Both operate on caller-owned buffers; the `_to_vec` helpers are
//! conveniences that size a buffer first.

use crate::error::{LzBlockError, Result};
use crate::format::{MAX_INPUT_SIZE, compress_bound};

/// A block compressor (encoder).
pub trait BlockCompressor {
    /// Compress `input` into `output`.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `output`. On error the contents of
    /// `output` are unspecified.
    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Compress `input` into a freshly allocated buffer of exactly the
    /// produced size.
    fn compress_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        if input.len() > MAX_INPUT_SIZE {
            return Err(LzBlockError::input_too_large(input.len(), MAX_INPUT_SIZE));
        }

        let mut output = vec![0u8; compress_bound(input.len())];
        let written = self.compress_into(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }
}

/// A block decompressor (decoder).
pub trait BlockDecompressor {
    /// Decompress `input` into `output`, which must be exactly the size of
    /// the original data.
    ///
    /// # Returns
    ///
    /// The number of bytes read from `input`, equal to `input.len()` on
    /// success.
    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Decompress `input` when the original size is known.
    fn decompress_to_vec(&mut self, input: &[u8], original_len: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; original_len];
        self.decompress_into(input, &mut output)?;
        Ok(output)
    }
}
