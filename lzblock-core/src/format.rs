//! LZ4 block format constants and the worst-case bound.
//!
//! Block layout, repeated until the input is exhausted:
//!
//! ```text
//! token | [literal length ext...] | literals | offset (u16 LE) | [match length ext...]
//! ```
//!
//! The token's high nibble is the literal length, its low nibble the match
//! length minus [`MIN_MATCH`]. A nibble of 15 means extension bytes follow:
//! each 255 adds 255 and continues, the first byte below 255 is added and
//! ends the field. The final sequence has literals only.

/// Minimum match length.
pub const MIN_MATCH: usize = 4;

/// Sliding window size (64 KiB).
pub const WINDOW_SIZE: usize = 1 << 16;

/// Largest encodable match offset.
pub const MAX_DISTANCE: usize = WINDOW_SIZE - 1;

/// Number of bits of the token used for the match length.
pub const ML_BITS: u32 = 4;

/// Mask of the match length nibble.
pub const ML_MASK: usize = (1 << ML_BITS) - 1;

/// Mask of the literal length nibble.
pub const RUN_MASK: usize = (1 << (8 - ML_BITS)) - 1;

/// Extension byte value meaning "add 255 and keep reading".
pub const EXTENSION_CONTINUE: u8 = 255;

/// The last bytes of every block are literals.
pub const LAST_LITERALS: usize = 5;

/// No match may start within this many bytes of the end of input.
pub const MFLIMIT: usize = 12;

/// Inputs shorter than this are always emitted as a single literal run.
pub const MIN_INPUT_LENGTH: usize = MFLIMIT + 1;

/// Largest input a single block may hold.
pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;

/// Worst-case compressed size for `input_size` bytes.
///
/// Returns 0 when `input_size` exceeds [`MAX_INPUT_SIZE`], meaning the input
/// cannot be compressed as one block at all.
///
/// ```
/// use lzblock_core::format::compress_bound;
///
/// assert_eq!(compress_bound(0), 16);
/// assert_eq!(compress_bound(255), 255 + 1 + 16);
/// ```
pub const fn compress_bound(input_size: usize) -> usize {
    if input_size > MAX_INPUT_SIZE {
        0
    } else {
        input_size + input_size / 255 + 16
    }
}
