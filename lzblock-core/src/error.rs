//! Error types for lzblock operations.
//!
//! Every failure of a compress or decompress call is terminal: the call
//! returns one of these variants and the destination buffer contents are
//! unspecified. Nothing is retried internally.

use thiserror::Error;

/// The main error type for lzblock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LzBlockError {
    /// Compression ran out of destination space.
    ///
    /// Retrying with a buffer of at least `compress_bound(input.len())`
    /// bytes always succeeds.
    #[error("Insufficient output space: need at least {needed} bytes, have {available}")]
    InsufficientOutputSpace {
        /// Minimum number of bytes the encoder needed at the failing write.
        needed: usize,
        /// Size of the destination buffer.
        available: usize,
    },

    /// Input is larger than the format can account for.
    #[error("Input too large: {size} bytes exceeds maximum block input of {max} bytes")]
    InputTooLarge {
        /// Size of the rejected input.
        size: usize,
        /// Maximum accepted input size.
        max: usize,
    },

    /// A literal or match copy would write past the end of the destination.
    #[error("Output overrun at input offset {offset}: need {needed} bytes, have {available}")]
    OutputOverrun {
        /// Byte offset in the compressed input where the copy was decoded.
        offset: u64,
        /// Number of output bytes the copy required in total.
        needed: usize,
        /// Size of the destination buffer.
        available: usize,
    },

    /// The compressed stream ended early.
    #[error("Input truncated at offset {offset}: {message}")]
    InputTruncated {
        /// Byte offset in the compressed input where decoding stopped.
        offset: u64,
        /// What the decoder was reading when the input ran out.
        message: String,
    },

    /// A match offset is zero or reaches before the start of the output.
    #[error("Corrupt offset {distance} at input offset {offset}: only {history} bytes decoded")]
    CorruptOffset {
        /// Byte offset in the compressed input where the match offset was read.
        offset: u64,
        /// The decoded match distance.
        distance: usize,
        /// Number of bytes already written to the output.
        history: usize,
    },
}

/// Fieldless classification of [`LzBlockError`].
///
/// Useful for callers that map results onto status codes and do not care
/// about offsets or sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`LzBlockError::InsufficientOutputSpace`].
    InsufficientOutputSpace,
    /// See [`LzBlockError::InputTooLarge`].
    InputTooLarge,
    /// See [`LzBlockError::OutputOverrun`].
    OutputOverrun,
    /// See [`LzBlockError::InputTruncated`].
    InputTruncated,
    /// See [`LzBlockError::CorruptOffset`].
    CorruptOffset,
}

/// Result type alias for lzblock operations.
pub type Result<T> = std::result::Result<T, LzBlockError>;

impl LzBlockError {
    /// Create an insufficient output space error.
    pub fn insufficient_output(needed: usize, available: usize) -> Self {
        Self::InsufficientOutputSpace { needed, available }
    }

    /// Create an input too large error.
    pub fn input_too_large(size: usize, max: usize) -> Self {
        Self::InputTooLarge { size, max }
    }

    /// Create an output overrun error.
    pub fn output_overrun(offset: usize, needed: usize, available: usize) -> Self {
        Self::OutputOverrun {
            offset: offset as u64,
            needed,
            available,
        }
    }

    /// Create an input truncated error.
    pub fn truncated(offset: usize, message: impl Into<String>) -> Self {
        Self::InputTruncated {
            offset: offset as u64,
            message: message.into(),
        }
    }

    /// Create a corrupt offset error.
    pub fn corrupt_offset(offset: usize, distance: usize, history: usize) -> Self {
        Self::CorruptOffset {
            offset: offset as u64,
            distance,
            history,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientOutputSpace { .. } => ErrorKind::InsufficientOutputSpace,
            Self::InputTooLarge { .. } => ErrorKind::InputTooLarge,
            Self::OutputOverrun { .. } => ErrorKind::OutputOverrun,
            Self::InputTruncated { .. } => ErrorKind::InputTruncated,
            Self::CorruptOffset { .. } => ErrorKind::CorruptOffset,
        }
    }

    /// Whether this error was raised while decoding a compressed block.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::OutputOverrun | ErrorKind::InputTruncated | ErrorKind::CorruptOffset
        )
    }
}
