//! # lzblock core
//!
//! Core components shared by the lzblock codec crates:
//!
//! - [`format`]: LZ4 block format constants and [`compress_bound`]
//! - [`traits`]: [`BlockCompressor`] and [`BlockDecompressor`]
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use lzblock_core::format::{MAX_INPUT_SIZE, compress_bound};
//!
//! assert_eq!(compress_bound(1024), 1024 + 4 + 16);
//! assert_eq!(compress_bound(MAX_INPUT_SIZE + 1), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod format;
pub mod traits;

// Re-exports for convenience
pub use error::{ErrorKind, LzBlockError, Result};
pub use format::compress_bound;
pub use traits::{BlockCompressor, BlockDecompressor};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorKind, LzBlockError, Result};
    pub use crate::format::compress_bound;
    pub use crate::traits::{BlockCompressor, BlockDecompressor};
}
