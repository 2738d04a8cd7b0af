//! Error types for load and export operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format, or codec support not compiled in.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Export bit depth outside 8/10/12.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u32),

    /// Option value out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Sample buffer error.
    #[error(transparent)]
    Buffer(#[from] heifio_core::Error),

    /// ICC profile error.
    #[error(transparent)]
    Icc(#[from] heifio_icc::IccError),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
