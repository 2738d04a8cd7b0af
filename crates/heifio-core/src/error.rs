//! Error types for heifio-core operations.
//!
//! The [`Error`] enum covers failures that can occur while describing or
//! converting sample buffers:
//! - Raw bit counts that have no [`BitDepth`](crate::BitDepth) equivalent
//! - Buffers whose length disagrees with their declared geometry
//! - Storage words that cannot hold the declared depth
//!
//! # Usage
//!
//! ```rust
//! use heifio_core::{BitDepth, Error};
//!
//! let err = BitDepth::from_bits(14).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedBitDepth(14)));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or converting sample buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Bit depth outside the supported `{8, 10, 12, 16}` set.
    ///
    /// Returned at the boundary where a raw bit count (from a codec or the
    /// command line) is turned into a [`BitDepth`](crate::BitDepth).
    #[error("unsupported bit depth: {0} (expected 8, 10, 12 or 16)")]
    UnsupportedBitDepth(u8),

    /// Width or height of zero.
    #[error("invalid dimensions {width}x{height}")]
    EmptyImage {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Channel count other than 3 (RGB) or 4 (RGBA).
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(u32),

    /// Sample count does not match `width * height * channels`.
    #[error("buffer length {actual} does not match {width}x{height}x{channels} = {expected}")]
    LengthMismatch {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Channels per pixel
        channels: u32,
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        actual: usize,
    },

    /// Storage word width cannot represent the declared depth.
    ///
    /// An 8-bit word can only hold 8-bit samples; 10, 12 and 16-bit samples
    /// live in 16-bit words.
    #[error("{depth}-bit samples cannot be stored in {storage}")]
    StorageMismatch {
        /// Declared logical depth in bits
        depth: u32,
        /// Storage format name
        storage: &'static str,
    },

    /// Row stride is too small for the given width and pixel size.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride in bytes
        stride: usize,
        /// Minimum required stride in bytes
        min_stride: usize,
        /// Image width
        width: u32,
    },

    /// Plane data ends before the last row.
    #[error("plane holds {actual} bytes, {expected} required")]
    PlaneTooSmall {
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },
}

impl Error {
    /// Creates an [`Error::LengthMismatch`] error.
    #[inline]
    pub fn length_mismatch(width: u32, height: u32, channels: u32, actual: usize) -> Self {
        Self::LengthMismatch {
            width,
            height,
            channels,
            expected: width as usize * height as usize * channels as usize,
            actual,
        }
    }
}
