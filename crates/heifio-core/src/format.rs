//! Bit depth and storage formats.
//!
//! # Types
//!
//! - [`BitDepth`] - Logical sample precision, including the packed 10/12-bit
//!   depths HEIF and AVIF use for HDR content
//! - [`DataFormat`] - Storage word the samples live in (U8 or U16)
//!
//! # Usage
//!
//! ```rust
//! use heifio_core::format::{BitDepth, DataFormat};
//!
//! // 10-bit HEVC output is right-justified in 16-bit words
//! let depth = BitDepth::U10;
//! assert_eq!(depth.storage_format(), DataFormat::U16);
//! assert_eq!(depth.max_value(), 1023);
//! ```

use crate::{Error, Result};

/// Logical bit depth of integer samples.
///
/// Samples of a packed depth (10 or 12 bits) occupy the low bits of a 16-bit
/// word; the upper bits are zero.
///
/// # Variants
///
/// - `U8` - 8-bit [0, 255]
/// - `U10` - 10-bit [0, 1023] (HDR HEIC/AVIF)
/// - `U12` - 12-bit [0, 4095]
/// - `U16` - 16-bit [0, 65535] (host high-precision buffers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    #[default]
    U8,
    /// 10-bit unsigned integer.
    U10,
    /// 12-bit unsigned integer.
    U12,
    /// 16-bit unsigned integer.
    U16,
}

impl BitDepth {
    /// Every supported depth, lowest first.
    pub const ALL: [BitDepth; 4] = [Self::U8, Self::U10, Self::U12, Self::U16];

    /// Converts a raw bit count into a depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBitDepth`] for anything but 8, 10, 12 or 16.
    ///
    /// # Example
    ///
    /// ```rust
    /// use heifio_core::BitDepth;
    /// assert_eq!(BitDepth::from_bits(12).unwrap(), BitDepth::U12);
    /// assert!(BitDepth::from_bits(24).is_err());
    /// ```
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            8 => Ok(Self::U8),
            10 => Ok(Self::U10),
            12 => Ok(Self::U12),
            16 => Ok(Self::U16),
            other => Err(Error::UnsupportedBitDepth(other)),
        }
    }

    /// Number of bits per channel.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U10 => 10,
            Self::U12 => 12,
            Self::U16 => 16,
        }
    }

    /// Whether samples of this depth need a 16-bit storage word.
    #[inline]
    pub const fn is_high(&self) -> bool {
        !matches!(self, Self::U8)
    }

    /// Maximum representable value, `2^bits - 1`.
    #[inline]
    pub const fn max_value(&self) -> u16 {
        match self {
            Self::U8 => 255,
            Self::U10 => 1023,
            Self::U12 => 4095,
            Self::U16 => 65535,
        }
    }

    /// Returns the smallest [`DataFormat`] that can store this bit depth.
    ///
    /// Packed formats (10-bit, 12-bit) require U16 storage.
    #[inline]
    pub const fn storage_format(&self) -> DataFormat {
        match self {
            Self::U8 => DataFormat::U8,
            Self::U10 | Self::U12 | Self::U16 => DataFormat::U16,
        }
    }

    /// Bytes needed per channel in storage format.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        self.storage_format().bytes_per_channel()
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        Self::from_bits(bits)
    }
}

/// Storage word of sample data in memory.
///
/// - `BitDepth::U10`, `U12` and `U16` all use `DataFormat::U16`
/// - Use [`BitDepth::storage_format()`] to get the appropriate storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    #[default]
    U16,
}

impl DataFormat {
    /// Number of bytes per channel.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<DataFormat> for BitDepth {
    /// Full-range depth of a storage word.
    fn from(fmt: DataFormat) -> Self {
        match fmt {
            DataFormat::U8 => BitDepth::U8,
            DataFormat::U16 => BitDepth::U16,
        }
    }
}

impl From<BitDepth> for DataFormat {
    /// Converts to storage format. Packed formats become U16.
    fn from(depth: BitDepth) -> Self {
        depth.storage_format()
    }
}
