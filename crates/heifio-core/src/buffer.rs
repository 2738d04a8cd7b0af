//! Interleaved sample buffers.
//!
//! [`SampleBuffer`] is the hand-off format between the codec and a host
//! image: dense, row-major, `channels` samples per pixel, stored in 8-bit
//! or 16-bit words with a logical [`BitDepth`].
//!
//! Codec planes are row-strided byte slices; [`SampleBuffer::from_plane`]
//! and [`SampleBuffer::write_plane`] convert between the two layouts.
//! 16-bit words in planes are little-endian, matching the `*_LE` chroma
//! layouts requested from the decoder.

use crate::rescale::{narrow_to_u8, rescale_samples, widen_u8};
use crate::{BitDepth, DataFormat, Error, Result};

/// Raw sample storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleData {
    /// 8-bit words.
    U8(Vec<u8>),
    /// 16-bit words; packed depths use the low bits.
    U16(Vec<u16>),
}

impl SampleData {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
        }
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage word format.
    pub fn format(&self) -> DataFormat {
        match self {
            Self::U8(_) => DataFormat::U8,
            Self::U16(_) => DataFormat::U16,
        }
    }

    /// Samples as 16-bit words (8-bit storage is widened).
    pub fn to_u16(&self) -> Vec<u16> {
        match self {
            Self::U8(v) => widen_u8(v),
            Self::U16(v) => v.clone(),
        }
    }
}

/// Dense interleaved RGB or RGBA samples.
///
/// # Example
///
/// ```rust
/// use heifio_core::{BitDepth, SampleBuffer, SampleData};
///
/// let data = SampleData::U16(vec![0, 512, 1023, 1, 2, 3]);
/// let buf = SampleBuffer::new(2, 1, 3, BitDepth::U10, data)?;
/// let wide = buf.convert_depth(BitDepth::U16);
/// assert_eq!(wide.as_u16().unwrap()[1], 32800);
/// # Ok::<(), heifio_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel (3 or 4).
    pub channels: u32,
    /// Logical sample depth.
    pub depth: BitDepth,
    data: SampleData,
}

impl SampleBuffer {
    /// Creates a buffer, validating geometry and storage.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyImage`] if `width` or `height` is zero
    /// - [`Error::UnsupportedChannels`] unless `channels` is 3 or 4
    /// - [`Error::LengthMismatch`] if the sample count is wrong
    /// - [`Error::StorageMismatch`] if `depth` does not fit the storage word
    pub fn new(
        width: u32,
        height: u32,
        channels: u32,
        depth: BitDepth,
        data: SampleData,
    ) -> Result<Self> {
        check_geometry(width, height, channels)?;
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::length_mismatch(width, height, channels, data.len()));
        }
        if data.format() != depth.storage_format() {
            return Err(Error::StorageMismatch {
                depth: depth.bits(),
                storage: data.format().name(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            depth,
            data,
        })
    }

    /// Creates a zero-filled buffer.
    pub fn zeroed(width: u32, height: u32, channels: u32, depth: BitDepth) -> Result<Self> {
        let len = width as usize * height as usize * channels as usize;
        let data = match depth.storage_format() {
            DataFormat::U8 => SampleData::U8(vec![0; len]),
            DataFormat::U16 => SampleData::U16(vec![0; len]),
        };
        Self::new(width, height, channels, depth, data)
    }

    /// Whether the buffer carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Samples per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Raw storage.
    pub fn data(&self) -> &SampleData {
        &self.data
    }

    /// 8-bit samples, if stored as bytes.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            SampleData::U8(v) => Some(v),
            SampleData::U16(_) => None,
        }
    }

    /// 16-bit samples, if stored as words.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.data {
            SampleData::U16(v) => Some(v),
            SampleData::U8(_) => None,
        }
    }

    /// Returns a new buffer rescaled to `target` depth.
    ///
    /// Storage follows the target: 8-bit targets produce byte storage,
    /// everything else 16-bit words.
    pub fn convert_depth(&self, target: BitDepth) -> SampleBuffer {
        if target == self.depth {
            return self.clone();
        }
        let words = rescale_samples(&self.data.to_u16(), self.depth, target);
        let data = match target.storage_format() {
            DataFormat::U8 => SampleData::U8(narrow_to_u8(&words)),
            DataFormat::U16 => SampleData::U16(words),
        };
        SampleBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            depth: target,
            data,
        }
    }

    /// Reads a row-strided codec plane into a dense buffer.
    ///
    /// 16-bit words are read little-endian and masked to `depth` bits.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, if `stride` is shorter than a
    /// row or if `plane` ends before the last row.
    pub fn from_plane(
        plane: &[u8],
        stride: usize,
        width: u32,
        height: u32,
        channels: u32,
        depth: BitDepth,
    ) -> Result<Self> {
        check_geometry(width, height, channels)?;
        let row_bytes = width as usize * channels as usize * depth.bytes_per_channel();
        check_plane(plane.len(), stride, row_bytes, width, height)?;

        let data = match depth.storage_format() {
            DataFormat::U8 => {
                let mut out = Vec::with_capacity(row_bytes * height as usize);
                for row in plane.chunks(stride).take(height as usize) {
                    out.extend_from_slice(&row[..row_bytes]);
                }
                SampleData::U8(out)
            }
            DataFormat::U16 => {
                let mask = depth.max_value();
                let mut out = Vec::with_capacity(row_bytes / 2 * height as usize);
                for row in plane.chunks(stride).take(height as usize) {
                    out.extend(
                        row[..row_bytes]
                            .chunks_exact(2)
                            .map(|b| u16::from_le_bytes([b[0], b[1]]) & mask),
                    );
                }
                SampleData::U16(out)
            }
        };
        Self::new(width, height, channels, depth, data)
    }

    /// Writes the buffer into a row-strided codec plane.
    ///
    /// Padding bytes past each row are left untouched.
    pub fn write_plane(&self, plane: &mut [u8], stride: usize) -> Result<()> {
        // Fields are public; re-check what `new` guaranteed.
        check_geometry(self.width, self.height, self.channels)?;
        let row_bytes = self.row_len() * self.depth.bytes_per_channel();
        check_plane(plane.len(), stride, row_bytes, self.width, self.height)?;

        let row_len = self.row_len();
        let rows = plane.chunks_mut(stride).take(self.height as usize);
        match &self.data {
            SampleData::U8(src) => {
                for (dst, src) in rows.zip(src.chunks(row_len)) {
                    dst[..row_bytes].copy_from_slice(src);
                }
            }
            SampleData::U16(src) => {
                for (dst, src) in rows.zip(src.chunks(row_len)) {
                    for (out, &v) in dst[..row_bytes].chunks_exact_mut(2).zip(src) {
                        out.copy_from_slice(&v.to_le_bytes());
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_geometry(width: u32, height: u32, channels: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    if !(3..=4).contains(&channels) {
        return Err(Error::UnsupportedChannels(channels));
    }
    Ok(())
}

// Callers guarantee width and height are non-zero, so `row_bytes > 0`.
fn check_plane(len: usize, stride: usize, row_bytes: usize, width: u32, height: u32) -> Result<()> {
    if stride < row_bytes {
        return Err(Error::InvalidStride {
            stride,
            min_stride: row_bytes,
            width,
        });
    }
    let required = stride * (height as usize - 1) + row_bytes;
    if len < required {
        return Err(Error::PlaneTooSmall {
            expected: required,
            actual: len,
        });
    }
    Ok(())
}
