//! Load and export options.

use crate::{IoError, IoResult};
use heifio_core::BitDepth;
use std::path::Path;

/// Codec used for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// HEVC in a HEIF container (`.heif`, `.heic`, `.hif`).
    #[default]
    Hevc,
    /// AV1 in an AVIF container (`.avif`).
    Av1,
}

impl Compression {
    /// Detects the codec from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "heif" | "heic" | "hif" => Some(Self::Hevc),
            "avif" => Some(Self::Av1),
            _ => None,
        }
    }

    /// Format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hevc => "HEIF",
            Self::Av1 => "AVIF",
        }
    }
}

/// Options for [`load`](crate::load).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Resolve and attach the embedded color profile.
    pub apply_profile: bool,
    /// Read the Exif metadata block.
    pub read_exif: bool,
    /// Read the XMP metadata block.
    pub read_xmp: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            apply_profile: true,
            read_exif: true,
            read_xmp: true,
        }
    }
}

impl LoadOptions {
    /// Skips Exif and XMP.
    pub fn without_metadata(mut self) -> Self {
        self.read_exif = false;
        self.read_xmp = false;
        self
    }
}

/// Options for [`export`](crate::export).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Encoder quality, 0 to 100.
    pub quality: u8,
    /// Lossless encoding; overrides `quality`.
    pub lossless: bool,
    /// Bit depth of the encoded samples: 8, 10 or 12.
    pub depth: BitDepth,
    /// Embed the color profile as ICC; otherwise write sRGB NCLX.
    pub save_profile: bool,
    /// Attach Exif when present.
    pub save_exif: bool,
    /// Attach XMP when present.
    pub save_xmp: bool,
    /// Codec; detected from the output extension when unset.
    pub compression: Option<Compression>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            quality: 50,
            lossless: false,
            depth: BitDepth::U8,
            save_profile: true,
            save_exif: true,
            save_xmp: true,
            compression: None,
        }
    }
}

impl ExportOptions {
    /// Sets the encoder quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Enables or disables lossless encoding.
    pub fn with_lossless(mut self, lossless: bool) -> Self {
        self.lossless = lossless;
        self
    }

    /// Sets the export bit depth.
    pub fn with_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Enables or disables embedding the color profile.
    pub fn with_profile(mut self, save: bool) -> Self {
        self.save_profile = save;
        self
    }

    /// Forces the codec.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Checks depth and quality ranges.
    pub fn validate(&self) -> IoResult<()> {
        if self.depth == BitDepth::U16 {
            return Err(IoError::UnsupportedBitDepth(self.depth.bits()));
        }
        if self.quality > 100 {
            return Err(IoError::InvalidOption(format!(
                "quality {} is outside 0..=100",
                self.quality
            )));
        }
        Ok(())
    }

    /// Codec for `path`: the explicit choice, else the extension.
    pub fn compression_for(&self, path: &Path) -> IoResult<Compression> {
        self.compression
            .or_else(|| Compression::from_path(path))
            .ok_or_else(|| {
                IoError::UnsupportedFormat(format!(
                    "cannot pick HEIF or AVIF for {}",
                    path.display()
                ))
            })
    }
}
