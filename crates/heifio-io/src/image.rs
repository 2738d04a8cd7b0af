//! Host-side image model and embedded profile resolution.

use crate::IoResult;
use heifio_core::{BitDepth, SampleBuffer};
use heifio_icc::{ColorProfile, ColorimetryDescriptor, Profile, build_profile};
use tracing::{debug, warn};

/// Color profile attached to a host image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageProfile {
    /// Description built from colorimetry.
    Color(ColorProfile),
    /// Raw ICC bytes taken from a file.
    Icc(Vec<u8>),
}

impl ImageProfile {
    /// Serialized ICC bytes.
    pub fn to_icc(&self) -> IoResult<Vec<u8>> {
        match self {
            Self::Color(color) => Ok(color.to_icc()?),
            Self::Icc(bytes) => Ok(bytes.clone()),
        }
    }

    /// Whether the profile's tone curves are the identity.
    pub fn is_linear(&self) -> bool {
        match self {
            Self::Color(color) => color.is_linear(),
            Self::Icc(bytes) => Profile::from_icc(bytes).is_ok_and(|p| p.is_linear()),
        }
    }

    /// Profile description text.
    pub fn description(&self) -> String {
        match self {
            Self::Color(color) => color.description().to_string(),
            Self::Icc(bytes) => Profile::from_icc(bytes)
                .map(|p| p.description())
                .unwrap_or_default(),
        }
    }
}

impl From<ColorProfile> for ImageProfile {
    fn from(profile: ColorProfile) -> Self {
        Self::Color(profile)
    }
}

/// Image as seen by the host: samples, color space and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct HostImage {
    /// Interleaved RGB or RGBA samples.
    pub buffer: SampleBuffer,
    /// Assigned color profile; `None` means built-in sRGB.
    pub profile: Option<ImageProfile>,
    /// Samples hold linear light.
    pub linear: bool,
    /// Exif payload starting at the TIFF header.
    pub exif: Option<Vec<u8>>,
    /// XMP packet.
    pub xmp: Option<Vec<u8>>,
}

impl HostImage {
    /// Wraps a sample buffer with no profile or metadata.
    pub fn new(buffer: SampleBuffer) -> Self {
        Self {
            buffer,
            profile: None,
            linear: false,
            exif: None,
            xmp: None,
        }
    }

    /// Sets the profile and derives the linear flag from it.
    pub fn with_profile(mut self, profile: ImageProfile) -> Self {
        self.linear = profile.is_linear();
        self.profile = Some(profile);
        self
    }

    /// Marks the samples as linear light.
    pub fn with_linear(mut self, linear: bool) -> Self {
        self.linear = linear;
        self
    }

    /// Profile description, or the built-in sRGB name.
    pub fn profile_description(&self) -> String {
        match &self.profile {
            Some(profile) => profile.description(),
            None => ColorProfile::Srgb.description().to_string(),
        }
    }
}

/// Result of [`load`](crate::load).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    /// Decoded image.
    pub image: HostImage,
    /// Luma bit depth of the coded image.
    pub source_depth: BitDepth,
    /// Color information found in the file.
    pub embedded: EmbeddedProfile,
}

/// Color information carried by a HEIF image handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EmbeddedProfile {
    /// ICC bytes from a `rICC` or `prof` box.
    Icc(Vec<u8>),
    /// NCLX colorimetry.
    Nclx(ColorimetryDescriptor),
    /// No color box.
    #[default]
    None,
}

impl EmbeddedProfile {
    /// Short name of the box kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Icc(_) => "ICC",
            Self::Nclx(_) => "NCLX",
            Self::None => "none",
        }
    }
}

/// Turns embedded color information into an applicable profile.
///
/// ICC data that fails to parse or is not RGB is logged and dropped, as is
/// colorimetry with no profile mapping.
pub fn resolve_profile(embedded: &EmbeddedProfile) -> Option<ImageProfile> {
    match embedded {
        EmbeddedProfile::None => None,
        EmbeddedProfile::Nclx(desc) => {
            let profile = build_profile(desc)?;
            debug!(description = profile.description(), "NCLX profile synthesized");
            Some(ImageProfile::Color(profile))
        }
        EmbeddedProfile::Icc(bytes) => match Profile::from_icc(bytes) {
            Err(e) => {
                warn!(error = %e, "ICC profile loading failed and discarded");
                None
            }
            Ok(p) if p.is_rgb() => {
                debug!(description = %p.description(), "ICC profile attached");
                Some(ImageProfile::Icc(bytes.clone()))
            }
            Ok(p) if p.is_gray() => {
                warn!("gray ICC profile was not applied to the imported image");
                None
            }
            Ok(p) => {
                warn!(
                    color_space = %p.color_space(),
                    "ICC profile was not applied to the imported image"
                );
                None
            }
        },
    }
}

/// Strips everything before the TIFF header of an Exif block.
///
/// HEIF Exif items start with an offset field (and sometimes an `Exif\0\0`
/// marker); the payload hosts expect begins at `II*\0` or `MM\0*`. Returns
/// `None` when no header followed by data is found.
pub fn find_tiff_header(exif: &[u8]) -> Option<&[u8]> {
    const LE: [u8; 4] = *b"II\x2a\x00";
    const BE: [u8; 4] = *b"MM\x00\x2a";
    let start = exif
        .windows(4)
        .position(|w| w == LE || w == BE)?;
    let payload = &exif[start..];
    (payload.len() > 4).then_some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heifio_core::SampleData;

    fn rgb_1x1() -> SampleBuffer {
        SampleBuffer::new(1, 1, 3, BitDepth::U8, SampleData::U8(vec![1, 2, 3])).unwrap()
    }

    #[test]
    fn test_tiff_header_offset_prefix() {
        let mut exif = vec![0, 0, 0, 6];
        exif.extend_from_slice(b"Exif\0\0");
        exif.extend_from_slice(b"II\x2a\x00\x08\x00\x00\x00");
        let payload = find_tiff_header(&exif).unwrap();
        assert_eq!(&payload[..4], b"II\x2a\x00");
        assert_eq!(payload.len(), 8);
    }

    #[test]
    fn test_tiff_header_big_endian() {
        let exif = b"\x00\x00\x00\x00MM\x00\x2a\x00\x00\x00\x08";
        assert_eq!(find_tiff_header(exif).unwrap()[..2], *b"MM");
    }

    #[test]
    fn test_tiff_header_missing_or_empty() {
        assert_eq!(find_tiff_header(b"\x00\x00\x00\x00Exif"), None);
        assert_eq!(find_tiff_header(b"\x00\x00II\x2a\x00"), None);
        assert_eq!(find_tiff_header(&[]), None);
    }

    #[test]
    fn test_resolve_nclx() {
        let srgb = EmbeddedProfile::Nclx(ColorimetryDescriptor::from_codes(1, 13));
        assert_eq!(resolve_profile(&srgb), Some(ImageProfile::Color(ColorProfile::Srgb)));

        let unspecified = EmbeddedProfile::Nclx(ColorimetryDescriptor::from_codes(2, 13));
        assert_eq!(resolve_profile(&unspecified), None);

        let unknown = EmbeddedProfile::Nclx(ColorimetryDescriptor::from_codes(3, 13));
        assert_eq!(resolve_profile(&unknown), None);
        assert_eq!(resolve_profile(&EmbeddedProfile::None), None);
    }

    #[test]
    fn test_resolve_icc() {
        let icc = ColorProfile::LinearSrgb.to_icc().unwrap();
        let resolved = resolve_profile(&EmbeddedProfile::Icc(icc.clone())).unwrap();
        assert_eq!(resolved, ImageProfile::Icc(icc));
        assert!(resolved.is_linear());
        assert_eq!(resolved.description(), "sRGB linear");
    }

    #[test]
    fn test_resolve_invalid_icc() {
        assert_eq!(resolve_profile(&EmbeddedProfile::Icc(vec![1, 2, 3])), None);
    }

    #[test]
    fn test_host_image_profile() {
        let image = HostImage::new(rgb_1x1());
        assert!(!image.linear);
        assert_eq!(image.profile_description(), "sRGB built-in");

        let image = image.with_profile(ImageProfile::Color(ColorProfile::LinearSrgb));
        assert!(image.linear);
        assert_eq!(image.profile_description(), "sRGB linear");
    }

    #[test]
    fn test_embedded_kind() {
        assert_eq!(EmbeddedProfile::default().kind(), "none");
        assert_eq!(EmbeddedProfile::Icc(vec![]).kind(), "ICC");
    }
}
