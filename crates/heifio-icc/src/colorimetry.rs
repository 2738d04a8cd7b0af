//! NCLX colorimetry to color profile mapping.
//!
//! HEIF and AVIF files may describe their color space with an NCLX box
//! (CICP code points) instead of an embedded ICC profile. This module turns
//! such a [`ColorimetryDescriptor`] into a [`ColorProfile`]:
//!
//! 1. Unspecified primaries yield no profile.
//! 2. BT.709 primaries with the sRGB or linear transfer map straight to the
//!    built-in [`ColorProfile::Srgb`] / [`ColorProfile::LinearSrgb`].
//! 3. Everything else is synthesized from the primaries table and the tone
//!    curve the transfer code selects.
//!
//! The mapping is pure; [`Profile::from_color_profile`](crate::Profile::from_color_profile)
//! turns the result into an lcms2 profile.
//!
//! # Example
//!
//! ```rust
//! use heifio_icc::{try_build_profile, ColorimetryDescriptor, ColorProfile};
//! use heifio_primaries::ColorPrimaries;
//! use heifio_transfer::TransferCharacteristics;
//!
//! let desc = ColorimetryDescriptor::new(ColorPrimaries::Bt2020, TransferCharacteristics::Bt709);
//! let profile = try_build_profile(&desc).unwrap().unwrap();
//! assert_eq!(profile.description(), "BT.2020 Rec709");
//! ```

use crate::ColorimetryError;
use glam::{DMat3, DVec3};
use heifio_primaries::{BT709, Chromaticities, ColorPrimaries, rgb_to_xyz_matrix};
use heifio_transfer::{ToneCurve, TransferCharacteristics};

/// Manufacturer text written into synthesized profiles.
pub const MANUFACTURER: &str = "heifio";

/// Copyright text written into synthesized profiles.
pub const COPYRIGHT: &str = "Public Domain";

/// Colorimetry signalled by an NCLX color box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorimetryDescriptor {
    /// Color primaries code.
    pub primaries: ColorPrimaries,
    /// Transfer characteristics code.
    pub transfer: TransferCharacteristics,
    /// Matrix coefficients code (not used for profile synthesis).
    pub matrix_coefficients: u16,
    /// Full-range flag (not used for profile synthesis).
    pub full_range: bool,
    /// Explicit chromaticities; these take precedence over the table.
    pub chromaticities: Option<Chromaticities>,
}

impl ColorimetryDescriptor {
    /// BT.601 matrix coefficients, assumed when none are signalled.
    pub const MATRIX_BT601: u16 = 6;

    /// Creates a descriptor from primaries and transfer codes.
    pub fn new(primaries: ColorPrimaries, transfer: TransferCharacteristics) -> Self {
        Self {
            primaries,
            transfer,
            matrix_coefficients: Self::MATRIX_BT601,
            full_range: true,
            chromaticities: None,
        }
    }

    /// Creates a descriptor from raw code points.
    pub fn from_codes(primaries: u16, transfer: u16) -> Self {
        Self::new(primaries.into(), transfer.into())
    }

    /// Sets explicit chromaticities.
    pub fn with_chromaticities(mut self, chromaticities: Chromaticities) -> Self {
        self.chromaticities = Some(chromaticities);
        self
    }

    /// Sets the matrix coefficients code and range flag.
    pub fn with_matrix(mut self, matrix_coefficients: u16, full_range: bool) -> Self {
        self.matrix_coefficients = matrix_coefficients;
        self.full_range = full_range;
        self
    }
}

/// Profile synthesized from chromaticities and a tone curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedProfile {
    primaries_name: &'static str,
    chromaticities: Chromaticities,
    curve: ToneCurve,
    description: String,
}

impl SynthesizedProfile {
    /// Creates a profile description named `"<primaries_name> <curve label>"`.
    pub fn new(
        primaries_name: &'static str,
        chromaticities: Chromaticities,
        curve: ToneCurve,
    ) -> Self {
        Self {
            primaries_name,
            chromaticities,
            curve,
            description: format!("{} {}", primaries_name, curve.label()),
        }
    }

    /// Name of the primaries set.
    pub fn primaries_name(&self) -> &'static str {
        self.primaries_name
    }
}

/// Color space description produced for an image.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorProfile {
    /// Built-in IEC 61966-2-1 sRGB.
    Srgb,
    /// sRGB primaries with the identity curve.
    LinearSrgb,
    /// Synthesized from NCLX colorimetry.
    Synthesized(SynthesizedProfile),
}

impl ColorProfile {
    /// Chromaticities of the primaries and white point.
    pub fn chromaticities(&self) -> Chromaticities {
        match self {
            Self::Srgb | Self::LinearSrgb => BT709,
            Self::Synthesized(p) => p.chromaticities,
        }
    }

    /// Tone curve shared by the three channels.
    pub fn curve(&self) -> ToneCurve {
        match self {
            Self::Srgb => ToneCurve::SRGB,
            Self::LinearSrgb => ToneCurve::LINEAR,
            Self::Synthesized(p) => p.curve,
        }
    }

    /// Profile description text.
    pub fn description(&self) -> &str {
        match self {
            Self::Srgb => "sRGB built-in",
            Self::LinearSrgb => "sRGB linear",
            Self::Synthesized(p) => &p.description,
        }
    }

    /// Device model text; the description for synthesized profiles.
    pub fn model(&self) -> &str {
        self.description()
    }

    /// Manufacturer text.
    pub fn manufacturer(&self) -> &'static str {
        MANUFACTURER
    }

    /// Copyright text.
    pub fn copyright(&self) -> &'static str {
        COPYRIGHT
    }

    /// Whether pixel values are linear light.
    pub fn is_linear(&self) -> bool {
        self.curve().is_linear()
    }

    /// White point tristimulus values (Y = 1).
    pub fn white_xyz(&self) -> DVec3 {
        self.chromaticities().white_xyz()
    }

    /// RGB to XYZ matrix; its columns are the primaries' tristimulus values.
    pub fn rgb_to_xyz(&self) -> DMat3 {
        rgb_to_xyz_matrix(&self.chromaticities())
    }

    /// Same primaries with the sRGB curve.
    ///
    /// Used to describe linear data once it has been re-encoded for export.
    pub fn with_srgb_trc(&self) -> ColorProfile {
        match self {
            Self::Srgb | Self::LinearSrgb => Self::Srgb,
            Self::Synthesized(p) => Self::Synthesized(SynthesizedProfile::new(
                p.primaries_name,
                p.chromaticities,
                ToneCurve::SRGB,
            )),
        }
    }
}

/// Maps colorimetry to a profile, returning the diagnostic on failure.
///
/// - `Ok(None)`: primaries are unspecified
/// - `Ok(Some(_))`: a built-in or synthesized profile
/// - `Err(_)`: the primaries code is not in the table, or explicit
///   chromaticities are out of range
pub fn try_build_profile(
    desc: &ColorimetryDescriptor,
) -> Result<Option<ColorProfile>, ColorimetryError> {
    if desc.primaries.is_unspecified() {
        return Ok(None);
    }

    if desc.primaries == ColorPrimaries::Bt709 {
        match desc.transfer {
            TransferCharacteristics::Srgb => return Ok(Some(ColorProfile::Srgb)),
            TransferCharacteristics::Linear => return Ok(Some(ColorProfile::LinearSrgb)),
            _ => {}
        }
    }

    let code = desc.primaries.code();
    let (name, table) = match (desc.primaries.name(), desc.primaries.chromaticities()) {
        (Some(name), Some(table)) => (name, table),
        _ => return Err(ColorimetryError::UnsupportedPrimaries(code)),
    };

    let chromaticities = desc.chromaticities.unwrap_or(table);
    if !chromaticities.is_normalized() {
        return Err(ColorimetryError::InvalidChromaticities {
            primaries: code,
            detail: format!("{:?}", chromaticities),
        });
    }

    let curve = ToneCurve::for_transfer(desc.transfer);
    Ok(Some(ColorProfile::Synthesized(SynthesizedProfile::new(
        name,
        chromaticities,
        curve,
    ))))
}

/// Maps colorimetry to a profile, logging and discarding diagnostics.
///
/// Unrecognized colorimetry is reported through `tracing` and treated as
/// "no profile", so a load can continue with assumed sRGB data.
pub fn build_profile(desc: &ColorimetryDescriptor) -> Option<ColorProfile> {
    match try_build_profile(desc) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, "NCLX colorimetry discarded");
            None
        }
    }
}
