//! # heifio-primaries
//!
//! Color primaries as signalled by CICP code points (ITU-T H.273 Table 2),
//! the code points NCLX color boxes carry in HEIF and AVIF files.
//!
//! Each recognized code maps to a named set of CIE xy chromaticities for the
//! red, green and blue primaries and the white point. From those, this crate
//! derives the RGB to XYZ matrix and white point tristimulus values.
//!
//! # Included Primaries
//!
//! | Code | Name | White |
//! |------|------|-------|
//! | 1 | BT.709 | D65 |
//! | 4 | BT.470-6 System M | C |
//! | 5 | BT.470-6 System BG | D65 |
//! | 6 | BT.601 | D65 |
//! | 7 | SMPTE 240M | D65 |
//! | 8 | Generic film | C |
//! | 9 | BT.2020 | D65 |
//! | 10 | XYZ | E |
//! | 11 | SMPTE RP 431-2 | DCI |
//! | 12 | SMPTE EG 432-1 (DCI P3) | D65 |
//! | 22 | EBU Tech. 3213-E | D65 |
//!
//! # Usage
//!
//! ```rust
//! use heifio_primaries::{ColorPrimaries, rgb_to_xyz_matrix};
//! use glam::DVec3;
//!
//! let p = ColorPrimaries::from_code(9);
//! assert_eq!(p.name(), Some("BT.2020"));
//!
//! let m = rgb_to_xyz_matrix(&p.chromaticities().unwrap());
//! let white = m * DVec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use glam::{DMat3, DVec3};

/// CIE xy chromaticities of three primaries and a white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticities {
    /// Red primary (x, y)
    pub red: (f64, f64),
    /// Green primary (x, y)
    pub green: (f64, f64),
    /// Blue primary (x, y)
    pub blue: (f64, f64),
    /// White point (x, y)
    pub white: (f64, f64),
}

impl Chromaticities {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> DVec3 {
        xy_to_xyz(self.white.0, self.white.1)
    }

    /// Whether every coordinate lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        [self.red, self.green, self.blue, self.white]
            .iter()
            .all(|&(x, y)| (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y))
    }
}

// ============================================================================
// Standard White Points
// ============================================================================

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f64, f64) = (0.3127, 0.3290);

/// Illuminant C chromaticity (NTSC 1953, generic film).
pub const ILLUMINANT_C_XY: (f64, f64) = (0.310, 0.316);

/// DCI white point chromaticity (theatrical projection).
pub const DCI_XY: (f64, f64) = (0.314, 0.351);

/// Equal-energy illuminant E.
pub const ILLUMINANT_E_XY: (f64, f64) = (1.0 / 3.0, 1.0 / 3.0);

// ============================================================================
// Chromaticity Table
// ============================================================================

/// BT.709 / sRGB.
pub const BT709: Chromaticities = Chromaticities {
    red: (0.640, 0.330),
    green: (0.300, 0.600),
    blue: (0.150, 0.060),
    white: D65_XY,
};

/// BT.470-6 System M (NTSC 1953).
pub const BT470_M: Chromaticities = Chromaticities {
    red: (0.670, 0.330),
    green: (0.210, 0.710),
    blue: (0.140, 0.080),
    white: ILLUMINANT_C_XY,
};

/// BT.470-6 System B, G (PAL/SECAM).
pub const BT470_BG: Chromaticities = Chromaticities {
    red: (0.640, 0.330),
    green: (0.290, 0.600),
    blue: (0.150, 0.060),
    white: D65_XY,
};

/// BT.601 (SMPTE 170M). SMPTE 240M shares these values.
pub const BT601: Chromaticities = Chromaticities {
    red: (0.630, 0.340),
    green: (0.310, 0.595),
    blue: (0.155, 0.070),
    white: D65_XY,
};

/// Generic film (color filters using Illuminant C).
pub const GENERIC_FILM: Chromaticities = Chromaticities {
    red: (0.681, 0.319),
    green: (0.243, 0.692),
    blue: (0.145, 0.049),
    white: ILLUMINANT_C_XY,
};

/// BT.2020 / BT.2100.
pub const BT2020: Chromaticities = Chromaticities {
    red: (0.708, 0.292),
    green: (0.170, 0.797),
    blue: (0.131, 0.046),
    white: D65_XY,
};

/// SMPTE ST 428-1 (CIE 1931 XYZ).
pub const XYZ: Chromaticities = Chromaticities {
    red: (1.0, 0.0),
    green: (0.0, 1.0),
    blue: (0.0, 0.0),
    white: ILLUMINANT_E_XY,
};

/// SMPTE RP 431-2 (DCI-P3, DCI white).
pub const DCI_P3: Chromaticities = Chromaticities {
    red: (0.680, 0.320),
    green: (0.265, 0.690),
    blue: (0.150, 0.060),
    white: DCI_XY,
};

/// SMPTE EG 432-1 (P3 with D65 white).
pub const DISPLAY_P3: Chromaticities = Chromaticities {
    red: (0.680, 0.320),
    green: (0.265, 0.690),
    blue: (0.150, 0.060),
    white: D65_XY,
};

/// EBU Tech. 3213-E.
pub const EBU_3213: Chromaticities = Chromaticities {
    red: (0.630, 0.340),
    green: (0.295, 0.605),
    blue: (0.155, 0.077),
    white: D65_XY,
};

/// Color primaries code point (H.273 `ColourPrimaries`).
///
/// Codes without a variant are kept in [`ColorPrimaries::Other`] so they can
/// be reported rather than silently mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorPrimaries {
    /// 1: ITU-R BT.709-5
    Bt709,
    /// 2: Unspecified
    #[default]
    Unspecified,
    /// 4: ITU-R BT.470-6 System M
    Bt470M,
    /// 5: ITU-R BT.470-6 System B, G
    Bt470Bg,
    /// 6: ITU-R BT.601-6
    Bt601,
    /// 7: SMPTE 240M
    Smpte240M,
    /// 8: Generic film
    GenericFilm,
    /// 9: ITU-R BT.2020-2 and BT.2100-0
    Bt2020,
    /// 10: SMPTE ST 428-1 (XYZ)
    Xyz,
    /// 11: SMPTE RP 431-2
    SmpteRp431,
    /// 12: SMPTE EG 432-1
    SmpteEg432,
    /// 22: EBU Tech. 3213-E
    Ebu3213,
    /// Any other code point (reserved or unknown).
    Other(u16),
}

impl ColorPrimaries {
    /// Maps a raw code point to a variant.
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Bt709,
            2 => Self::Unspecified,
            4 => Self::Bt470M,
            5 => Self::Bt470Bg,
            6 => Self::Bt601,
            7 => Self::Smpte240M,
            8 => Self::GenericFilm,
            9 => Self::Bt2020,
            10 => Self::Xyz,
            11 => Self::SmpteRp431,
            12 => Self::SmpteEg432,
            22 => Self::Ebu3213,
            other => Self::Other(other),
        }
    }

    /// Raw code point.
    pub const fn code(&self) -> u16 {
        match self {
            Self::Bt709 => 1,
            Self::Unspecified => 2,
            Self::Bt470M => 4,
            Self::Bt470Bg => 5,
            Self::Bt601 => 6,
            Self::Smpte240M => 7,
            Self::GenericFilm => 8,
            Self::Bt2020 => 9,
            Self::Xyz => 10,
            Self::SmpteRp431 => 11,
            Self::SmpteEg432 => 12,
            Self::Ebu3213 => 22,
            Self::Other(code) => *code,
        }
    }

    /// Whether this is the unspecified sentinel.
    #[inline]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }

    /// Human-readable name, `None` for unspecified or unknown codes.
    pub const fn name(&self) -> Option<&'static str> {
        match self {
            Self::Bt709 => Some("BT.709"),
            Self::Bt470M => Some("BT.470-6 System M"),
            Self::Bt470Bg => Some("BT.470-6 System BG"),
            Self::Bt601 => Some("BT.601"),
            Self::Smpte240M => Some("SMPTE 240M"),
            Self::GenericFilm => Some("Generic film"),
            Self::Bt2020 => Some("BT.2020"),
            Self::Xyz => Some("XYZ"),
            Self::SmpteRp431 => Some("SMPTE RP 431-2"),
            Self::SmpteEg432 => Some("SMPTE EG 432-1 (DCI P3)"),
            Self::Ebu3213 => Some("EBU Tech. 3213-E"),
            Self::Unspecified | Self::Other(_) => None,
        }
    }

    /// Chromaticities, `None` for unspecified or unknown codes.
    pub const fn chromaticities(&self) -> Option<Chromaticities> {
        match self {
            Self::Bt709 => Some(BT709),
            Self::Bt470M => Some(BT470_M),
            Self::Bt470Bg => Some(BT470_BG),
            Self::Bt601 | Self::Smpte240M => Some(BT601),
            Self::GenericFilm => Some(GENERIC_FILM),
            Self::Bt2020 => Some(BT2020),
            Self::Xyz => Some(XYZ),
            Self::SmpteRp431 => Some(DCI_P3),
            Self::SmpteEg432 => Some(DISPLAY_P3),
            Self::Ebu3213 => Some(EBU_3213),
            Self::Unspecified | Self::Other(_) => None,
        }
    }
}

impl From<u16> for ColorPrimaries {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl std::fmt::Display for ColorPrimaries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.code()),
            None if self.is_unspecified() => write!(f, "unspecified (2)"),
            None => write!(f, "unknown ({})", self.code()),
        }
    }
}

// ============================================================================
// Matrix Generation
// ============================================================================

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f64, y: f64) -> DVec3 {
    if y.abs() < 1e-10 {
        DVec3::ZERO
    } else {
        DVec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of chromaticities.
///
/// Primaries with `y = 0` (the XYZ "primaries") are handled by placing the
/// primary on the unit axis instead of projecting through Y=1.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y=1)
/// 2. Compute scaling factors so white point maps correctly
/// 3. Multiply primaries by scaling factors
pub fn rgb_to_xyz_matrix(c: &Chromaticities) -> DMat3 {
    let r = primary_xyz(c.red);
    let g = primary_xyz(c.green);
    let b = primary_xyz(c.blue);
    let w = c.white_xyz();

    let m = DMat3::from_cols(r, g, b);
    if m.determinant().abs() < 1e-12 {
        return DMat3::IDENTITY;
    }
    let s = m.inverse() * w;
    DMat3::from_cols(r * s.x, g * s.y, b * s.z)
}

/// Tristimulus direction of a primary; `y = 0` uses `(x, y, 1-x-y)` directly.
fn primary_xyz((x, y): (f64, f64)) -> DVec3 {
    if y.abs() < 1e-10 {
        DVec3::new(x, y, 1.0 - x - y)
    } else {
        xy_to_xyz(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const KNOWN: [u16; 11] = [1, 4, 5, 6, 7, 8, 9, 10, 11, 12, 22];

    #[test]
    fn test_code_round_trip() {
        for code in 0..=255u16 {
            assert_eq!(ColorPrimaries::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_known_codes_have_table_entries() {
        for code in KNOWN {
            let p = ColorPrimaries::from_code(code);
            assert!(p.name().is_some(), "code {code}");
            let c = p.chromaticities().unwrap();
            assert!(c.is_normalized(), "code {code}");
        }
    }

    #[test]
    fn test_unmapped_codes() {
        assert!(ColorPrimaries::from_code(2).is_unspecified());
        assert_eq!(ColorPrimaries::from_code(3), ColorPrimaries::Other(3));
        assert!(ColorPrimaries::from_code(13).chromaticities().is_none());
        assert_eq!(ColorPrimaries::Other(99).to_string(), "unknown (99)");
    }

    #[test]
    fn test_bt709_matrix() {
        let m = rgb_to_xyz_matrix(&BT709);
        // Red column, row X and Y
        assert_abs_diff_eq!(m.x_axis.x, 0.4124564, epsilon = 1e-4);
        assert_abs_diff_eq!(m.x_axis.y, 0.2126729, epsilon = 1e-4);
        assert_abs_diff_eq!(m.y_axis.y, 0.7151522, epsilon = 1e-4);
    }

    #[test]
    fn test_white_maps_to_white_point() {
        for code in KNOWN {
            let c = ColorPrimaries::from_code(code).chromaticities().unwrap();
            let white = rgb_to_xyz_matrix(&c) * DVec3::ONE;
            let expected = c.white_xyz();
            assert_abs_diff_eq!(white.x, expected.x, epsilon = 1e-9);
            assert_abs_diff_eq!(white.y, 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(white.z, expected.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_roundtrip() {
        let to_xyz = rgb_to_xyz_matrix(&BT2020);
        let to_rgb = to_xyz.inverse();
        let rgb = DVec3::new(0.5, 0.3, 0.8);
        let back = to_rgb * (to_xyz * rgb);
        assert_abs_diff_eq!(rgb.x, back.x, epsilon = 1e-9);
        assert_abs_diff_eq!(rgb.y, back.y, epsilon = 1e-9);
        assert_abs_diff_eq!(rgb.z, back.z, epsilon = 1e-9);
    }

    #[test]
    fn test_xyz_primaries_are_identity() {
        let m = rgb_to_xyz_matrix(&XYZ);
        assert_abs_diff_eq!(m.x_axis.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.y_axis.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.z_axis.z, 1.0, epsilon = 1e-9);
    }
}
