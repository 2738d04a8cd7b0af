//! # heifio-transfer
//!
//! Transfer characteristics (H.273 Table 3) and the tone curves used to
//! describe them in ICC profiles.
//!
//! # Terminology
//!
//! - **EOTF**: Encoded -> Linear (decoding stored samples to light)
//! - **OETF**: Linear -> Encoded (recording light into samples)
//! - **Parametric curve**: ICC type 4 curve, a power segment with a linear toe
//!
//! # Curve Selection
//!
//! | Transfer code | Curve | Label |
//! |---------------|-------|-------|
//! | BT.709, BT.601, SMPTE 240M | parametric, gamma 2.4, toe below 0.081 | `Rec709` |
//! | BT.470 System M | gamma 2.2 | `Gamma2.2` |
//! | BT.470 System B/G | gamma 2.8 | `Gamma2.8` |
//! | linear | gamma 1.0 | `linear` |
//! | IEC 61966-2-1 and everything else | parametric sRGB | `sRGB-TRC` |
//!
//! # Usage
//!
//! ```rust
//! use heifio_transfer::{ToneCurve, TransferCharacteristics};
//!
//! let curve = ToneCurve::for_transfer(TransferCharacteristics::Bt470M);
//! assert_eq!(curve.label(), "Gamma2.2");
//! assert!((curve.eval(0.5) - 0.5f64.powf(2.2)).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod curve;

pub use curve::{ParametricCurve, ToneCurve, encode_linear_u16};

/// Transfer characteristics code point (H.273 `TransferCharacteristics`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferCharacteristics {
    /// 1: ITU-R BT.709-5
    Bt709,
    /// 2: Unspecified
    #[default]
    Unspecified,
    /// 4: ITU-R BT.470-6 System M (gamma 2.2)
    Bt470M,
    /// 5: ITU-R BT.470-6 System B, G (gamma 2.8)
    Bt470Bg,
    /// 6: ITU-R BT.601-6
    Bt601,
    /// 7: SMPTE 240M
    Smpte240M,
    /// 8: Linear
    Linear,
    /// 9: Logarithmic (100:1 range)
    Log100,
    /// 10: Logarithmic (100 * sqrt(10):1 range)
    Log316,
    /// 11: IEC 61966-2-4 (xvYCC)
    Iec61966_2_4,
    /// 12: ITU-R BT.1361 extended gamut
    Bt1361,
    /// 13: IEC 61966-2-1 (sRGB)
    Srgb,
    /// 14: ITU-R BT.2020-2 10-bit
    Bt2020Ten,
    /// 15: ITU-R BT.2020-2 12-bit
    Bt2020Twelve,
    /// 16: SMPTE ST 2084 (PQ)
    Pq,
    /// 17: SMPTE ST 428-1
    Smpte428,
    /// 18: ARIB STD-B67 (HLG)
    Hlg,
    /// Any other code point.
    Other(u16),
}

impl TransferCharacteristics {
    /// Maps a raw code point to a variant.
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Bt709,
            2 => Self::Unspecified,
            4 => Self::Bt470M,
            5 => Self::Bt470Bg,
            6 => Self::Bt601,
            7 => Self::Smpte240M,
            8 => Self::Linear,
            9 => Self::Log100,
            10 => Self::Log316,
            11 => Self::Iec61966_2_4,
            12 => Self::Bt1361,
            13 => Self::Srgb,
            14 => Self::Bt2020Ten,
            15 => Self::Bt2020Twelve,
            16 => Self::Pq,
            17 => Self::Smpte428,
            18 => Self::Hlg,
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
            Self::Linear => 8,
            Self::Log100 => 9,
            Self::Log316 => 10,
            Self::Iec61966_2_4 => 11,
            Self::Bt1361 => 12,
            Self::Srgb => 13,
            Self::Bt2020Ten => 14,
            Self::Bt2020Twelve => 15,
            Self::Pq => 16,
            Self::Smpte428 => 17,
            Self::Hlg => 18,
            Self::Other(code) => *code,
        }
    }
}

impl From<u16> for TransferCharacteristics {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl std::fmt::Display for TransferCharacteristics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}
