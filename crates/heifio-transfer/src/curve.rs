//! Tone response curves.
//!
//! A [`ToneCurve`] is either a pure power law or an ICC type 4 parametric
//! curve:
//!
//! ```text
//! Y = (a*X + b)^gamma   for X >= d
//! Y = c*X               for X <  d
//! ```
//!
//! Curves evaluate in the decoding direction (encoded sample to linear
//! light); [`ToneCurve::inverse`] goes the other way.

use crate::TransferCharacteristics;
use heifio_core::BitDepth;

/// ICC type 4 parametric curve parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricCurve {
    /// Exponent of the power segment.
    pub gamma: f64,
    /// Slope applied before the power.
    pub a: f64,
    /// Offset applied before the power.
    pub b: f64,
    /// Slope of the linear toe.
    pub c: f64,
    /// Encoded value where the toe ends.
    pub d: f64,
}

impl ParametricCurve {
    /// IEC 61966-2-1 (sRGB).
    pub const SRGB: Self = Self {
        gamma: 2.4,
        a: 1.0 / 1.055,
        b: 0.055 / 1.055,
        c: 1.0 / 12.92,
        d: 0.04045,
    };

    /// BT.709 family.
    pub const REC709: Self = Self {
        gamma: 2.4,
        a: 1.0 / 1.099,
        b: 0.099 / 1.099,
        c: 1.0 / 4.5,
        d: 0.081,
    };

    /// Parameters in lcms2 order `[gamma, a, b, c, d]`.
    pub const fn to_array(&self) -> [f64; 5] {
        [self.gamma, self.a, self.b, self.c, self.d]
    }

    /// Encoded to linear.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        if x >= self.d {
            let base = self.a * x + self.b;
            if base <= 0.0 {
                0.0
            } else {
                base.powf(self.gamma)
            }
        } else {
            self.c * x
        }
    }

    /// Linear to encoded.
    #[inline]
    pub fn inverse(&self, y: f64) -> f64 {
        if y < self.c * self.d {
            y / self.c
        } else if y <= 0.0 {
            0.0
        } else {
            (y.powf(1.0 / self.gamma) - self.b) / self.a
        }
    }
}

/// Tone response curve of one RGB channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneCurve {
    /// Pure power law `Y = X^gamma`; gamma 1.0 is the identity.
    Gamma(f64),
    /// Power law with linear toe.
    Parametric(ParametricCurve),
}

impl ToneCurve {
    /// Identity curve.
    pub const LINEAR: Self = Self::Gamma(1.0);
    /// sRGB curve.
    pub const SRGB: Self = Self::Parametric(ParametricCurve::SRGB);
    /// BT.709 family curve.
    pub const REC709: Self = Self::Parametric(ParametricCurve::REC709);

    /// Selects the curve for a transfer characteristics code.
    ///
    /// Codes without a dedicated curve fall back to sRGB.
    pub const fn for_transfer(transfer: TransferCharacteristics) -> Self {
        use TransferCharacteristics as T;
        match transfer {
            T::Bt709 | T::Bt601 | T::Smpte240M => Self::REC709,
            T::Bt470M => Self::Gamma(2.2),
            T::Bt470Bg => Self::Gamma(2.8),
            T::Linear => Self::LINEAR,
            _ => Self::SRGB,
        }
    }

    /// Short label used in profile descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Parametric(p) if *p == ParametricCurve::REC709 => "Rec709",
            Self::Parametric(_) => "sRGB-TRC",
            Self::Gamma(g) if *g == 1.0 => "linear",
            Self::Gamma(g) if *g == 2.2 => "Gamma2.2",
            Self::Gamma(g) if *g == 2.8 => "Gamma2.8",
            Self::Gamma(_) => "Gamma",
        }
    }

    /// Whether this is the identity curve.
    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Gamma(g) if *g == 1.0)
    }

    /// Encoded to linear.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Gamma(g) => gamma_eval(x, *g),
            Self::Parametric(p) => p.eval(x),
        }
    }

    /// Linear to encoded.
    #[inline]
    pub fn inverse(&self, y: f64) -> f64 {
        match self {
            Self::Gamma(g) => gamma_eval(y, 1.0 / *g),
            Self::Parametric(p) => p.inverse(y),
        }
    }
}

#[inline]
fn gamma_eval(x: f64, g: f64) -> f64 {
    if x <= 0.0 { 0.0 } else { x.powf(g) }
}

/// Re-encodes linear 16-bit color samples with `curve`'s inverse.
///
/// Used when linear host data has to be exported as non-linear samples.
/// With `channels == 4` the alpha sample of each pixel is copied unchanged.
///
/// # Panics
///
/// Panics if `samples.len()` is not a multiple of `channels`.
pub fn encode_linear_u16(samples: &[u16], channels: usize, curve: &ToneCurve) -> Vec<u16> {
    assert!(
        channels > 0 && samples.len() % channels == 0,
        "sample count {} is not a multiple of {} channels",
        samples.len(),
        channels
    );
    let max = BitDepth::U16.max_value() as f64;
    samples
        .chunks_exact(channels)
        .flat_map(|px| {
            px.iter().enumerate().map(move |(i, &v)| {
                if i == 3 {
                    return v;
                }
                let encoded = curve.inverse(v as f64 / max) * max + 0.5;
                encoded.clamp(0.0, max) as u16
            })
        })
        .collect()
}
