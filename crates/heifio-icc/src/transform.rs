//! Color transforms between ICC profiles.

use crate::{IccError, IccResult, Profile};
use lcms2::{Intent, PixelFormat, Transform as LcmsTransform};

/// A relative colorimetric transform between two RGB profiles.
///
/// Works on 32-bit float RGB; integer samples are normalized on the way in
/// and clamped to the destination range on the way out.
///
/// # Example
///
/// ```rust
/// use heifio_icc::{Profile, Transform};
///
/// let linear = Profile::linear_srgb().unwrap();
/// let transform = Transform::new(&linear, &Profile::srgb()).unwrap();
///
/// let mut pixels = [[0.5f32, 0.5, 0.5]];
/// transform.apply(&mut pixels);
/// assert!(pixels[0][0] > 0.7);
/// ```
pub struct Transform {
    inner: LcmsTransform<[f32; 3], [f32; 3]>,
}

impl Transform {
    /// Creates a transform from `source` to `dest`.
    pub fn new(source: &Profile, dest: &Profile) -> IccResult<Self> {
        let inner = LcmsTransform::new(
            &source.inner,
            PixelFormat::RGB_FLT,
            &dest.inner,
            PixelFormat::RGB_FLT,
            Intent::RelativeColorimetric,
        )
        .map_err(|e| IccError::TransformFailed(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Applies the transform to RGB pixels in place.
    pub fn apply(&self, pixels: &mut [[f32; 3]]) {
        self.inner.transform_in_place(pixels);
    }

    /// Applies the transform to interleaved full-range 16-bit samples.
    ///
    /// With `channels == 4` the alpha sample of each pixel is left as is.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is not 3 or 4.
    pub fn apply_u16(&self, samples: &mut [u16], channels: usize) {
        assert!((3..=4).contains(&channels), "expected 3 or 4 channels, got {}", channels);
        let max = u16::MAX as f32;
        let mut pixels: Vec<[f32; 3]> = samples
            .chunks_exact(channels)
            .map(|px| [px[0] as f32 / max, px[1] as f32 / max, px[2] as f32 / max])
            .collect();
        self.apply(&mut pixels);
        for (px, rgb) in samples.chunks_exact_mut(channels).zip(&pixels) {
            for (out, &v) in px.iter_mut().zip(rgb) {
                *out = (v.clamp(0.0, 1.0) * max + 0.5) as u16;
            }
        }
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorimetryDescriptor, try_build_profile};

    fn bt2020_srgb_trc() -> Profile {
        let desc = ColorimetryDescriptor::from_codes(9, 13);
        let color = try_build_profile(&desc).unwrap().unwrap();
        Profile::from_color_profile(&color).unwrap()
    }

    #[test]
    fn test_identity() {
        let srgb = Profile::srgb();
        let transform = Transform::new(&srgb, &srgb).unwrap();
        let original = [0.5f32, 0.3, 0.2];
        let mut pixels = [original];
        transform.apply(&mut pixels);
        for (a, b) in pixels[0].iter().zip(original) {
            assert!((a - b).abs() < 0.01);
        }
    }

    #[test]
    fn test_wide_gamut_to_srgb() {
        let transform = Transform::new(&bt2020_srgb_trc(), &Profile::srgb()).unwrap();

        // Neutrals stay neutral; a reddish tone gets more saturated in sRGB.
        let mut pixels = [[0.5f32, 0.5, 0.5], [0.6, 0.5, 0.5]];
        transform.apply(&mut pixels);
        assert!((pixels[0][0] - 0.5).abs() < 0.01);
        assert!((pixels[0][0] - pixels[0][2]).abs() < 0.01);
        assert!(pixels[1][0] > 0.63, "{:?}", pixels[1]);
        assert!(pixels[1][1] < 0.5, "{:?}", pixels[1]);
    }

    #[test]
    fn test_apply_u16_keeps_alpha() {
        let linear = Profile::linear_srgb().unwrap();
        let transform = Transform::new(&linear, &Profile::srgb()).unwrap();
        let mut samples = [0u16, 32768, 65535, 1234];
        transform.apply_u16(&mut samples, 4);
        assert_eq!(samples[0], 0);
        // linear 0.5 is sRGB ~0.7354
        assert!((samples[1] as f64 / 65535.0 - 0.7354).abs() < 2e-3);
        assert_eq!(samples[2], 65535);
        assert_eq!(samples[3], 1234);
    }

    #[test]
    fn test_out_of_gamut_clamps() {
        let transform = Transform::new(&bt2020_srgb_trc(), &Profile::srgb()).unwrap();
        let mut samples = [65535u16, 0, 0];
        transform.apply_u16(&mut samples, 3);
        assert_eq!(samples, [65535, 0, 0]);
    }
}
