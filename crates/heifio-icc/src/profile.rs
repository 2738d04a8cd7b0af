//! ICC profile wrapper.

use crate::{ColorProfile, IccError, IccResult};
use heifio_primaries::Chromaticities;
use heifio_transfer::ToneCurve;
use lcms2::{
    CIExyY, CIExyYTRIPLE, ColorSpaceSignature, InfoType, Locale, MLU, Profile as LcmsProfile, Tag,
    TagSignature, ToneCurve as LcmsToneCurve,
};

/// An ICC color profile.
///
/// Profiles either come from ICC bytes embedded in a file or are created
/// from a [`ColorProfile`] description.
///
/// # Example
///
/// ```rust
/// use heifio_icc::{ColorProfile, Profile};
///
/// let srgb = Profile::from_color_profile(&ColorProfile::Srgb).unwrap();
/// assert!(srgb.is_rgb());
/// assert!(!srgb.is_linear());
/// ```
pub struct Profile {
    pub(crate) inner: LcmsProfile,
}

impl Profile {
    /// Creates a profile from raw ICC data.
    pub fn from_icc(data: &[u8]) -> IccResult<Self> {
        let inner =
            LcmsProfile::new_icc(data).map_err(|e| IccError::InvalidProfile(e.to_string()))?;
        Ok(Self { inner })
    }

    /// The built-in IEC 61966-2-1 sRGB profile.
    pub fn srgb() -> Self {
        Self {
            inner: LcmsProfile::new_srgb(),
        }
    }

    /// sRGB primaries with a gamma 1.0 curve.
    pub fn linear_srgb() -> IccResult<Self> {
        Self::from_color_profile(&ColorProfile::LinearSrgb)
    }

    /// Creates an lcms2 profile from a color profile description.
    ///
    /// Synthesized and linear profiles get description, manufacturer, model
    /// and copyright text tags.
    pub fn from_color_profile(profile: &ColorProfile) -> IccResult<Self> {
        if let ColorProfile::Srgb = profile {
            return Ok(Self::srgb());
        }

        let mut out = Self::new_rgb(&profile.chromaticities(), &profile.curve())?;
        out.write_text(TagSignature::ProfileDescriptionTag, "description", profile.description())?;
        out.write_text(TagSignature::DeviceMfgDescTag, "manufacturer", profile.manufacturer())?;
        out.write_text(TagSignature::DeviceModelDescTag, "model", profile.model())?;
        out.write_text(TagSignature::CopyrightTag, "copyright", profile.copyright())?;
        Ok(out)
    }

    fn new_rgb(chroma: &Chromaticities, curve: &ToneCurve) -> IccResult<Self> {
        let white = xyy(chroma.white);
        let primaries = CIExyYTRIPLE {
            Red: xyy(chroma.red),
            Green: xyy(chroma.green),
            Blue: xyy(chroma.blue),
        };
        let curve = match curve {
            ToneCurve::Gamma(g) => LcmsToneCurve::new(*g),
            ToneCurve::Parametric(p) => LcmsToneCurve::new_parametric(4, &p.to_array())
                .map_err(|e| IccError::CurveFailed(e.to_string()))?,
        };
        let curves = [&curve, &curve, &curve];
        let inner = LcmsProfile::new_rgb(&white, &primaries, &curves)
            .map_err(|e| IccError::CreateFailed(e.to_string()))?;
        Ok(Self { inner })
    }

    fn write_text(&mut self, sig: TagSignature, name: &'static str, text: &str) -> IccResult<()> {
        let mut mlu = MLU::new(1);
        if !mlu.set_text_ascii(text, Locale::new("en_US")) {
            return Err(IccError::TagWriteFailed(name));
        }
        if !self.inner.write_tag(sig, Tag::MLU(&mlu)) {
            return Err(IccError::TagWriteFailed(name));
        }
        Ok(())
    }

    /// Returns the profile description.
    pub fn description(&self) -> String {
        self.inner
            .info(InfoType::Description, Locale::none())
            .unwrap_or_default()
    }

    /// Returns the profile manufacturer.
    pub fn manufacturer(&self) -> String {
        self.inner
            .info(InfoType::Manufacturer, Locale::none())
            .unwrap_or_default()
    }

    /// Returns the profile model.
    pub fn model(&self) -> String {
        self.inner
            .info(InfoType::Model, Locale::none())
            .unwrap_or_default()
    }

    /// Returns the profile copyright.
    pub fn copyright(&self) -> String {
        self.inner
            .info(InfoType::Copyright, Locale::none())
            .unwrap_or_default()
    }

    /// Returns the color space signature.
    pub fn color_space(&self) -> String {
        format!("{:?}", self.inner.color_space())
    }

    /// Returns true if this is an RGB profile.
    pub fn is_rgb(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::RgbData)
    }

    /// Returns true if this is a grayscale profile.
    pub fn is_gray(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::GrayData)
    }

    /// Returns true if all three RGB tone curves are the identity.
    ///
    /// Matrix/TRC profiles only; LUT-based profiles report `false`.
    pub fn is_linear(&self) -> bool {
        if !self.is_rgb() {
            return false;
        }
        [
            TagSignature::RedTRCTag,
            TagSignature::GreenTRCTag,
            TagSignature::BlueTRCTag,
        ]
        .into_iter()
        .all(|sig| match self.inner.read_tag(sig) {
            Tag::ToneCurve(curve) => curve.is_linear(),
            _ => false,
        })
    }

    /// Exports the profile as ICC data.
    pub fn to_icc(&self) -> IccResult<Vec<u8>> {
        self.inner
            .icc()
            .map_err(|e| IccError::CreateFailed(e.to_string()))
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .field("color_space", &self.color_space())
            .finish()
    }
}

#[inline]
fn xyy((x, y): (f64, f64)) -> CIExyY {
    CIExyY { x, y, Y: 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorimetryDescriptor, try_build_profile};

    fn synthesized(primaries: u16, transfer: u16) -> Profile {
        let desc = ColorimetryDescriptor::from_codes(primaries, transfer);
        let cp = try_build_profile(&desc).unwrap().unwrap();
        Profile::from_color_profile(&cp).unwrap()
    }

    #[test]
    fn test_srgb() {
        let profile = Profile::srgb();
        assert!(profile.is_rgb());
        assert!(!profile.is_linear());
        assert!(!profile.description().is_empty());
    }

    #[test]
    fn test_linear_srgb() {
        let profile = Profile::linear_srgb().unwrap();
        assert!(profile.is_rgb());
        assert!(profile.is_linear());
        assert_eq!(profile.description(), "sRGB linear");
    }

    #[test]
    fn test_synthesized_tags() {
        let profile = synthesized(9, 1);
        assert_eq!(profile.description(), "BT.2020 Rec709");
        assert_eq!(profile.model(), "BT.2020 Rec709");
        assert_eq!(profile.manufacturer(), "heifio");
        assert_eq!(profile.copyright(), "Public Domain");
        assert!(!profile.is_linear());
    }

    #[test]
    fn test_synthesized_linear() {
        let profile = synthesized(12, 8);
        assert!(profile.is_linear());
        assert_eq!(profile.description(), "SMPTE EG 432-1 (DCI P3) linear");
    }

    #[test]
    fn test_gamma_curves() {
        for transfer in [4, 5] {
            let profile = synthesized(5, transfer);
            assert!(profile.is_rgb());
            assert!(!profile.is_linear());
        }
    }

    #[test]
    fn test_to_icc() {
        let profile = synthesized(1, 1);
        let data = profile.to_icc().unwrap();
        assert!(data.len() > 128);

        let reloaded = Profile::from_icc(&data).unwrap();
        assert!(reloaded.is_rgb());
        assert_eq!(reloaded.description(), "BT.709 Rec709");
    }

    #[test]
    fn test_invalid_icc() {
        assert!(matches!(
            Profile::from_icc(&[0u8; 16]),
            Err(IccError::InvalidProfile(_))
        ));
    }
}
