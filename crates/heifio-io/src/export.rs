//! Export planning.
//!
//! Decides what color information goes into the file and prepares the
//! samples for the coded bit depth. Everything here is codec independent;
//! the libheif glue only copies the results into an encoder image.

use crate::{ExportOptions, HostImage, ImageProfile, IoResult};
use heifio_core::{BitDepth, SampleBuffer, SampleData};
use heifio_icc::{ColorProfile, Profile, Transform};
use heifio_transfer::{ToneCurve, encode_linear_u16};
use tracing::debug;

/// Color information written with the encoded image.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportColor {
    /// ICC bytes stored as a `prof` box.
    Icc(Vec<u8>),
    /// sRGB NCLX: BT.709 primaries, IEC 61966-2-1 transfer, BT.601 matrix,
    /// full range.
    Nclx,
}

/// Result of [`plan_export`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    /// Color box to write.
    pub color: ExportColor,
    /// ICC profile the samples are converted from into sRGB.
    pub convert_from: Option<Vec<u8>>,
    /// Linear samples must be re-encoded with the sRGB curve.
    pub encode_srgb: bool,
    /// The written samples are linear light.
    pub linear: bool,
}

/// Chooses the color box and sample encoding for `image`.
///
/// With `save_profile`:
/// - an assigned profile is embedded as is;
/// - otherwise the effective built-in profile is used. Linear data stored
///   above 8 bits is re-encoded and tagged with the sRGB curve; 8-bit linear
///   data keeps the linear profile.
///
/// Without it, sRGB NCLX is written. Samples with an assigned profile other
/// than built-in sRGB are converted to sRGB; unprofiled linear data is
/// re-encoded with the sRGB curve.
pub fn plan_export(image: &HostImage, opts: &ExportOptions) -> IoResult<ExportPlan> {
    if !opts.save_profile {
        let convert_from = match &image.profile {
            None | Some(ImageProfile::Color(ColorProfile::Srgb)) => None,
            Some(profile) => Some(profile.to_icc()?),
        };
        return Ok(ExportPlan {
            color: ExportColor::Nclx,
            encode_srgb: image.linear && convert_from.is_none(),
            convert_from,
            linear: false,
        });
    }

    if let Some(profile) = &image.profile {
        return Ok(ExportPlan {
            color: ExportColor::Icc(profile.to_icc()?),
            convert_from: None,
            encode_srgb: false,
            linear: profile.is_linear(),
        });
    }

    let plan = if !image.linear {
        ExportPlan {
            color: ExportColor::Icc(ColorProfile::Srgb.to_icc()?),
            convert_from: None,
            encode_srgb: false,
            linear: false,
        }
    } else if image.buffer.depth.is_high() {
        ExportPlan {
            color: ExportColor::Icc(ColorProfile::LinearSrgb.with_srgb_trc().to_icc()?),
            convert_from: None,
            encode_srgb: true,
            linear: false,
        }
    } else {
        ExportPlan {
            color: ExportColor::Icc(ColorProfile::LinearSrgb.to_icc()?),
            convert_from: None,
            encode_srgb: false,
            linear: true,
        }
    };
    Ok(plan)
}

/// Produces the samples to encode at `target` depth.
///
/// Profile conversion and re-encoding work on 16-bit words; the result is
/// then rescaled.
pub fn prepare_samples(
    buffer: &SampleBuffer,
    plan: &ExportPlan,
    target: BitDepth,
) -> IoResult<SampleBuffer> {
    let channels = buffer.channels as usize;
    let words = || buffer.convert_depth(BitDepth::U16).data().to_u16();

    let encoded = if let Some(icc) = &plan.convert_from {
        debug!(depth = %buffer.depth, "converting samples to sRGB");
        let transform = Transform::new(&Profile::from_icc(icc)?, &Profile::srgb())?;
        let mut samples = words();
        transform.apply_u16(&mut samples, channels);
        samples
    } else if plan.encode_srgb {
        debug!(depth = %buffer.depth, "re-encoding linear samples with the sRGB curve");
        encode_linear_u16(&words(), channels, &ToneCurve::SRGB)
    } else {
        return Ok(buffer.convert_depth(target));
    };

    let encoded = SampleBuffer::new(
        buffer.width,
        buffer.height,
        buffer.channels,
        BitDepth::U16,
        SampleData::U16(encoded),
    )?;
    Ok(encoded.convert_depth(target))
}

/// Exif and XMP payloads to attach.
pub fn export_metadata<'a>(
    image: &'a HostImage,
    opts: &ExportOptions,
) -> (Option<&'a [u8]>, Option<&'a [u8]>) {
    let exif = image.exif.as_deref().filter(|_| opts.save_exif);
    let xmp = image.xmp.as_deref().filter(|_| opts.save_xmp);
    (exif, xmp)
}

impl ExportPlan {
    /// ICC bytes, if a profile is embedded.
    pub fn icc(&self) -> Option<&[u8]> {
        match &self.color {
            ExportColor::Icc(bytes) => Some(bytes),
            ExportColor::Nclx => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heifio_icc::{ColorimetryDescriptor, SynthesizedProfile};

    fn image(depth: BitDepth, linear: bool) -> HostImage {
        let buffer = SampleBuffer::zeroed(2, 1, 3, depth).unwrap();
        HostImage::new(buffer).with_linear(linear)
    }

    fn description(plan: &ExportPlan) -> String {
        Profile::from_icc(plan.icc().unwrap()).unwrap().description()
    }

    fn bt2020_srgb_trc() -> ImageProfile {
        let desc = ColorimetryDescriptor::from_codes(9, 13);
        heifio_icc::build_profile(&desc).unwrap().into()
    }

    #[test]
    fn test_no_profile_writes_srgb_nclx() {
        let opts = ExportOptions::default().with_profile(false);
        let plan = plan_export(&image(BitDepth::U16, true), &opts).unwrap();
        assert_eq!(plan.color, ExportColor::Nclx);
        assert_eq!(plan.convert_from, None);
        assert!(plan.encode_srgb);
        assert!(!plan.linear);

        let plan = plan_export(&image(BitDepth::U8, false), &opts).unwrap();
        assert!(!plan.encode_srgb);

        let srgb = image(BitDepth::U8, false).with_profile(ColorProfile::Srgb.into());
        let plan = plan_export(&srgb, &opts).unwrap();
        assert_eq!(plan.convert_from, None);
    }

    #[test]
    fn test_no_profile_converts_wide_gamut_to_srgb() {
        let opts = ExportOptions::default().with_profile(false);
        let img = image(BitDepth::U16, false).with_profile(bt2020_srgb_trc());
        let plan = plan_export(&img, &opts).unwrap();
        assert_eq!(plan.color, ExportColor::Nclx);
        assert!(plan.convert_from.is_some());
        assert!(!plan.encode_srgb);

        // neutral gray, then a reddish tone that gains saturation in sRGB
        let buffer = SampleBuffer::new(
            2,
            1,
            3,
            BitDepth::U16,
            SampleData::U16(vec![32768, 32768, 32768, 39321, 32768, 32768]),
        )
        .unwrap();
        let out = prepare_samples(&buffer, &plan, BitDepth::U8).unwrap();
        let v = out.as_u8().unwrap();
        assert!(v[..3].iter().all(|&c| (127..=129).contains(&c)), "{v:?}");
        assert!(v[3] >= 160, "{v:?}");
        assert!(v[4] <= 126, "{v:?}");
    }

    #[test]
    fn test_no_profile_linear_profile_is_encoded_by_transform() {
        let opts = ExportOptions::default().with_profile(false);
        let img = image(BitDepth::U16, true).with_profile(ColorProfile::LinearSrgb.into());
        let plan = plan_export(&img, &opts).unwrap();
        assert!(plan.convert_from.is_some());
        assert!(!plan.encode_srgb);

        let buffer = SampleBuffer::new(
            1,
            1,
            4,
            BitDepth::U16,
            SampleData::U16(vec![0, 32768, 65535, 4112]),
        )
        .unwrap();
        let out = prepare_samples(&buffer, &plan, BitDepth::U8).unwrap();
        let v = out.as_u8().unwrap();
        assert_eq!(v[0], 0);
        assert!((187..=188).contains(&v[1]), "{v:?}");
        assert_eq!(v[2], 255);
        // alpha is only rescaled
        assert_eq!(v[3], 16);
    }

    #[test]
    fn test_assigned_profile_kept() {
        let chroma = heifio_primaries::BT2020;
        let bt2020 = SynthesizedProfile::new("BT.2020", chroma, ToneCurve::LINEAR);
        let profile = ColorProfile::Synthesized(bt2020);
        let img = image(BitDepth::U16, false).with_profile(profile.into());
        let plan = plan_export(&img, &ExportOptions::default()).unwrap();
        assert!(plan.linear);
        assert!(!plan.encode_srgb);
        assert_eq!(description(&plan), "BT.2020 linear");
    }

    #[test]
    fn test_linear_high_depth_becomes_srgb_trc() {
        let plan = plan_export(&image(BitDepth::U16, true), &ExportOptions::default()).unwrap();
        assert!(plan.encode_srgb);
        assert!(!plan.linear);
        assert!(!Profile::from_icc(plan.icc().unwrap()).unwrap().is_linear());
    }

    #[test]
    fn test_linear_8bit_keeps_linear_profile() {
        let plan = plan_export(&image(BitDepth::U8, true), &ExportOptions::default()).unwrap();
        assert!(!plan.encode_srgb);
        assert!(plan.linear);
        assert_eq!(description(&plan), "sRGB linear");
    }

    #[test]
    fn test_prepare_rescales() {
        let buffer = SampleBuffer::new(
            1,
            1,
            3,
            BitDepth::U16,
            SampleData::U16(vec![0, 32800, 65535]),
        )
        .unwrap();
        let plan = ExportPlan {
            color: ExportColor::Nclx,
            convert_from: None,
            encode_srgb: false,
            linear: false,
        };
        let out = prepare_samples(&buffer, &plan, BitDepth::U10).unwrap();
        assert_eq!(out.as_u16().unwrap(), &[0, 512, 1023]);
    }

    #[test]
    fn test_prepare_encodes_linear() {
        let buffer = SampleBuffer::new(
            1,
            1,
            4,
            BitDepth::U16,
            SampleData::U16(vec![0, 32768, 65535, 1000]),
        )
        .unwrap();
        let plan = ExportPlan {
            color: ExportColor::Nclx,
            convert_from: None,
            encode_srgb: true,
            linear: false,
        };
        let out = prepare_samples(&buffer, &plan, BitDepth::U12).unwrap();
        let v = out.as_u16().unwrap();
        assert_eq!(v[0], 0);
        // linear 0.5 is sRGB ~0.7354
        assert!((v[1] as f64 / 4095.0 - 0.7354).abs() < 2e-3);
        assert_eq!(v[2], 4095);
        // alpha passes through the curve unchanged
        assert_eq!(v[3], heifio_core::rescale_sample(1000, BitDepth::U16, BitDepth::U12));
    }

    #[test]
    fn test_metadata_filter() {
        let mut img = image(BitDepth::U8, false);
        img.exif = Some(vec![1]);
        img.xmp = Some(vec![2]);
        let opts = ExportOptions {
            save_xmp: false,
            ..ExportOptions::default()
        };
        assert_eq!(export_metadata(&img, &opts), (Some(&[1u8][..]), None));
    }
}
