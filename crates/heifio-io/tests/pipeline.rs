//! Decode-side and export-side sample paths meet without loss.

use heifio_core::{BitDepth, SampleBuffer, SampleData};
use heifio_icc::{ColorProfile, ColorimetryDescriptor};
use heifio_io::export::{plan_export, prepare_samples};
use heifio_io::heif::decode_plane;
use heifio_io::image::resolve_profile;
use heifio_io::{EmbeddedProfile, ExportColor, ExportOptions, HostImage};

fn plane_10bit(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

#[test]
fn ten_bit_survives_load_and_export() {
    let words: Vec<u16> = (0..2 * 2 * 3).map(|i| (i * 93) as u16).collect();
    let plane = plane_10bit(&words);
    let buffer = decode_plane(&plane, 2 * 3 * 2, 2, 2, 3, BitDepth::U10).unwrap();
    assert_eq!(buffer.depth, BitDepth::U16);

    let image = HostImage::new(buffer);
    let opts = ExportOptions::default().with_depth(BitDepth::U10);
    let plan = plan_export(&image, &opts).unwrap();
    let out = prepare_samples(&image.buffer, &plan, opts.depth).unwrap();
    assert_eq!(out.as_u16().unwrap(), &words[..]);
}

#[test]
fn linear_nclx_image_exports_linear_profile() {
    let embedded = EmbeddedProfile::Nclx(ColorimetryDescriptor::from_codes(9, 8));
    let profile = resolve_profile(&embedded).unwrap();

    let data = SampleData::U16(vec![0, 1000, 65535]);
    let buffer = SampleBuffer::new(1, 1, 3, BitDepth::U16, data).unwrap();
    let image = HostImage::new(buffer.clone()).with_profile(profile);
    assert!(image.linear);

    let plan = plan_export(&image, &ExportOptions::default().with_depth(BitDepth::U12)).unwrap();
    assert!(plan.linear);
    assert!(!plan.encode_srgb);
    assert!(matches!(plan.color, ExportColor::Icc(_)));

    let out = prepare_samples(&image.buffer, &plan, BitDepth::U12).unwrap();
    assert_eq!(out, buffer.convert_depth(BitDepth::U12));
}

#[test]
fn unprofiled_linear_image_is_reencoded() {
    let data = SampleData::U16(vec![0, 32768, 65535]);
    let buffer = SampleBuffer::new(1, 1, 3, BitDepth::U16, data).unwrap();
    let image = HostImage::new(buffer).with_linear(true);

    let plan = plan_export(&image, &ExportOptions::default().with_depth(BitDepth::U8)).unwrap();
    assert!(plan.encode_srgb);
    let out = prepare_samples(&image.buffer, &plan, BitDepth::U8).unwrap();
    let bytes = out.as_u8().unwrap();
    assert_eq!(bytes[0], 0);
    assert_eq!(bytes[2], 255);
    // sRGB(0.5 linear) * 255 ~ 187.5
    assert!((187..=188).contains(&bytes[1]), "{}", bytes[1]);

    let desc = heifio_icc::Profile::from_icc(plan.icc().unwrap()).unwrap().description();
    assert_eq!(desc, ColorProfile::Srgb.description());
}

#[test]
fn bt2020_image_without_profile_is_converted_to_srgb() {
    let embedded = EmbeddedProfile::Nclx(ColorimetryDescriptor::from_codes(9, 13));
    let profile = resolve_profile(&embedded).unwrap();

    // BT.2020 gray and a muted red, sRGB-TRC encoded
    let words = vec![32768, 32768, 32768, 39321, 32768, 32768];
    let buffer = SampleBuffer::new(2, 1, 3, BitDepth::U16, SampleData::U16(words)).unwrap();
    let image = HostImage::new(buffer).with_profile(profile);

    let opts = ExportOptions::default().with_profile(false);
    let plan = plan_export(&image, &opts).unwrap();
    assert_eq!(plan.color, ExportColor::Nclx);
    assert!(plan.icc().is_none());

    let out = prepare_samples(&image.buffer, &plan, opts.depth).unwrap();
    let bytes = out.as_u8().unwrap();
    assert!((127..=129).contains(&bytes[0]), "{bytes:?}");
    // unconverted, the red would be written as 153
    assert!(bytes[3] >= 160, "{bytes:?}");
    assert!(bytes[4] <= 126, "{bytes:?}");
}

#[cfg(feature = "heif")]
#[test]
fn heif_file_round_trip() {
    use heifio_io::{LoadOptions, export, load};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.heic");

    let pixels: Vec<u16> = (0..16 * 16 * 3).map(|i| ((i * 37) % 1024) as u16).collect();
    let buffer = SampleBuffer::new(16, 16, 3, BitDepth::U10, SampleData::U16(pixels)).unwrap();
    let image = HostImage::new(buffer.convert_depth(BitDepth::U16))
        .with_profile(ColorProfile::Srgb.into());
    let opts = ExportOptions::default().with_depth(BitDepth::U10).with_quality(90);
    export(&path, &image, &opts).unwrap();

    let loaded = load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.source_depth, BitDepth::U10);
    assert_eq!(loaded.image.buffer.width, 16);
    assert_eq!(loaded.image.buffer.depth, BitDepth::U16);
    assert_eq!(loaded.embedded.kind(), "ICC");
    assert!(!loaded.image.linear);
}
