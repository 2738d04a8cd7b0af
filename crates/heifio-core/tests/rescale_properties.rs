//! Exhaustive property checks for sample rescaling.
//!
//! Every 10-bit and 12-bit code value is swept, so these double as a
//! regression guard for rounding changes.

use heifio_core::{BitDepth, SampleBuffer, SampleData, rescale_sample, rescale_samples};

const HDR_DEPTHS: [BitDepth; 2] = [BitDepth::U10, BitDepth::U12];

fn all_values(depth: BitDepth) -> Vec<u16> {
    (0..=depth.max_value()).collect()
}

#[test]
fn round_trip_through_16_bit_is_exact() {
    for depth in HDR_DEPTHS {
        let original = all_values(depth);
        let wide = rescale_samples(&original, depth, BitDepth::U16);
        let back = rescale_samples(&wide, BitDepth::U16, depth);
        assert_eq!(back, original, "{depth} round trip");
    }
}

#[test]
fn round_trip_8_bit_through_16_bit_is_exact() {
    let original = all_values(BitDepth::U8);
    let wide = rescale_samples(&original, BitDepth::U8, BitDepth::U16);
    assert_eq!(rescale_samples(&wide, BitDepth::U16, BitDepth::U8), original);
}

#[test]
fn rescale_is_monotonic() {
    for src in BitDepth::ALL {
        for dst in BitDepth::ALL {
            let out = rescale_samples(&all_values(src), src, dst);
            assert!(
                out.windows(2).all(|w| w[0] <= w[1]),
                "{src} -> {dst} not monotonic"
            );
        }
    }
}

#[test]
fn output_stays_in_destination_range() {
    for src in BitDepth::ALL {
        for dst in BitDepth::ALL {
            let out = rescale_samples(&all_values(src), src, dst);
            assert!(out.iter().all(|&v| v <= dst.max_value()), "{src} -> {dst}");
        }
    }
}

#[test]
fn endpoints_map_to_endpoints() {
    for src in BitDepth::ALL {
        for dst in BitDepth::ALL {
            assert_eq!(rescale_sample(0, src, dst), 0);
            assert_eq!(rescale_sample(src.max_value(), src, dst), dst.max_value());
        }
    }
}

#[test]
fn identity_is_passthrough() {
    for depth in BitDepth::ALL {
        let buf: Vec<u16> = all_values(depth).into_iter().rev().collect();
        assert_eq!(rescale_samples(&buf, depth, depth), buf);
    }
}

#[test]
fn ten_bit_mid_range_example() {
    assert_eq!(rescale_samples(&[512], BitDepth::U10, BitDepth::U16), vec![32800]);
    assert_eq!(rescale_samples(&[32800], BitDepth::U16, BitDepth::U10), vec![512]);
}

#[test]
fn buffer_import_export_cycle() {
    // 2x2 RGBA at 12 bits, as a decoder would hand it over.
    let samples: Vec<u16> = (0..16).map(|i| i * 273).collect();
    let decoded =
        SampleBuffer::new(2, 2, 4, BitDepth::U12, SampleData::U16(samples.clone())).unwrap();

    let host = decoded.convert_depth(BitDepth::U16);
    assert!(host.has_alpha());
    assert_eq!(host.depth, BitDepth::U16);

    let exported = host.convert_depth(BitDepth::U12);
    assert_eq!(exported.as_u16().unwrap(), samples.as_slice());
}
