//! Sample bit depth rescaling.
//!
//! Maps integer samples linearly from `[0, 2^src - 1]` onto `[0, 2^dst - 1]`:
//!
//! ```text
//! dst = trunc(src * (2^dst - 1) / (2^src - 1) + 0.5), clamped to [0, 2^dst - 1]
//! ```
//!
//! Every sample is converted independently; there is no cross-channel or
//! cross-pixel state, so large buffers are split across the rayon pool.
//!
//! Import rescales decoded 10/12-bit samples up to 16 bits for the host
//! buffer. Export rescales the host's 16-bit samples down to the encoder
//! depth. Equal depths only mask.

use crate::BitDepth;
use rayon::prelude::*;

/// Buffers shorter than this are converted on the calling thread.
const PARALLEL_MIN_LEN: usize = 1 << 14;

/// Rescales a single sample from `src` to `dst` depth.
///
/// Bits above `src` are masked off before scaling, matching the invariant
/// that packed samples are right-justified with zero upper bits. The same
/// mask applies when `src == dst`, so the result is always below `2^dst`.
///
/// # Example
///
/// ```rust
/// use heifio_core::{rescale_sample, BitDepth};
///
/// assert_eq!(rescale_sample(512, BitDepth::U10, BitDepth::U16), 32800);
/// assert_eq!(rescale_sample(32800, BitDepth::U16, BitDepth::U10), 512);
/// ```
#[inline]
pub fn rescale_sample(value: u16, src: BitDepth, dst: BitDepth) -> u16 {
    let src_max = src.max_value();
    if src == dst {
        return value & src_max;
    }
    let dst_max = dst.max_value();
    let v = (value & src_max) as f64;
    let scaled = v * dst_max as f64 / src_max as f64 + 0.5;
    scaled.clamp(0.0, dst_max as f64) as u16
}

/// Rescales a buffer of samples from `src` to `dst` depth.
///
/// Returns a freshly allocated buffer of the same length. When
/// `src == dst` the samples are copied with bits above `src` cleared.
///
/// # Example
///
/// ```rust
/// use heifio_core::{rescale_samples, BitDepth};
///
/// let out = rescale_samples(&[0, 2048, 4095], BitDepth::U12, BitDepth::U16);
/// assert_eq!(out, vec![0, 32776, 65535]);
/// ```
pub fn rescale_samples(samples: &[u16], src: BitDepth, dst: BitDepth) -> Vec<u16> {
    if samples.len() < PARALLEL_MIN_LEN {
        return samples.iter().map(|&v| rescale_sample(v, src, dst)).collect();
    }
    samples
        .par_iter()
        .with_min_len(PARALLEL_MIN_LEN)
        .map(|&v| rescale_sample(v, src, dst))
        .collect()
}

/// Widens 8-bit storage words to 16-bit words without changing values.
///
/// The result still holds 8-bit logical samples; pair with
/// [`rescale_samples`] to change depth.
pub fn widen_u8(samples: &[u8]) -> Vec<u16> {
    samples.iter().map(|&v| v as u16).collect()
}

/// Narrows 16-bit words holding 8-bit logical samples to 8-bit storage.
///
/// Values above 255 saturate.
pub fn narrow_to_u8(samples: &[u16]) -> Vec<u8> {
    samples.iter().map(|&v| v.min(255) as u8).collect()
}
