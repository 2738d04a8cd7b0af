//! HEIF/AVIF codec glue over libheif.
//!
//! Requires the `heif` feature and system libheif >= 1.17.
//!
//! # Setup
//!
//! **Linux:**
//! ```bash
//! apt install libheif-dev   # Debian/Ubuntu
//! dnf install libheif-devel # Fedora
//! ```
//!
//! **macOS:**
//! ```bash
//! brew install libheif
//! ```
//!
//! # Decoding
//!
//! The primary image is decoded to interleaved RGB(A); images coded above
//! 8 bits use little-endian 16-bit chroma. Samples are masked to the coded
//! depth and widened to 16-bit words, 8-bit images stay in bytes.

use crate::{ExportOptions, HostImage, IoError, IoResult, LoadOptions, LoadedImage};
use heifio_core::{BitDepth, SampleBuffer};
use std::path::Path;

/// Depth of the host buffer for a coded depth.
pub fn host_depth(coded: BitDepth) -> BitDepth {
    if coded.is_high() {
        BitDepth::U16
    } else {
        BitDepth::U8
    }
}

/// Reads a decoded interleaved plane into a host buffer.
pub fn decode_plane(
    plane: &[u8],
    stride: usize,
    width: u32,
    height: u32,
    channels: u32,
    coded: BitDepth,
) -> IoResult<SampleBuffer> {
    let buffer = SampleBuffer::from_plane(plane, stride, width, height, channels, coded)?;
    Ok(buffer.convert_depth(host_depth(coded)))
}

/// Loads the primary image of a HEIF or AVIF file.
#[cfg(feature = "heif")]
pub fn load<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> IoResult<LoadedImage> {
    use crate::image::resolve_profile;
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
    use tracing::{debug, info};

    let path = path.as_ref();
    let lib = LibHeif::new();
    let ctx = HeifContext::read_from_file(path_str(path)?)
        .map_err(|e| IoError::DecodeError(format!("{}: {}", path.display(), e)))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| IoError::DecodeError(format!("HEIF handle error: {}", e)))?;

    let width = handle.width();
    let height = handle.height();
    let has_alpha = handle.has_alpha_channel();
    let channels = if has_alpha { 4 } else { 3 };
    let coded = BitDepth::from_bits(handle.luma_bits_per_pixel())?;

    let chroma = match (coded.is_high(), has_alpha) {
        (true, true) => RgbChroma::HdrRgbaLe,
        (true, false) => RgbChroma::HdrRgbLe,
        (false, true) => RgbChroma::Rgba,
        (false, false) => RgbChroma::Rgb,
    };
    debug!(width, height, depth = %coded, has_alpha, "decoding primary image");

    let embedded = embedded_profile(&handle);
    let image = lib
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| IoError::DecodeError(format!("HEIF decode error: {}", e)))?;
    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| IoError::DecodeError("no interleaved plane".into()))?;
    let buffer = decode_plane(plane.data, plane.stride, width, height, channels, coded)?;

    let mut host = HostImage::new(buffer);
    if opts.apply_profile {
        if let Some(profile) = resolve_profile(&embedded) {
            host = host.with_profile(profile);
        }
    }
    let (exif, xmp) = read_metadata(&handle, opts);
    host.exif = exif;
    host.xmp = xmp;

    info!(
        path = %path.display(),
        depth = %coded,
        profile = embedded.kind(),
        linear = host.linear,
        "loaded"
    );
    Ok(LoadedImage {
        image: host,
        source_depth: coded,
        embedded,
    })
}

/// Placeholder when heif feature is disabled.
#[cfg(not(feature = "heif"))]
pub fn load<P: AsRef<Path>>(_path: P, _opts: &LoadOptions) -> IoResult<LoadedImage> {
    Err(IoError::UnsupportedFormat("HEIF support requires 'heif' feature".into()))
}

/// Encodes `image` as HEIF or AVIF.
#[cfg(feature = "heif")]
pub fn export<P: AsRef<Path>>(path: P, image: &HostImage, opts: &ExportOptions) -> IoResult<()> {
    use crate::export::{ExportColor, export_metadata, plan_export, prepare_samples};
    use crate::Compression;
    use libheif_rs::{
        Channel, ColorPrimaries, ColorProfileNCLX, ColorProfileRaw, ColorSpace, CompressionFormat,
        EncoderQuality, HeifContext, Image, LibHeif, MatrixCoefficients, RgbChroma,
        TransferCharacteristics, color_profile_types,
    };
    use tracing::{debug, info};

    let path = path.as_ref();
    opts.validate()?;
    let compression = opts.compression_for(path)?;
    let plan = plan_export(image, opts)?;
    let samples = prepare_samples(&image.buffer, &plan, opts.depth)?;
    debug!(?compression, depth = %opts.depth, linear = plan.linear, "encoding");

    let (width, height) = (samples.width, samples.height);
    let chroma = match (opts.depth.is_high(), samples.has_alpha()) {
        (true, true) => RgbChroma::HdrRgbaLe,
        (true, false) => RgbChroma::HdrRgbLe,
        (false, true) => RgbChroma::Rgba,
        (false, false) => RgbChroma::Rgb,
    };
    let encode_err = |e: libheif_rs::HeifError| IoError::EncodeError(e.to_string());

    let mut heif_image = Image::new(width, height, ColorSpace::Rgb(chroma)).map_err(encode_err)?;
    heif_image
        .create_plane(Channel::Interleaved, width, height, opts.depth.bits() as u8)
        .map_err(encode_err)?;
    {
        let planes = heif_image.planes_mut();
        let plane = planes
            .interleaved
            .ok_or_else(|| IoError::EncodeError("no interleaved plane".into()))?;
        samples.write_plane(plane.data, plane.stride)?;
    }

    match plan.color {
        ExportColor::Icc(bytes) => {
            let raw = ColorProfileRaw::new(color_profile_types::PROF, bytes);
            heif_image.set_color_profile_raw(&raw).map_err(encode_err)?;
        }
        ExportColor::Nclx => {
            let mut nclx = ColorProfileNCLX::new()
                .ok_or_else(|| IoError::EncodeError("cannot allocate NCLX profile".into()))?;
            nclx.set_color_primaries(ColorPrimaries::ITU_R_BT_709_5);
            nclx.set_transfer_characteristics(TransferCharacteristics::IEC_61966_2_1);
            nclx.set_matrix_coefficients(MatrixCoefficients::ITU_R_BT_601_6);
            nclx.set_full_range_flag(1);
            heif_image.set_color_profile_nclx(&nclx).map_err(encode_err)?;
        }
    }

    let lib = LibHeif::new();
    let mut ctx = HeifContext::new().map_err(encode_err)?;
    let format = match compression {
        Compression::Hevc => CompressionFormat::Hevc,
        Compression::Av1 => CompressionFormat::Av1,
    };
    let mut encoder = lib.encoder_for_format(format).map_err(encode_err)?;
    let quality = if opts.lossless {
        EncoderQuality::LossLess
    } else {
        EncoderQuality::Lossy(opts.quality)
    };
    encoder.set_quality(quality).map_err(encode_err)?;
    let handle = ctx
        .encode_image(&heif_image, &mut encoder, None)
        .map_err(encode_err)?;

    let (exif, xmp) = export_metadata(image, opts);
    if let Some(exif) = exif {
        ctx.add_exif_metadata(&handle, exif).map_err(encode_err)?;
    }
    if let Some(xmp) = xmp {
        ctx.add_xmp_metadata(&handle, xmp).map_err(encode_err)?;
    }

    ctx.write_to_file(path_str(path)?).map_err(encode_err)?;
    info!(path = %path.display(), format = compression.name(), depth = %opts.depth, "exported");
    Ok(())
}

/// Placeholder when heif feature is disabled.
#[cfg(not(feature = "heif"))]
pub fn export<P: AsRef<Path>>(_path: P, _image: &HostImage, _opts: &ExportOptions) -> IoResult<()> {
    Err(IoError::UnsupportedFormat("HEIF support requires 'heif' feature".into()))
}

#[cfg(feature = "heif")]
fn path_str(path: &Path) -> IoResult<&str> {
    path.to_str()
        .ok_or_else(|| IoError::UnsupportedFormat(format!("non UTF-8 path: {}", path.display())))
}

#[cfg(feature = "heif")]
fn embedded_profile(handle: &libheif_rs::ImageHandle) -> crate::EmbeddedProfile {
    use crate::EmbeddedProfile;
    use heifio_icc::ColorimetryDescriptor;
    use libheif_rs::color_profile_types;
    use tracing::warn;

    let typ = handle.color_profile_type();
    if typ == color_profile_types::R_ICC || typ == color_profile_types::PROF {
        match handle.color_profile_raw() {
            Some(raw) => EmbeddedProfile::Icc(raw.data),
            None => {
                warn!("ICC profile loading failed and discarded");
                EmbeddedProfile::None
            }
        }
    } else if typ == color_profile_types::NCLX {
        match handle.color_profile_nclx() {
            Some(nclx) => EmbeddedProfile::Nclx(
                ColorimetryDescriptor::from_codes(
                    nclx.color_primaries() as u16,
                    nclx.transfer_characteristics() as u16,
                )
                .with_matrix(nclx.matrix_coefficients() as u16, nclx.full_range_flag() != 0),
            ),
            None => {
                warn!("NCLX profile loading failed and discarded");
                EmbeddedProfile::None
            }
        }
    } else if typ == color_profile_types::NOT_PRESENT {
        EmbeddedProfile::None
    } else {
        warn!("unknown color profile type has been discarded");
        EmbeddedProfile::None
    }
}

#[cfg(feature = "heif")]
fn read_metadata(
    handle: &libheif_rs::ImageHandle,
    opts: &LoadOptions,
) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
    use crate::image::find_tiff_header;
    use tracing::warn;

    let exif = if opts.read_exif {
        handle
            .metadata_block_ids(b"Exif")
            .first()
            .and_then(|&id| match handle.metadata(id) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(error = %e, "Exif block unreadable");
                    None
                }
            })
            .and_then(|data| find_tiff_header(&data).map(<[u8]>::to_vec))
    } else {
        None
    };

    let xmp = if opts.read_xmp {
        handle
            .metadata_block_ids(b"mime")
            .into_iter()
            .find(|&id| handle.metadata_content_type(id) == Some("application/rdf+xml"))
            .and_then(|id| handle.metadata(id).ok())
    } else {
        None
    };

    (exif, xmp)
}
