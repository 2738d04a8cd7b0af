//! # heifio-io
//!
//! HEIF/AVIF load and export with color profile handling.
//!
//! # Loading
//!
//! [`load`] decodes the primary image, resolves its color information and
//! reads Exif/XMP:
//!
//! - embedded ICC (`rICC` or `prof`) is attached when it parses as RGB
//! - NCLX colorimetry is mapped through [`heifio_icc::build_profile`]
//! - the image is linear when the attached profile is
//! - 8-bit images load as bytes, deeper images as full-range 16-bit words
//!
//! # Exporting
//!
//! [`export`] writes 8, 10 or 12-bit HEIF (HEVC) or AVIF (AV1), embedding
//! the profile as ICC or writing sRGB NCLX. See [`export::plan_export`] for
//! the profile rules.
//!
//! # Example
//!
//! ```ignore
//! use heifio_io::{export, load, ExportOptions, LoadOptions};
//! use heifio_core::BitDepth;
//!
//! let loaded = load("photo.heic", &LoadOptions::default())?;
//! println!("{} x {}", loaded.image.buffer.width, loaded.image.buffer.height);
//!
//! let opts = ExportOptions::default().with_depth(BitDepth::U10).with_quality(90);
//! export("photo.avif", &loaded.image, &opts)?;
//! ```
//!
//! # Features
//!
//! - `heif`: codec support through libheif. Without it [`load`] and
//!   [`export`] return [`IoError::UnsupportedFormat`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod export;
pub mod heif;
pub mod image;
mod options;

pub use error::{IoError, IoResult};
pub use export::{ExportColor, ExportPlan};
pub use heif::{export, load};
pub use image::{EmbeddedProfile, HostImage, ImageProfile, LoadedImage};
pub use options::{Compression, ExportOptions, LoadOptions};
