//! # heifio-core
//!
//! Core types for moving HEIF/AVIF pixel data between a codec and a host
//! image buffer.
//!
//! This crate provides the foundational types used throughout heifio:
//!
//! - [`BitDepth`] - Logical sample precision (8, 10, 12, 16 bit)
//! - [`SampleBuffer`] - Dense interleaved RGB/RGBA samples in 8 or 16-bit words
//! - [`rescale_samples`] - Linear rescaling between integer sample ranges
//! - [`Error`] - Core error type
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other heifio crates depend on it:
//!
//! ```text
//! heifio-core (this crate)
//!    ^
//!    |
//!    +-- heifio-primaries (chromaticity tables)
//!    +-- heifio-transfer (tone curves)
//!    +-- heifio-icc (color profiles)
//!    +-- heifio-io (HEIF load/export)
//! ```
//!
//! ## Rescaling
//!
//! ```rust
//! use heifio_core::{rescale_samples, BitDepth};
//!
//! let wide = rescale_samples(&[0, 512, 1023], BitDepth::U10, BitDepth::U16);
//! assert_eq!(wide, vec![0, 32800, 65535]);
//!
//! let narrow = rescale_samples(&wide, BitDepth::U16, BitDepth::U10);
//! assert_eq!(narrow, vec![0, 512, 1023]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod format;
pub mod rescale;

pub use buffer::{SampleBuffer, SampleData};
pub use error::{Error, Result};
pub use format::{BitDepth, DataFormat};
pub use rescale::{narrow_to_u8, rescale_sample, rescale_samples, widen_u8};
