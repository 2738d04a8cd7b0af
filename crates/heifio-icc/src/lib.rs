//! # heifio-icc
//!
//! Color profiles for HEIF/AVIF images, built on Little CMS 2.
//!
//! # Features
//!
//! - Map NCLX colorimetry (CICP primaries + transfer) to a color profile
//! - Built-in sRGB and linear sRGB shortcuts
//! - Synthesize matrix/TRC profiles with descriptive text tags
//! - Inspect embedded ICC profiles (color space, linearity, text tags)
//! - Convert samples between profiles with lcms2 transforms
//!
//! # Example
//!
//! ```rust
//! use heifio_icc::{build_profile, ColorimetryDescriptor, Profile};
//!
//! let desc = ColorimetryDescriptor::from_codes(9, 16);
//! let color = build_profile(&desc).unwrap();
//! assert_eq!(color.description(), "BT.2020 sRGB-TRC");
//!
//! let icc = Profile::from_color_profile(&color).unwrap().to_icc().unwrap();
//! assert!(!icc.is_empty());
//! ```
//!
//! # Primaries Table
//!
//! | Code | Name |
//! |------|------|
//! | 1 | BT.709 |
//! | 4 | BT.470-6 System M |
//! | 5 | BT.470-6 System BG |
//! | 6 | BT.601 |
//! | 7 | SMPTE 240M |
//! | 8 | Generic film |
//! | 9 | BT.2020 |
//! | 10 | XYZ |
//! | 11 | SMPTE RP 431-2 |
//! | 12 | SMPTE EG 432-1 (DCI P3) |
//! | 22 | EBU Tech. 3213-E |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod colorimetry;
mod error;
mod profile;
mod transform;

pub use colorimetry::{
    COPYRIGHT, ColorProfile, ColorimetryDescriptor, MANUFACTURER, SynthesizedProfile, build_profile,
    try_build_profile,
};
pub use error::{ColorimetryError, IccError, IccResult};
pub use profile::Profile;
pub use transform::Transform;

impl ColorProfile {
    /// Serializes this description as ICC bytes.
    pub fn to_icc(&self) -> IccResult<Vec<u8>> {
        Profile::from_color_profile(self)?.to_icc()
    }
}
