//! ICC and colorimetry error types.

use thiserror::Error;

/// Result type for ICC operations.
pub type IccResult<T> = Result<T, IccError>;

/// Errors that can occur while creating or serializing ICC profiles.
#[derive(Debug, Error)]
pub enum IccError {
    /// Failed to create profile.
    #[error("failed to create profile: {0}")]
    CreateFailed(String),

    /// Failed to build a tone curve.
    #[error("failed to build tone curve: {0}")]
    CurveFailed(String),

    /// Failed to write a text tag.
    #[error("failed to write {0} tag")]
    TagWriteFailed(&'static str),

    /// Failed to create a transform.
    #[error("failed to create transform: {0}")]
    TransformFailed(String),

    /// Invalid profile data.
    #[error("invalid profile data: {0}")]
    InvalidProfile(String),
}

/// Colorimetry that cannot be turned into a profile.
///
/// This is a data-quality condition, not an operation failure: callers are
/// expected to continue without a profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorimetryError {
    /// Primaries code with no chromaticity table entry.
    #[error("unsupported color_primaries value {0}")]
    UnsupportedPrimaries(u16),

    /// Explicit chromaticities outside `[0, 1]`.
    #[error("chromaticity coordinates out of range for color_primaries {primaries}: {detail}")]
    InvalidChromaticities {
        /// Primaries code the coordinates were signalled with
        primaries: u16,
        /// Offending coordinates
        detail: String,
    },
}
