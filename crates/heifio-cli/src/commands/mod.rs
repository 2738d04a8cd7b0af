//! CLI command implementations

pub mod convert;
pub mod info;
pub mod profile;
pub mod rescale;

use anyhow::{Context, Result};
use heifio_io::{ExportOptions, HostImage, LoadOptions, LoadedImage};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path, opts: &LoadOptions) -> Result<LoadedImage> {
    heifio_io::load(path, opts).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &HostImage, opts: &ExportOptions) -> Result<()> {
    heifio_io::export(path, image, opts)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Formats a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
