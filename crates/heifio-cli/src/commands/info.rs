//! Image info command.
//!
//! Displays dimensions, coded depth, alpha, color profile and metadata sizes.

use crate::InfoArgs;
use anyhow::Result;
use heifio_io::{EmbeddedProfile, LoadOptions, LoadedImage};
use std::fs;
use std::path::Path;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let loaded = super::load_image(path, &LoadOptions::default())?;
        print_text(path, &loaded, file_size, verbose);

        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}

fn print_text(path: &Path, loaded: &LoadedImage, file_size: u64, verbose: u8) {
    let image = &loaded.image;
    let buf = &image.buffer;
    println!("{}", path.display());
    println!("  Resolution: {}x{}", buf.width, buf.height);
    println!("  Channels:   {}", buf.channels);
    println!("  Bit depth:  {}", loaded.source_depth);
    println!("  Alpha:      {}", if buf.has_alpha() { "yes" } else { "no" });
    println!("  File size:  {}", super::format_size(file_size));
    println!("  Profile:    {} ({})", image.profile_description(), loaded.embedded.kind());
    println!("  Linear:     {}", image.linear);

    if verbose > 0 {
        if let EmbeddedProfile::Nclx(desc) = &loaded.embedded {
            println!("  Primaries:  {}", desc.primaries);
            println!("  Transfer:   {}", desc.transfer);
            println!("  Matrix:     {}", desc.matrix_coefficients);
            println!("  Full range: {}", desc.full_range);
        }
        if let Some(exif) = &image.exif {
            println!("  Exif:       {}", super::format_size(exif.len() as u64));
        }
        if let Some(xmp) = &image.xmp {
            println!("  XMP:        {}", super::format_size(xmp.len() as u64));
        }
    }
}
