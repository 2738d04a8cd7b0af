//! HEIF/AVIF conversion command.
//!
//! Loads the input with its profile and metadata, then exports at the
//! requested depth, quality and profile mode.

use crate::ConvertArgs;
use anyhow::Result;
use heifio_io::{ExportOptions, LoadOptions};
use tracing::{debug, info, trace};

/// Runs the convert command.
pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let load_opts = LoadOptions {
        read_exif: !args.no_exif,
        read_xmp: !args.no_xmp,
        ..LoadOptions::default()
    };
    let loaded = super::load_image(&args.input, &load_opts)?;
    let opts = export_options(&args);
    debug!(?opts, "export options");

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        from = %loaded.source_depth,
        to = %opts.depth,
        "Converting image"
    );
    if verbose > 0 {
        println!(
            "Converting {} ({}) -> {} ({})",
            args.input.display(),
            loaded.source_depth,
            args.output.display(),
            opts.depth
        );
    }

    super::save_image(&args.output, &loaded.image, &opts)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}

fn export_options(args: &ConvertArgs) -> ExportOptions {
    ExportOptions {
        quality: args.quality,
        lossless: args.lossless,
        depth: args.depth,
        save_profile: !args.no_profile,
        save_exif: !args.no_exif,
        save_xmp: !args.no_xmp,
        compression: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heifio_core::BitDepth;
    use std::path::PathBuf;

    #[test]
    fn test_export_options() {
        let args = ConvertArgs {
            input: PathBuf::from("a.heic"),
            output: PathBuf::from("b.avif"),
            depth: BitDepth::U12,
            quality: 75,
            lossless: true,
            no_profile: true,
            no_exif: false,
            no_xmp: true,
        };
        let opts = export_options(&args);
        assert_eq!(opts.depth, BitDepth::U12);
        assert_eq!(opts.quality, 75);
        assert!(opts.lossless && !opts.save_profile && opts.save_exif && !opts.save_xmp);
        assert!(opts.validate().is_ok());
    }
}
