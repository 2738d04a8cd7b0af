//! ICC profile synthesis command.

use crate::ProfileArgs;
use anyhow::{Context, Result, bail};
use heifio_icc::{ColorProfile, ColorimetryDescriptor, try_build_profile};
use std::fs;
use tracing::{info, trace};

/// Builds the profile for the given CICP codes and optionally writes it.
pub fn run(args: ProfileArgs, verbose: u8) -> Result<()> {
    trace!(primaries = args.primaries, transfer = args.transfer, "profile::run");

    let profile = build(args.primaries, args.transfer)?;
    println!("{}", profile.description());

    if verbose > 0 {
        for line in details(&profile) {
            println!("  {}", line);
        }
    }

    if let Some(output) = &args.output {
        let icc = profile.to_icc().context("Failed to serialize profile")?;
        fs::write(output, &icc).with_context(|| format!("Failed to write: {}", output.display()))?;
        info!(path = %output.display(), bytes = icc.len(), "profile written");
    }
    Ok(())
}

fn build(primaries: u16, transfer: u16) -> Result<ColorProfile> {
    let desc = ColorimetryDescriptor::from_codes(primaries, transfer);
    match try_build_profile(&desc)? {
        Some(profile) => Ok(profile),
        None => bail!("color_primaries {} is unspecified; no profile", primaries),
    }
}

/// Chromaticities, tristimulus values and curve of a profile.
fn details(profile: &ColorProfile) -> Vec<String> {
    let c = profile.chromaticities();
    let w = profile.white_xyz();
    let m = profile.rgb_to_xyz();
    let mut lines = vec![
        format!("Red:       ({:.4}, {:.4})", c.red.0, c.red.1),
        format!("Green:     ({:.4}, {:.4})", c.green.0, c.green.1),
        format!("Blue:      ({:.4}, {:.4})", c.blue.0, c.blue.1),
        format!("White:     ({:.4}, {:.4})", c.white.0, c.white.1),
        format!("White XYZ: ({:.4}, {:.4}, {:.4})", w.x, w.y, w.z),
        "RGB to XYZ:".to_string(),
    ];
    for i in 0..3 {
        let row = m.row(i);
        lines.push(format!("  [{:.6} {:.6} {:.6}]", row.x, row.y, row.z));
    }
    lines.push(format!("Curve:     {}", profile.curve().label()));
    lines.push(format!("Linear:    {}", profile.is_linear()));
    lines
}
