//! Sample rescale command.

use crate::RescaleArgs;
use anyhow::{Result, bail};
use heifio_core::{BitDepth, rescale_samples};
use tracing::debug;

/// Prints the rescaled values separated by spaces.
pub fn run(args: RescaleArgs) -> Result<()> {
    debug!(from = %args.from, to = %args.to, count = args.values.len(), "rescale::run");
    println!("{}", rescale(&args.values, args.from, args.to)?);
    Ok(())
}

fn rescale(values: &[u16], from: BitDepth, to: BitDepth) -> Result<String> {
    if let Some(bad) = values.iter().find(|&&v| v > from.max_value()) {
        bail!("sample {} does not fit {} (max {})", bad, from, from.max_value());
    }
    Ok(render(&rescale_samples(values, from, to)))
}

fn render(values: &[u16]) -> String {
    values
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
