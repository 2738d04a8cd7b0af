//! heifio - HEIF/AVIF inspection and conversion CLI
//!
//! Loads and exports HEIF/AVIF with color profiles, synthesizes ICC profiles
//! from CICP code points and rescales sample values between bit depths.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use heifio_core::BitDepth;
use std::path::PathBuf;

mod commands;
mod logger;

#[derive(Parser)]
#[command(name = "heifio")]
#[command(author, version, about = "HEIF/AVIF color-aware image tool")]
#[command(long_about = "
Loads and exports HEIF/AVIF images with color profile handling.

Examples:
  heifio info photo.heic                       # Dimensions, depth, profile
  heifio convert in.heic out.avif -d 10 -q 80  # Re-encode at 10 bits
  heifio convert in.heic out.heic --no-profile # Write sRGB NCLX instead of ICC
  heifio profile --primaries 9 --transfer 16 -o bt2020.icc
  heifio rescale --from 10 --to 16 0 512 1023
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert between HEIF and AVIF, changing depth or quality
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Build an ICC profile from CICP primaries and transfer codes
    #[command(visible_alias = "p")]
    Profile(ProfileArgs),

    /// Rescale sample values between bit depths
    Rescale(RescaleArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input file
    input: PathBuf,

    /// Output file (.heif, .heic, .hif or .avif)
    output: PathBuf,

    /// Output bit depth: 8, 10 or 12
    #[arg(short, long, default_value = "8", value_parser = parse_export_depth)]
    depth: BitDepth,

    /// Encoder quality (0-100)
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: u8,

    /// Lossless encoding
    #[arg(long)]
    lossless: bool,

    /// Write sRGB NCLX instead of embedding the color profile
    #[arg(long)]
    no_profile: bool,

    /// Drop Exif metadata
    #[arg(long)]
    no_exif: bool,

    /// Drop XMP metadata
    #[arg(long)]
    no_xmp: bool,
}

#[derive(Args)]
struct ProfileArgs {
    /// CICP color primaries code
    #[arg(long)]
    primaries: u16,

    /// CICP transfer characteristics code
    #[arg(long)]
    transfer: u16,

    /// Write ICC bytes to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RescaleArgs {
    /// Source bit depth: 8, 10, 12 or 16
    #[arg(long, value_parser = parse_depth)]
    from: BitDepth,

    /// Target bit depth: 8, 10, 12 or 16
    #[arg(long, value_parser = parse_depth)]
    to: BitDepth,

    /// Sample values
    #[arg(required = true)]
    values: Vec<u16>,
}

fn parse_depth(s: &str) -> Result<BitDepth, String> {
    let bits: u8 = s.parse().map_err(|_| format!("'{}' is not a bit depth", s))?;
    BitDepth::from_bits(bits).map_err(|e| e.to_string())
}

fn parse_export_depth(s: &str) -> Result<BitDepth, String> {
    match parse_depth(s)? {
        BitDepth::U16 => Err("export depth must be 8, 10 or 12".into()),
        depth => Ok(depth),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Profile(args) => commands::profile::run(args, cli.verbose),
        Commands::Rescale(args) => commands::rescale::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "heifio", "-vv", "convert", "a.heic", "b.avif", "-d", "10", "-q", "80", "--no-xmp",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.depth, BitDepth::U10);
        assert_eq!(args.quality, 80);
        assert!(args.no_xmp && !args.no_exif && !args.no_profile && !args.lossless);
    }

    #[test]
    fn test_convert_defaults() {
        let cli = Cli::try_parse_from(["heifio", "convert", "a.heic", "b.heic"]).unwrap();
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.depth, BitDepth::U8);
        assert_eq!(args.quality, 50);
    }

    #[test]
    fn test_rejects_bad_depths() {
        assert!(Cli::try_parse_from(["heifio", "convert", "a", "b", "-d", "16"]).is_err());
        assert!(Cli::try_parse_from(["heifio", "convert", "a", "b", "-d", "9"]).is_err());
        assert!(Cli::try_parse_from(["heifio", "convert", "a", "b", "-q", "101"]).is_err());
        assert!(
            Cli::try_parse_from(["heifio", "rescale", "--from", "7", "--to", "8", "1"]).is_err()
        );
    }

    #[test]
    fn test_parse_rescale() {
        let cli = Cli::try_parse_from([
            "heifio", "rescale", "--from", "10", "--to", "16", "0", "512",
        ])
        .unwrap();
        let Commands::Rescale(args) = cli.command else {
            panic!("expected rescale");
        };
        assert_eq!((args.from, args.to), (BitDepth::U10, BitDepth::U16));
        assert_eq!(args.values, vec![0, 512]);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
