use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hypnos multiresolution wavelet mask builder.
#[derive(Parser)]
#[command(
    name = "hypnos",
    version,
    about = "Multiresolution wavelet masks for 1-D sensor signals"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Transform a signal into per-period coefficient masks.
    Transform(TransformArgs),
    /// Rebuild masks from a previously written coefficient repository.
    Rebuild(RebuildArgs),
}

/// Arguments for the `transform` subcommand.
#[derive(clap::Args)]
pub struct TransformArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hypnos.toml")]
    pub config: PathBuf,

    /// Override input signal path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write raw coefficients to a NetCDF repository at this path.
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Export finished bases as CSV files into this directory.
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// Arguments for the `rebuild` subcommand.
#[derive(clap::Args)]
pub struct RebuildArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hypnos.toml")]
    pub config: PathBuf,

    /// Path to the NetCDF coefficient repository to rebuild from.
    #[arg(short, long)]
    pub store: PathBuf,

    /// Export rebuilt bases as CSV files into this directory.
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}
