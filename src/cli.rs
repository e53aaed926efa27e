//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use machine_images::cloud::OsImagesFilterKind;

/// Compute the machine images supported by a landscape
#[derive(Parser, Debug)]
#[command(name = "machine-images")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Landscape configuration file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Include filter; replaces the configured list
    #[arg(long = "include", value_name = "KIND", value_enum)]
    pub include: Vec<OsImagesFilterKind>,

    /// Exclude filter; replaces the configured list
    #[arg(long = "exclude", value_name = "KIND", value_enum)]
    pub exclude: Vec<OsImagesFilterKind>,

    /// Machine image name to disable, in addition to the configured ones
    #[arg(long = "disable", value_name = "NAME")]
    pub disable: Vec<String>,

    /// Download remote catalogs even if a cached copy exists
    #[arg(long)]
    pub no_cache: bool,

    /// Set log level (error, warn, info, debug, trace); defaults to RUST_LOG or info
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}
