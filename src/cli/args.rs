//! Command line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Video Cataloger - organize downloaded videos and catalog them with Bilibili metadata
#[derive(Parser, Debug)]
#[command(name = "video-cataloger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: <config dir>/video_cataloger/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organize videos, look them up and append them to the catalog
    Run {
        /// Directory containing downloaded videos
        #[arg(short, long, value_name = "SOURCE")]
        source: Option<PathBuf>,

        /// Directory that receives the per-video folders
        #[arg(short, long, value_name = "TARGET")]
        target: Option<PathBuf>,

        /// Catalog workbook (.xlsx)
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        /// Pause after each cataloged video, in milliseconds
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Print the catalog
    Catalog {
        /// Catalog workbook (.xlsx)
        #[arg(value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Check paths, catalog and search endpoint
    Check,
}

/// Output format for the catalog listing.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}
