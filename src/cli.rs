use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::OutputFormat;

/// Variant Picker - choose product options from a catalog of purchasable variants
#[derive(Parser)]
#[command(name = "variant-picker")]
#[command(about = "Progressively select product options; only purchasable combinations stay selectable")]
#[command(version)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a catalog file
    Validate {
        /// Path to the catalog JSON file
        catalog: PathBuf,
    },
    /// Show the selectable options after applying choices left-to-right
    Options {
        /// Path to the catalog JSON file
        catalog: PathBuf,
        /// Value for the next attribute (repeat in attribute order)
        #[arg(short, long = "select", value_name = "VALUE")]
        select: Vec<String>,
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
        /// Shorthand for --format json
        #[arg(long, conflicts_with = "format")]
        json: bool,
    },
    /// Resolve a full set of choices to a variant id
    Resolve {
        /// Path to the catalog JSON file
        catalog: PathBuf,
        /// Value for the next attribute (repeat in attribute order)
        #[arg(short, long = "select", value_name = "VALUE", required = true)]
        select: Vec<String>,
    },
    /// Choose options interactively from standard input
    Interactive {
        /// Path to the catalog JSON file
        catalog: PathBuf,
    },
}

impl Commands {
    /// Effective output format for `options`, honouring `--json`
    pub fn output_format(&self) -> OutputFormat {
        match self {
            Self::Options { json: true, .. } => OutputFormat::Json,
            Self::Options { format, .. } => *format,
            _ => OutputFormat::default(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
