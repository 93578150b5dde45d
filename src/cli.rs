use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sinkbom - Sink configuration to bill-of-materials compiler
#[derive(Parser)]
#[command(name = "sinkbom")]
#[command(about = "Compile sink unit configurations into bills of materials")]
#[command(version)]
pub struct Cli {
    /// Catalog JSON file. Defaults to the built-in catalog.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a configuration into a BOM
    Compile {
        /// Path to configuration file
        config: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,

        /// Refuse to compile an incomplete configuration
        #[arg(long)]
        strict: bool,
    },
    /// Check a configuration for missing mandatory fields
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// List the leg and foot items procurement orders separately
    Procurement {
        /// Path to configuration file
        config: PathBuf,
    },
    /// Show the category a part identifier falls into
    Categorize {
        /// Part identifier (e.g., 702.10)
        id: String,

        /// Display name used for keyword matching (defaults to the catalog name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented hierarchical tree
    Tree,
    /// Flattened list grouped by category
    Flat,
    /// Full compilation result as JSON
    Json,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
