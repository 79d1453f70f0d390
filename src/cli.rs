use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskmap")]
#[command(about = "Patient risk stratification and care-cost ROI analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a patient CSV: score risk tiers, project costs, aggregate ROI
    Analyze {
        /// Patient dataset to analyze (.csv)
        path: PathBuf,

        /// Output format (defaults to the configured format, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to ./riskmap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show only the N highest-risk patients
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Disable colors and Unicode decorations (ASCII-only output)
        #[arg(long)]
        plain: bool,

        /// Increase verbosity (can be repeated: -v shows per-patient risk factors)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Aggregate ROI from an upstream prediction document (JSON)
    Roi {
        /// Prediction document (.json), either backend response shape
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colors and Unicode decorations (ASCII-only output)
        #[arg(long)]
        plain: bool,

        /// Increase verbosity (can be repeated: -v shows per-condition projections)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Parse a patient CSV and echo its row count
    Check {
        /// Patient dataset to check (.csv)
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Initialize a riskmap.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
