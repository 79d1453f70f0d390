use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use riskmap::cli::{Cli, Commands};
use riskmap::commands::{self, AnalyzeConfig, RoiConfig};

// Main orchestrator function
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            top,
            plain,
            verbosity,
        } => commands::handle_analyze(AnalyzeConfig {
            path,
            format,
            output,
            config,
            top,
            plain,
            verbosity,
        }),
        Commands::Roi {
            path,
            format,
            output,
            plain,
            verbosity,
        } => commands::handle_roi(RoiConfig {
            path,
            format,
            output,
            plain,
            verbosity,
        }),
        Commands::Check { path, format } => commands::handle_check(&path, format),
        Commands::Init { force } => commands::init_config(force),
    }
}
