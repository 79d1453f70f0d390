use anyhow::Result;
use std::path::Path;

use crate::cli;
use crate::io::csv_input;

/// Parse a CSV and echo `{filename, rows}` without running the pipeline.
pub fn handle_check(path: &Path, format: cli::OutputFormat) -> Result<()> {
    let count = csv_input::count_rows(path)?;

    match format {
        cli::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&count)?);
        }
        _ => {
            println!("{}: {} rows", count.filename, count.rows);
        }
    }
    Ok(())
}
