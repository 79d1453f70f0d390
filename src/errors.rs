//! Typed error categories for riskmap pipeline operations.
//!
//! Commands work in `anyhow::Result` and attach context at the boundary;
//! the library seams (ingest, config, normalization) return `RiskmapError`
//! so callers can distinguish input-format failures from everything else.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskmapError {
    /// File system failures (open, read, write).
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Rows or documents that do not parse.
    #[error("parse error in `{}`{}: {message}", path.display(), fmt_line(*line))]
    Parse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// Inputs rejected before parsing (wrong extension, empty dataset).
    #[error("invalid input `{}`: {message}", path.display())]
    InvalidInput { path: PathBuf, message: String },

    /// Configuration file problems.
    #[error("invalid configuration `{}`: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl RiskmapError {
    /// Create an I/O error for the given path.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a parse error, with the 1-based line when the parser knows it.
    pub fn parse(path: &Path, line: Option<u64>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(path: &Path, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(path: &Path, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

fn fmt_line(line: Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}
