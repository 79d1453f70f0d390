//! Configuration loaded from `riskmap.toml`.
//!
//! Everything has a compiled-in default; a config file only needs to name
//! what it overrides. An explicit `--config` path must exist, while the
//! implicit `./riskmap.toml` lookup silently falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cost::CostTable;
use crate::errors::RiskmapError;

pub const DEFAULT_CONFIG_FILE: &str = "riskmap.toml";

/// Clinical thresholds feeding the scoring rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// HbA1c percentage above which a patient scores a risk point
    #[serde(default = "default_hba1c")]
    pub hba1c: f64,

    /// Systolic blood pressure (mmHg) above which a patient scores a risk point
    #[serde(default = "default_systolic")]
    pub systolic_bp: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hba1c: default_hba1c(),
            systolic_bp: default_systolic(),
        }
    }
}

fn default_hba1c() -> f64 {
    7.0
}

fn default_systolic() -> u32 {
    140
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Report format used when the CLI does not pass one
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

fn default_format() -> String {
    "terminal".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskmapConfig {
    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub costs: CostTable,

    #[serde(default)]
    pub output: OutputSettings,
}

impl RiskmapConfig {
    /// Load configuration: an explicit path, else `./riskmap.toml` when
    /// present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, RiskmapError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !implicit.is_file() {
                    return Ok(Self::default());
                }
                implicit
            }
        };

        let raw = fs::read_to_string(&path).map_err(|e| RiskmapError::io(&path, e))?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| RiskmapError::config(&path, e.to_string()))?;
        config
            .validate()
            .map_err(|message| RiskmapError::config(&path, message))?;
        Ok(config)
    }

    // Pure function: check the cost table and thresholds are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.costs.bands.is_empty() {
            return Err("cost table must contain at least one band".to_string());
        }
        for band in &self.costs.bands {
            if band.early < 0.0 || band.late < 0.0 {
                return Err(format!(
                    "cost band `{}` has a negative amount",
                    band.category
                ));
            }
        }
        if self.thresholds.hba1c <= 0.0 {
            return Err("hba1c threshold must be positive".to_string());
        }
        Ok(())
    }
}
