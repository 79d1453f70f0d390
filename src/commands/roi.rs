use anyhow::Result;
use chrono::Utc;
use log::info;
use std::path::PathBuf;

use crate::cli;
use crate::config::RiskmapConfig;
use crate::core::RoiReport;
use crate::cost::CostProjection;
use crate::io::output;
use crate::io::predictions;
use crate::risk::TierDistribution;
use crate::roi;

use super::analyze::{apply_color, resolve_format};

pub struct RoiConfig {
    pub path: PathBuf,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
    pub verbosity: u8,
}

pub fn handle_roi(config: RoiConfig) -> Result<()> {
    let predictions = predictions::read_predictions(&config.path)?;
    info!(
        "aggregating {} predictions from {}",
        predictions.len(),
        config.path.display()
    );

    let distribution = TierDistribution::from_buckets(predictions.iter().map(|p| p.bucket));
    let per_patient: Vec<Vec<CostProjection>> =
        predictions.iter().map(|p| p.projections.clone()).collect();
    let summary = roi::aggregate(&per_patient);

    let report = RoiReport {
        source: config.path.clone(),
        generated_at: Utc::now(),
        predictions,
        distribution,
        roi: summary,
    };

    let format = resolve_format(config.format, &RiskmapConfig::default());
    apply_color(config.plain, config.output.is_some());
    let mut writer = output::create_writer(
        format,
        config.output.as_deref(),
        config.verbosity,
        config.plain,
    )?;
    writer.write_roi_report(&report)
}
