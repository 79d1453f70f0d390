use anyhow::Result;
use chrono::Utc;
use log::info;
use std::path::PathBuf;

use crate::cli;
use crate::config::RiskmapConfig;
use crate::core::{AnalysisReport, PatientRow};
use crate::cost::{CostProjection, CostProjector};
use crate::formatting::FormattingConfig;
use crate::io::output::{self, OutputFormat};
use crate::io::csv_input;
use crate::risk::{RiskScorer, TierDistribution};
use crate::roi;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub top: Option<usize>,
    pub plain: bool,
    pub verbosity: u8,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = RiskmapConfig::load(config.config.as_deref())?;
    let patients = csv_input::read_patients(&config.path)?;
    info!("scoring {} patients from {}", patients.len(), config.path.display());

    let scorer = RiskScorer::new(settings.thresholds.hba1c, settings.thresholds.systolic_bp);
    let projector = CostProjector::new(settings.costs.clone());

    let mut rows: Vec<PatientRow> = patients
        .into_iter()
        .map(|record| {
            let assessment = scorer.score(&record);
            let projection = projector.project(assessment.tier);
            PatientRow {
                record,
                assessment,
                projection,
            }
        })
        .collect();

    // Aggregate over the full cohort before any --top trimming
    let distribution = TierDistribution::from_buckets(rows.iter().map(|r| r.assessment.bucket));
    let per_patient: Vec<Vec<CostProjection>> =
        rows.iter().map(|r| vec![r.projection.clone()]).collect();
    let summary = roi::aggregate(&per_patient);

    rows.sort_by(|a, b| {
        b.assessment
            .tier
            .cmp(&a.assessment.tier)
            .then(b.projection.late_cost.total_cmp(&a.projection.late_cost))
            .then(a.record.patient_id.cmp(&b.record.patient_id))
    });
    if let Some(top) = config.top {
        rows.truncate(top);
    }

    let report = AnalysisReport {
        source: config.path.clone(),
        generated_at: Utc::now(),
        patients: rows,
        distribution,
        roi: summary,
    };

    let format = resolve_format(config.format, &settings);
    apply_color(config.plain, config.output.is_some());
    let mut writer = output::create_writer(
        format,
        config.output.as_deref(),
        config.verbosity,
        config.plain,
    )?;
    writer.write_report(&report)
}

/// CLI flag wins, then the configured default, then terminal.
pub(crate) fn resolve_format(
    flag: Option<cli::OutputFormat>,
    settings: &RiskmapConfig,
) -> OutputFormat {
    flag.map(OutputFormat::from)
        .or_else(|| OutputFormat::parse(&settings.output.default_format))
        .unwrap_or(OutputFormat::Terminal)
}

pub(crate) fn apply_color(plain: bool, to_file: bool) {
    if plain || to_file {
        FormattingConfig::plain().apply();
    } else {
        FormattingConfig::from_env().apply();
    }
}
