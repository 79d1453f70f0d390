//! Upstream prediction ingest.
//!
//! Two backend response shapes exist in the wild: a combined object carrying
//! `risk_stratification_result` + `roi_prediction_result`, and a flat
//! `{"predictions": [...]}` list using the legacy field names. Both are
//! mapped into [`NormalizedPrediction`] here, before any aggregation runs —
//! nothing downstream branches on which shape arrived.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::cost::CostProjection;
use crate::errors::RiskmapError;
use crate::risk::{tier_label, RiskBucket};

/// Canonical per-patient prediction, independent of the source shape.
///
/// A record with no outcomes and no costs normalizes to an empty-but-valid
/// entry: "nothing to display" is data, not an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPrediction {
    pub patient_id: String,
    pub age: Option<u32>,
    pub primary_condition: Option<String>,
    pub overall_risk_score: Option<f64>,
    pub bucket: RiskBucket,
    pub key_risk_factors: Vec<String>,
    pub projections: Vec<CostProjection>,
}

/// Raw document, one of the shapes the backends emit.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PredictionDocument {
    Flat { predictions: Vec<FlatPrediction> },
    Combined(CombinedPrediction),
    CombinedList(Vec<CombinedPrediction>),
}

#[derive(Debug, Deserialize)]
pub struct CombinedPrediction {
    #[serde(rename = "risk_stratification_result")]
    pub stratification: StratificationResult,
    #[serde(rename = "roi_prediction_result", default)]
    pub roi: Option<RoiPredictionResult>,
}

#[derive(Debug, Deserialize)]
pub struct StratificationResult {
    #[serde(default, alias = "patientId")]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, alias = "overallRiskScore")]
    pub overall_risk_score: Option<f64>,
    #[serde(default, alias = "presentRiskCondition")]
    pub present_risk_condition: Option<String>,
    #[serde(default, alias = "predictedOutcomes")]
    pub predicted_outcomes: Vec<PredictedOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct PredictedOutcome {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default, alias = "riskScore")]
    pub risk_score: Option<f64>,
    #[serde(default, alias = "riskTier")]
    pub risk_tier: Option<String>,
    #[serde(default, alias = "keyRiskFactors")]
    pub key_risk_factors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoiPredictionResult {
    #[serde(default, alias = "patientId")]
    pub patient_id: Option<String>,
    #[serde(default, alias = "predictedCosts")]
    pub predicted_costs: Vec<PredictedCost>,
}

#[derive(Debug, Deserialize)]
pub struct PredictedCost {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub predicted_proactive_cost: f64,
    #[serde(default)]
    pub predicted_reactive_cost: f64,
    // potential_savings is derived downstream; accepted but ignored
    #[serde(default)]
    pub potential_savings: Option<f64>,
    #[serde(default, alias = "riskScore")]
    pub risk_score: Option<f64>,
    #[serde(default, alias = "riskTier")]
    pub risk_tier: Option<String>,
}

/// Legacy flat per-patient object. Field names vary between exports, so
/// both spellings are accepted for each.
#[derive(Debug, Deserialize)]
pub struct FlatPrediction {
    #[serde(default, alias = "patientId")]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, alias = "presentRiskCondition")]
    pub primary_condition: Option<String>,
    #[serde(default, alias = "overallRiskScore")]
    pub risk_score: Option<f64>,
    #[serde(default, alias = "riskTier")]
    pub risk_tier: Option<String>,
    #[serde(default, alias = "keyRiskFactors")]
    pub key_risk_factors: Vec<String>,
    #[serde(default, alias = "predictedOutcomes")]
    pub predicted_outcomes: Vec<PredictedOutcome>,
    #[serde(default, alias = "predictedCosts")]
    pub predicted_costs: Vec<PredictedCost>,
}

/// Read a prediction document and normalize it, whichever shape it has.
pub fn read_predictions(path: &Path) -> Result<Vec<NormalizedPrediction>, RiskmapError> {
    let file = File::open(path).map_err(|e| RiskmapError::io(path, e))?;
    let document: PredictionDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            let line = (e.line() > 0).then(|| e.line() as u64);
            RiskmapError::parse(path, line, e.to_string())
        })?;
    Ok(normalize(document))
}

pub fn normalize(document: PredictionDocument) -> Vec<NormalizedPrediction> {
    match document {
        PredictionDocument::Flat { predictions } => {
            predictions.into_iter().map(normalize_flat).collect()
        }
        PredictionDocument::Combined(prediction) => vec![normalize_combined(prediction)],
        PredictionDocument::CombinedList(predictions) => {
            predictions.into_iter().map(normalize_combined).collect()
        }
    }
}

fn normalize_combined(prediction: CombinedPrediction) -> NormalizedPrediction {
    let stratification = prediction.stratification;
    let roi = prediction.roi;

    let patient_id = stratification
        .patient_id
        .or_else(|| roi.as_ref().and_then(|r| r.patient_id.clone()))
        .unwrap_or_else(unknown_patient);

    let primary = primary_outcome(&stratification.predicted_outcomes);
    let overall_risk_score = stratification
        .overall_risk_score
        .or_else(|| primary.and_then(|outcome| outcome.risk_score));
    let primary_condition = stratification
        .present_risk_condition
        .or_else(|| primary.and_then(|outcome| outcome.condition.clone()));
    let bucket = classify(
        primary.and_then(|outcome| outcome.risk_tier.as_deref()),
        overall_risk_score,
    );
    let key_risk_factors = collect_factors(&stratification.predicted_outcomes);

    let projections = roi
        .map(|r| r.predicted_costs.into_iter().map(projection_from).collect())
        .unwrap_or_default();

    NormalizedPrediction {
        patient_id,
        age: stratification.age,
        primary_condition,
        overall_risk_score,
        bucket,
        key_risk_factors,
        projections,
    }
}

fn normalize_flat(prediction: FlatPrediction) -> NormalizedPrediction {
    let primary = primary_outcome(&prediction.predicted_outcomes);
    let overall_risk_score = prediction
        .risk_score
        .or_else(|| primary.and_then(|outcome| outcome.risk_score));
    let primary_condition = prediction
        .primary_condition
        .or_else(|| primary.and_then(|outcome| outcome.condition.clone()));
    let tier_hint = prediction
        .risk_tier
        .as_deref()
        .or_else(|| primary.and_then(|outcome| outcome.risk_tier.as_deref()));
    let bucket = classify(tier_hint, overall_risk_score);

    let mut key_risk_factors = prediction.key_risk_factors;
    if key_risk_factors.is_empty() {
        key_risk_factors = collect_factors(&prediction.predicted_outcomes);
    }

    NormalizedPrediction {
        patient_id: prediction.patient_id.unwrap_or_else(unknown_patient),
        age: prediction.age,
        primary_condition,
        overall_risk_score,
        bucket,
        key_risk_factors,
        projections: prediction
            .predicted_costs
            .into_iter()
            .map(projection_from)
            .collect(),
    }
}

/// Highest-scoring outcome; it names the present risk condition and the
/// patient-level tier, mirroring the stratification service.
fn primary_outcome(outcomes: &[PredictedOutcome]) -> Option<&PredictedOutcome> {
    outcomes.iter().max_by(|a, b| {
        a.risk_score
            .unwrap_or(0.0)
            .total_cmp(&b.risk_score.unwrap_or(0.0))
    })
}

/// Bucket from an explicit tier label when one exists, else from the model
/// score via its label mapping, else unclassified.
fn classify(tier_hint: Option<&str>, score: Option<f64>) -> RiskBucket {
    match tier_hint {
        Some(label) => RiskBucket::from_label(label),
        None => score
            .map(|s| RiskBucket::from_label(tier_label(s)))
            .unwrap_or(RiskBucket::Unclassified),
    }
}

fn collect_factors(outcomes: &[PredictedOutcome]) -> Vec<String> {
    let mut factors = Vec::new();
    for outcome in outcomes {
        for factor in &outcome.key_risk_factors {
            if !factors.contains(factor) {
                factors.push(factor.clone());
            }
        }
    }
    factors
}

fn projection_from(cost: PredictedCost) -> CostProjection {
    CostProjection::precomputed(
        cost.condition,
        cost.predicted_proactive_cost,
        cost.predicted_reactive_cost,
        cost.risk_score,
    )
}

fn unknown_patient() -> String {
    "UNKNOWN".to_string()
}
