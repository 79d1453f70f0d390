//! Hospital-wide ROI aggregation: a pure, stateless reduction over every
//! patient's cost projections, run fresh on each upload.

use serde::{Deserialize, Serialize};

use crate::core::round1;
use crate::cost::CostProjection;

/// Aggregate of all projections across one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoiSummary {
    pub patient_count: usize,
    pub early_total: f64,
    pub late_total: f64,
    pub total_savings: f64,
    pub savings_pct: f64,
    pub avg_savings_per_patient: f64,
    /// Mean per-projection model score scaled to a percentage. `None` when
    /// any projection lacks a score; the statistic has no defined source
    /// then and is never invented.
    pub risk_reduction_pct: Option<f64>,
}

impl RoiSummary {
    pub fn zero() -> Self {
        Self {
            patient_count: 0,
            early_total: 0.0,
            late_total: 0.0,
            total_savings: 0.0,
            savings_pct: 0.0,
            avg_savings_per_patient: 0.0,
            risk_reduction_pct: None,
        }
    }
}

/// Flatten every patient's projections and reduce them into one summary.
///
/// Degenerate inputs short-circuit to zero values: an empty patient list or
/// an all-zero late total never divides by zero and never produces NaN.
pub fn aggregate(per_patient: &[Vec<CostProjection>]) -> RoiSummary {
    let patient_count = per_patient.len();
    let projections: Vec<&CostProjection> = per_patient.iter().flatten().collect();

    let early_total: f64 = projections.iter().map(|p| p.early_cost).sum();
    let late_total: f64 = projections.iter().map(|p| p.late_cost).sum();
    let total_savings = late_total - early_total;

    let savings_pct = if late_total == 0.0 {
        0.0
    } else {
        round1(total_savings / late_total * 100.0)
    };
    let avg_savings_per_patient = if patient_count == 0 {
        0.0
    } else {
        total_savings / patient_count as f64
    };

    RoiSummary {
        patient_count,
        early_total,
        late_total,
        total_savings,
        savings_pct,
        avg_savings_per_patient,
        risk_reduction_pct: mean_risk_score(&projections).map(|mean| round1(mean * 100.0)),
    }
}

/// Mean of the per-projection model scores; `None` unless every projection
/// carries one.
fn mean_risk_score(projections: &[&CostProjection]) -> Option<f64> {
    if projections.is_empty() {
        return None;
    }
    let mut sum = 0.0;
    for projection in projections {
        sum += projection.risk_score?;
    }
    Some(sum / projections.len() as f64)
}
