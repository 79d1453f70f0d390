//! Both backend response shapes must normalize into the same canonical
//! records before aggregation.

use pretty_assertions::assert_eq;
use riskmap::io::predictions::{normalize, PredictionDocument};
use riskmap::{aggregate, RiskBucket};
use serde_json::json;

fn combined_document() -> PredictionDocument {
    serde_json::from_value(json!({
        "risk_stratification_result": {
            "patientId": "DESYNPUF-042",
            "age": 71,
            "overallRiskScore": 0.82,
            "presentRiskCondition": "Heart Failure",
            "predictedOutcomes": [
                {
                    "condition": "Heart Failure",
                    "riskScore": 0.82,
                    "riskTier": "Tier 4: High Risk",
                    "keyRiskFactors": ["SP_CHF", "Age"]
                }
            ]
        },
        "roi_prediction_result": {
            "patientId": "DESYNPUF-042",
            "predictedCosts": [
                {
                    "condition": "Heart Failure",
                    "predicted_proactive_cost": 1500.0,
                    "predicted_reactive_cost": 12000.0,
                    "potential_savings": 10500.0,
                    "riskScore": 0.82
                }
            ]
        }
    }))
    .unwrap()
}

fn flat_document() -> PredictionDocument {
    serde_json::from_value(json!({
        "predictions": [
            {
                "patientId": "DESYNPUF-042",
                "age": 71,
                "presentRiskCondition": "Heart Failure",
                "overallRiskScore": 0.82,
                "riskTier": "Tier 4: High Risk",
                "keyRiskFactors": ["SP_CHF", "Age"],
                "predictedCosts": [
                    {
                        "condition": "Heart Failure",
                        "predicted_proactive_cost": 1500.0,
                        "predicted_reactive_cost": 12000.0,
                        "riskScore": 0.82
                    }
                ]
            }
        ]
    }))
    .unwrap()
}

#[test]
fn both_shapes_normalize_to_the_same_record() {
    let from_combined = normalize(combined_document());
    let from_flat = normalize(flat_document());

    assert_eq!(from_combined, from_flat);
    assert_eq!(from_combined[0].patient_id, "DESYNPUF-042");
    assert_eq!(from_combined[0].bucket, RiskBucket::High);
}

#[test]
fn normalized_records_aggregate_with_pass_through_costs() {
    let normalized = normalize(combined_document());
    let per_patient: Vec<_> = normalized.iter().map(|p| p.projections.clone()).collect();
    let summary = aggregate(&per_patient);

    // The tier multiplier must NOT touch precomputed costs
    assert_eq!(summary.early_total, 1500.0);
    assert_eq!(summary.late_total, 12000.0);
    assert_eq!(summary.total_savings, 10500.0);
    assert_eq!(summary.savings_pct, 87.5);
    assert_eq!(summary.risk_reduction_pct, Some(82.0));
}

#[test]
fn missing_cost_section_yields_empty_projections() {
    let document: PredictionDocument = serde_json::from_value(json!({
        "risk_stratification_result": {
            "patientId": "NO-COSTS",
            "predictedOutcomes": [
                { "condition": "Stroke", "riskScore": 0.3, "riskTier": "Tier 2: Low Risk" }
            ]
        }
    }))
    .unwrap();

    let normalized = normalize(document);
    assert_eq!(normalized[0].patient_id, "NO-COSTS");
    assert_eq!(normalized[0].bucket, RiskBucket::Low);
    assert!(normalized[0].projections.is_empty());

    // Aggregating the empty projections is a degenerate, not an error
    let summary = aggregate(&[normalized[0].projections.clone()]);
    assert_eq!(summary.patient_count, 1);
    assert_eq!(summary.savings_pct, 0.0);
}

#[test]
fn snake_case_aliases_are_accepted() {
    let document: PredictionDocument = serde_json::from_value(json!({
        "predictions": [
            {
                "patient_id": "ALIASED",
                "primary_condition": "Diabetes",
                "risk_score": 0.55,
                "risk_tier": "Tier 3: Moderate Risk",
                "key_risk_factors": ["HbA1c"]
            }
        ]
    }))
    .unwrap();

    let normalized = normalize(document);
    assert_eq!(normalized[0].patient_id, "ALIASED");
    assert_eq!(normalized[0].primary_condition.as_deref(), Some("Diabetes"));
    assert_eq!(normalized[0].bucket, RiskBucket::Moderate);
    assert_eq!(normalized[0].key_risk_factors, vec!["HbA1c"]);
}

#[test]
fn highest_scoring_outcome_drives_patient_fields() {
    let document: PredictionDocument = serde_json::from_value(json!({
        "risk_stratification_result": {
            "patientId": "MULTI",
            "predictedOutcomes": [
                { "condition": "Stroke", "riskScore": 0.30, "riskTier": "Tier 2: Low Risk" },
                { "condition": "Kidney Disease", "riskScore": 0.77, "riskTier": "Tier 4: High Risk" }
            ]
        }
    }))
    .unwrap();

    let normalized = normalize(document);
    assert_eq!(
        normalized[0].primary_condition.as_deref(),
        Some("Kidney Disease")
    );
    assert_eq!(normalized[0].overall_risk_score, Some(0.77));
    assert_eq!(normalized[0].bucket, RiskBucket::High);
}
