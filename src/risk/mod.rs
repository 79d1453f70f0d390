//! Risk stratification: the deterministic scoring rule and the tier /
//! bucket vocabulary shared by the rest of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::PatientRecord;

/// Integer risk tier, guaranteed to lie in `[1, 5]`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskTier(u8);

impl RiskTier {
    pub const MIN: RiskTier = RiskTier(1);
    pub const MAX: RiskTier = RiskTier(5);

    /// Clamp an unbounded raw score into the valid range. Raw scores below 1
    /// land on tier 1, anything above 5 lands on tier 5.
    pub fn clamped(raw: u32) -> Self {
        RiskTier(raw.clamp(1, 5) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RiskTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(RiskTier(value))
        } else {
            Err(format!("risk tier must be 1-5, got {value}"))
        }
    }
}

impl From<RiskTier> for u8 {
    fn from(tier: RiskTier) -> u8 {
        tier.0
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display bucket for a tier.
///
/// Two tiering conventions coexist upstream: the numeric 1-5 tier and
/// free-form labels such as `"Tier 4: High Risk"`. Both classify into a
/// bucket independently; one is never inferred from the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskBucket {
    Low,
    Moderate,
    Elevated,
    High,
    Unclassified,
}

impl RiskBucket {
    pub fn from_tier(tier: RiskTier) -> Self {
        match tier.get() {
            1 | 2 => RiskBucket::Low,
            3 => RiskBucket::Moderate,
            4 => RiskBucket::Elevated,
            _ => RiskBucket::High,
        }
    }

    /// Classify a free-form tier label. Labels naming none of the known
    /// buckets fall through to `Unclassified`.
    pub fn from_label(label: &str) -> Self {
        if label.contains("High") {
            RiskBucket::High
        } else if label.contains("Moderate") {
            RiskBucket::Moderate
        } else if label.contains("Low") {
            RiskBucket::Low
        } else {
            RiskBucket::Unclassified
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskBucket::Low => "low",
            RiskBucket::Moderate => "moderate",
            RiskBucket::Elevated => "elevated",
            RiskBucket::High => "high",
            RiskBucket::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of scoring one patient. One assessment per patient per run;
/// nothing is cached between runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub bucket: RiskBucket,
    pub key_risk_factors: Vec<String>,
    pub risk_score: Option<f64>,
}

/// Deterministic scoring rule mapping a patient record onto a tier.
///
/// ```text
/// raw = chronic conditions (0/1 each)
///     + floor(er_visits / 2)
///     + readmissions_30d * 2
///     + (hba1c over threshold)
///     + (systolic over threshold)
/// ```
///
/// The result is clamped into `[1, 5]` regardless of how extreme raw gets.
/// Order-independent; counters are non-negative by construction.
pub struct RiskScorer {
    pub hba1c_threshold: f64,
    pub systolic_threshold: u32,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self {
            hba1c_threshold: 7.0,
            systolic_threshold: 140,
        }
    }
}

impl RiskScorer {
    pub fn new(hba1c_threshold: f64, systolic_threshold: u32) -> Self {
        Self {
            hba1c_threshold,
            systolic_threshold,
        }
    }

    pub fn score(&self, patient: &PatientRecord) -> RiskAssessment {
        let mut raw = 0u32;
        let mut factors = Vec::new();

        if patient.has_diabetes {
            raw += 1;
            factors.push("Diabetes".to_string());
        }
        if patient.has_hypertension {
            raw += 1;
            factors.push("Hypertension".to_string());
        }
        if patient.has_heart_disease {
            raw += 1;
            factors.push("Heart disease".to_string());
        }

        let er_points = patient.emergency_room_visits / 2;
        if er_points > 0 {
            factors.push("Frequent ER visits".to_string());
        }
        raw += er_points;

        let readmission_points = patient.readmissions_30d * 2;
        if readmission_points > 0 {
            factors.push("30-day readmissions".to_string());
        }
        raw += readmission_points;

        if patient.hba1c_level > self.hba1c_threshold {
            raw += 1;
            factors.push("Uncontrolled HbA1c".to_string());
        }
        if patient.blood_pressure_systolic > self.systolic_threshold {
            raw += 1;
            factors.push("Hypertensive blood pressure".to_string());
        }

        let tier = RiskTier::clamped(raw);
        RiskAssessment {
            tier,
            bucket: RiskBucket::from_tier(tier),
            key_risk_factors: factors,
            risk_score: None,
        }
    }
}

/// Tier label the upstream stratification service emits for a continuous
/// model score in `[0, 1]`.
pub fn tier_label(score: f64) -> &'static str {
    if score >= 0.75 {
        "Tier 4: High Risk"
    } else if score >= 0.50 {
        "Tier 3: Moderate Risk"
    } else if score >= 0.25 {
        "Tier 2: Low Risk"
    } else {
        "Tier 1: Minimal Risk"
    }
}

/// Patient counts per bucket across one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    pub low_count: usize,
    pub moderate_count: usize,
    pub elevated_count: usize,
    pub high_count: usize,
    pub unclassified_count: usize,
    pub total_patients: usize,
}

impl TierDistribution {
    pub fn from_buckets<I>(buckets: I) -> Self
    where
        I: IntoIterator<Item = RiskBucket>,
    {
        let mut distribution = Self::default();
        for bucket in buckets {
            match bucket {
                RiskBucket::Low => distribution.low_count += 1,
                RiskBucket::Moderate => distribution.moderate_count += 1,
                RiskBucket::Elevated => distribution.elevated_count += 1,
                RiskBucket::High => distribution.high_count += 1,
                RiskBucket::Unclassified => distribution.unclassified_count += 1,
            }
            distribution.total_patients += 1;
        }
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_patient() -> PatientRecord {
        PatientRecord {
            patient_id: "P0001".to_string(),
            age: 54,
            sex: "F".to_string(),
            state: "OH".to_string(),
            urbanicity: "Urban".to_string(),
            insurance_type: "Private".to_string(),
            income_bracket: "50-75k".to_string(),
            employment_status: "Employed".to_string(),
            hospital_visits_past_year: 1,
            has_diabetes: false,
            has_hypertension: false,
            has_heart_disease: false,
            mental_health_condition: false,
            blood_pressure_systolic: 118,
            hba1c_level: 5.4,
            bmi: 24.0,
            emergency_room_visits: 0,
            readmissions_30d: 0,
            missed_appointments: 0,
            care_gaps_count: 0,
            days_since_last_visit: None,
            depression_screen_score: None,
        }
    }

    #[test]
    fn healthy_patient_lands_on_tier_one() {
        let assessment = RiskScorer::default().score(&baseline_patient());
        assert_eq!(assessment.tier, RiskTier::MIN);
        assert_eq!(assessment.bucket, RiskBucket::Low);
        assert!(assessment.key_risk_factors.is_empty());
    }

    #[test]
    fn extreme_utilization_clamps_to_tier_five() {
        let mut patient = baseline_patient();
        patient.has_diabetes = true;
        patient.has_hypertension = true;
        patient.has_heart_disease = true;
        patient.emergency_room_visits = 12;
        patient.readmissions_30d = 4;

        let assessment = RiskScorer::default().score(&patient);
        assert_eq!(assessment.tier, RiskTier::MAX);
        assert_eq!(assessment.bucket, RiskBucket::High);
    }

    #[test]
    fn er_visits_contribute_floored_halves() {
        let mut patient = baseline_patient();
        // 3 visits floor to 1 point; alone that still clamps up to tier 1
        patient.emergency_room_visits = 3;
        assert_eq!(RiskScorer::default().score(&patient).tier.get(), 1);

        patient.emergency_room_visits = 5;
        assert_eq!(RiskScorer::default().score(&patient).tier.get(), 2);
    }

    #[test]
    fn threshold_boundaries_do_not_fire() {
        let mut patient = baseline_patient();
        patient.hba1c_level = 7.0;
        patient.blood_pressure_systolic = 140;

        let assessment = RiskScorer::default().score(&patient);
        assert_eq!(assessment.tier.get(), 1);
        assert!(assessment.key_risk_factors.is_empty());
    }

    #[test]
    fn buckets_follow_tier_bands() {
        assert_eq!(RiskBucket::from_tier(RiskTier::clamped(1)), RiskBucket::Low);
        assert_eq!(RiskBucket::from_tier(RiskTier::clamped(2)), RiskBucket::Low);
        assert_eq!(
            RiskBucket::from_tier(RiskTier::clamped(3)),
            RiskBucket::Moderate
        );
        assert_eq!(
            RiskBucket::from_tier(RiskTier::clamped(4)),
            RiskBucket::Elevated
        );
        assert_eq!(RiskBucket::from_tier(RiskTier::clamped(5)), RiskBucket::High);
    }

    #[test]
    fn labels_classify_by_substring() {
        assert_eq!(RiskBucket::from_label("Tier 4: High Risk"), RiskBucket::High);
        assert_eq!(
            RiskBucket::from_label("Tier 3: Moderate Risk"),
            RiskBucket::Moderate
        );
        assert_eq!(RiskBucket::from_label("Tier 2: Low Risk"), RiskBucket::Low);
        assert_eq!(
            RiskBucket::from_label("Tier 1: Minimal Risk"),
            RiskBucket::Unclassified
        );
    }

    #[test]
    fn score_labels_follow_model_thresholds() {
        assert_eq!(tier_label(0.9), "Tier 4: High Risk");
        assert_eq!(tier_label(0.75), "Tier 4: High Risk");
        assert_eq!(tier_label(0.6), "Tier 3: Moderate Risk");
        assert_eq!(tier_label(0.25), "Tier 2: Low Risk");
        assert_eq!(tier_label(0.1), "Tier 1: Minimal Risk");
    }

    #[test]
    fn out_of_range_tier_fails_deserialization() {
        assert!(serde_json::from_str::<RiskTier>("9").is_err());
        assert_eq!(
            serde_json::from_str::<RiskTier>("3").unwrap(),
            RiskTier::clamped(3)
        );
    }
}
