//! Common type definitions used across the pipeline.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::cost::CostProjection;
use crate::io::predictions::NormalizedPrediction;
use crate::risk::{RiskAssessment, TierDistribution};
use crate::roi::RoiSummary;

/// One row of an uploaded patient dataset.
///
/// Immutable once parsed; every pipeline stage derives new values from it.
/// Clinical flags accept `0`/`1` as well as `true`/`false` because the
/// upstream exports encode them as integers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default)]
    pub patient_id: String,
    pub age: u32,
    pub sex: String,
    pub state: String,
    pub urbanicity: String,
    pub insurance_type: String,
    pub income_bracket: String,
    pub employment_status: String,
    #[serde(default)]
    pub hospital_visits_past_year: u32,
    #[serde(deserialize_with = "de_flag")]
    pub has_diabetes: bool,
    #[serde(deserialize_with = "de_flag")]
    pub has_hypertension: bool,
    #[serde(deserialize_with = "de_flag")]
    pub has_heart_disease: bool,
    #[serde(deserialize_with = "de_flag")]
    pub mental_health_condition: bool,
    pub blood_pressure_systolic: u32,
    pub hba1c_level: f64,
    pub bmi: f64,
    #[serde(default)]
    pub emergency_room_visits: u32,
    #[serde(default)]
    pub readmissions_30d: u32,
    #[serde(default)]
    pub missed_appointments: u32,
    #[serde(default)]
    pub care_gaps_count: u32,
    #[serde(default)]
    pub days_since_last_visit: Option<u32>,
    #[serde(default)]
    pub depression_screen_score: Option<u32>,
}

/// Per-patient output of one pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRow {
    pub record: PatientRecord,
    pub assessment: RiskAssessment,
    pub projection: CostProjection,
}

/// Full output of an `analyze` run over a patient CSV.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub patients: Vec<PatientRow>,
    pub distribution: TierDistribution,
    pub roi: RoiSummary,
}

/// Full output of a `roi` run over an upstream prediction document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoiReport {
    pub source: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub predictions: Vec<NormalizedPrediction>,
    pub distribution: TierDistribution,
    pub roi: RoiSummary,
}

/// Round to one decimal place. Percentages across the pipeline report a
/// single decimal, matching the upstream dashboard.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or 0/1")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim() {
                "1" | "true" | "True" | "TRUE" | "yes" | "Yes" => Ok(true),
                "0" | "false" | "False" | "FALSE" | "no" | "No" | "" => Ok(false),
                other => Err(E::custom(format!("not a boolean flag: `{other}`"))),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
