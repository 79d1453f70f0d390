// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod cost;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod risk;
pub mod roi;

// Re-export commonly used types
pub use crate::core::{round1, AnalysisReport, PatientRecord, PatientRow, RoiReport};

pub use crate::config::RiskmapConfig;

pub use crate::cost::{risk_multiplier, CostBand, CostProjection, CostProjector, CostTable};

pub use crate::errors::RiskmapError;

pub use crate::io::csv_input::{count_rows, read_patients, RowCount};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::predictions::{read_predictions, NormalizedPrediction, PredictionDocument};

pub use crate::risk::{
    tier_label, RiskAssessment, RiskBucket, RiskScorer, RiskTier, TierDistribution,
};

pub use crate::roi::{aggregate, RoiSummary};
