//! Cost projection: scale a condition's base cost table by risk tier, or
//! pass through per-condition costs an upstream model already predicted.

use serde::{Deserialize, Serialize};

use crate::core::round1;
use crate::risk::RiskTier;

/// One category of the base cost table: proactive (early) versus reactive
/// (late) treatment cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBand {
    pub category: String,
    pub early: f64,
    pub late: f64,
}

impl CostBand {
    fn new(category: &str, early: f64, late: f64) -> Self {
        Self {
            category: category.to_string(),
            early,
            late,
        }
    }
}

/// Base cost table for a condition. The default carries the canonical
/// eight-category breakdown used by the dashboard; deployments override it
/// through `riskmap.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    pub bands: Vec<CostBand>,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            bands: vec![
                CostBand::new("Initial Consultation", 250.0, 250.0),
                CostBand::new("Diagnostic Tests", 800.0, 1200.0),
                CostBand::new("Preventive Medication", 180.0, 450.0),
                CostBand::new("Regular Monitoring", 400.0, 800.0),
                CostBand::new("Emergency Interventions", 0.0, 3500.0),
                CostBand::new("Hospitalization", 0.0, 12000.0),
                CostBand::new("Surgical Procedures", 0.0, 25000.0),
                CostBand::new("Rehabilitation & Recovery", 500.0, 2800.0),
            ],
        }
    }
}

impl CostTable {
    pub fn base_early_total(&self) -> f64 {
        self.bands.iter().map(|band| band.early).sum()
    }

    pub fn base_late_total(&self) -> f64 {
        self.bands.iter().map(|band| band.late).sum()
    }
}

/// Multiplier scaling the base table by tier: 0.7 for tier 1 up to 1.9 for
/// tier 5.
pub fn risk_multiplier(tier: RiskTier) -> f64 {
    0.4 + f64::from(tier.get()) * 0.3
}

/// Projected early/late cost pair for one patient and (optionally) one
/// condition. Savings figures are derived, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostProjection {
    pub condition: Option<String>,
    pub early_cost: f64,
    pub late_cost: f64,
    pub risk_score: Option<f64>,
}

impl CostProjection {
    /// Wrap costs an upstream model already predicted for a condition; the
    /// tier multiplier does not apply to these.
    pub fn precomputed(
        condition: Option<String>,
        early_cost: f64,
        late_cost: f64,
        risk_score: Option<f64>,
    ) -> Self {
        Self {
            condition,
            early_cost,
            late_cost,
            risk_score,
        }
    }

    pub fn savings(&self) -> f64 {
        self.late_cost - self.early_cost
    }

    /// Savings as a percentage of the late cost, one decimal. Zero when the
    /// late cost is zero.
    pub fn savings_pct(&self) -> f64 {
        if self.late_cost == 0.0 {
            0.0
        } else {
            round1(self.savings() / self.late_cost * 100.0)
        }
    }
}

/// Derives patient-specific projections from a base cost table.
pub struct CostProjector {
    table: CostTable,
}

impl CostProjector {
    pub fn new(table: CostTable) -> Self {
        Self { table }
    }

    /// Scale the base table by the tier multiplier. Rounding to whole
    /// currency units happens after summation and scaling, never per band.
    pub fn project(&self, tier: RiskTier) -> CostProjection {
        let multiplier = risk_multiplier(tier);
        CostProjection {
            condition: None,
            early_cost: (self.table.base_early_total() * multiplier).round(),
            late_cost: (self.table.base_late_total() * multiplier).round(),
            risk_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_spans_point_seven_to_one_point_nine() {
        assert!((risk_multiplier(RiskTier::MIN) - 0.7).abs() < 1e-9);
        assert!((risk_multiplier(RiskTier::MAX) - 1.9).abs() < 1e-9);
    }

    #[test]
    fn projection_rounds_after_scaling() {
        let table = CostTable {
            bands: vec![
                CostBand::new("Consultation", 250.0, 250.0),
                CostBand::new("Diagnostics", 800.0, 1200.0),
            ],
        };
        let projection = CostProjector::new(table).project(RiskTier::MAX);

        assert_eq!(projection.early_cost, 1995.0);
        assert_eq!(projection.late_cost, 2755.0);
        assert_eq!(projection.savings(), 760.0);
        assert_eq!(projection.savings_pct(), 27.6);
    }

    #[test]
    fn projection_is_monotonic_in_tier() {
        let projector = CostProjector::new(CostTable::default());
        let low = projector.project(RiskTier::MIN);
        let high = projector.project(RiskTier::MAX);

        assert!(high.late_cost > low.late_cost);
        assert!(high.early_cost > low.early_cost);
    }

    #[test]
    fn zero_late_cost_yields_zero_savings_pct() {
        let projection = CostProjection::precomputed(None, 0.0, 0.0, None);
        assert_eq!(projection.savings_pct(), 0.0);
    }

    #[test]
    fn default_table_matches_dashboard_totals() {
        let table = CostTable::default();
        assert_eq!(table.base_early_total(), 2130.0);
        assert_eq!(table.base_late_total(), 46000.0);
    }
}
