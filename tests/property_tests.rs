//! Property coverage for the clamp, monotonicity, and no-NaN guarantees.

use proptest::prelude::*;
use riskmap::{
    aggregate, risk_multiplier, CostBand, CostProjection, CostProjector, CostTable, RiskTier,
};

fn arb_projection() -> impl Strategy<Value = CostProjection> {
    (0.0f64..1_000_000.0, 0.0f64..1_000_000.0)
        .prop_map(|(early, late)| CostProjection::precomputed(None, early, late, None))
}

fn arb_per_patient() -> impl Strategy<Value = Vec<Vec<CostProjection>>> {
    prop::collection::vec(prop::collection::vec(arb_projection(), 0..4), 0..20)
}

proptest! {
    #[test]
    fn tier_is_always_clamped_into_range(raw in any::<u32>()) {
        let tier = RiskTier::clamped(raw);
        prop_assert!((1..=5).contains(&tier.get()));
        prop_assert_eq!(u32::from(tier.get()), raw.clamp(1, 5));
    }

    #[test]
    fn multiplier_grows_with_tier(a in 1u32..=5, b in 1u32..=5) {
        let (low, high) = (a.min(b), a.max(b));
        prop_assert!(
            risk_multiplier(RiskTier::clamped(low)) <= risk_multiplier(RiskTier::clamped(high))
        );
    }

    #[test]
    fn scaled_late_cost_is_strictly_monotonic(
        bands in prop::collection::vec((0.0f64..10_000.0, 1.0f64..50_000.0), 1..10)
    ) {
        let table = CostTable {
            bands: bands
                .into_iter()
                .enumerate()
                .map(|(i, (early, late))| CostBand {
                    category: format!("Band {i}"),
                    early,
                    late,
                })
                .collect(),
        };
        let projector = CostProjector::new(table);
        let low = projector.project(RiskTier::MIN);
        let high = projector.project(RiskTier::MAX);
        prop_assert!(high.late_cost > low.late_cost);
    }

    #[test]
    fn aggregate_never_produces_nan_or_infinity(per_patient in arb_per_patient()) {
        let summary = aggregate(&per_patient);
        prop_assert!(summary.early_total.is_finite());
        prop_assert!(summary.late_total.is_finite());
        prop_assert!(summary.total_savings.is_finite());
        prop_assert!(summary.savings_pct.is_finite());
        prop_assert!(summary.avg_savings_per_patient.is_finite());
    }

    #[test]
    fn aggregate_holds_the_savings_identity(per_patient in arb_per_patient()) {
        let summary = aggregate(&per_patient);
        prop_assert_eq!(summary.total_savings, summary.late_total - summary.early_total);
        prop_assert_eq!(summary.patient_count, per_patient.len());
    }

    #[test]
    fn aggregate_is_deterministic(per_patient in arb_per_patient()) {
        prop_assert_eq!(aggregate(&per_patient), aggregate(&per_patient));
    }
}
