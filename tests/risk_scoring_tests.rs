//! Scoring-rule behavior across the public API.

use riskmap::{PatientRecord, RiskBucket, RiskScorer, RiskTier};

fn patient(overrides: impl FnOnce(&mut PatientRecord)) -> PatientRecord {
    let mut record = PatientRecord {
        patient_id: "P0001".to_string(),
        age: 60,
        sex: "M".to_string(),
        state: "CA".to_string(),
        urbanicity: "Urban".to_string(),
        insurance_type: "Private".to_string(),
        income_bracket: "<25k".to_string(),
        employment_status: "Employed".to_string(),
        hospital_visits_past_year: 0,
        has_diabetes: false,
        has_hypertension: false,
        has_heart_disease: false,
        mental_health_condition: false,
        blood_pressure_systolic: 110,
        hba1c_level: 5.0,
        bmi: 23.0,
        emergency_room_visits: 0,
        readmissions_30d: 0,
        missed_appointments: 0,
        care_gaps_count: 0,
        days_since_last_visit: None,
        depression_screen_score: None,
    };
    overrides(&mut record);
    record
}

#[test]
fn no_risk_factors_means_lower_clamp() {
    let assessment = RiskScorer::default().score(&patient(|_| {}));
    assert_eq!(assessment.tier, RiskTier::MIN);
}

#[test]
fn each_chronic_condition_adds_one_point() {
    let scorer = RiskScorer::default();

    let one = patient(|p| p.has_diabetes = true);
    assert_eq!(scorer.score(&one).tier.get(), 1);

    let two = patient(|p| {
        p.has_diabetes = true;
        p.has_hypertension = true;
    });
    assert_eq!(scorer.score(&two).tier.get(), 2);

    let three = patient(|p| {
        p.has_diabetes = true;
        p.has_hypertension = true;
        p.has_heart_disease = true;
    });
    assert_eq!(scorer.score(&three).tier.get(), 3);
}

#[test]
fn readmissions_weigh_double() {
    let assessment = RiskScorer::default().score(&patient(|p| p.readmissions_30d = 2));
    assert_eq!(assessment.tier.get(), 4);
}

#[test]
fn clinical_thresholds_add_points_past_boundary() {
    let scorer = RiskScorer::default();

    let over = patient(|p| {
        p.hba1c_level = 7.1;
        p.blood_pressure_systolic = 141;
        p.has_diabetes = true;
    });
    assert_eq!(scorer.score(&over).tier.get(), 3);

    let at_boundary = patient(|p| {
        p.hba1c_level = 7.0;
        p.blood_pressure_systolic = 140;
        p.has_diabetes = true;
    });
    assert_eq!(scorer.score(&at_boundary).tier.get(), 1);
}

#[test]
fn key_risk_factors_name_contributing_terms() {
    let assessment = RiskScorer::default().score(&patient(|p| {
        p.has_diabetes = true;
        p.emergency_room_visits = 4;
        p.hba1c_level = 8.0;
    }));

    assert_eq!(
        assessment.key_risk_factors,
        vec!["Diabetes", "Frequent ER visits", "Uncontrolled HbA1c"]
    );
}

#[test]
fn custom_thresholds_shift_the_rule() {
    let scorer = RiskScorer::new(6.5, 130);
    let assessment = scorer.score(&patient(|p| {
        p.hba1c_level = 6.8;
        p.blood_pressure_systolic = 135;
    }));
    assert_eq!(assessment.tier.get(), 2);
}

#[test]
fn numeric_and_label_conventions_classify_independently() {
    // Numeric tier path
    assert_eq!(RiskBucket::from_tier(RiskTier::clamped(4)), RiskBucket::Elevated);

    // Label path, as emitted by the stratification service
    assert_eq!(RiskBucket::from_label("High risk"), RiskBucket::High);
    assert_eq!(RiskBucket::from_label("somewhat Moderate"), RiskBucket::Moderate);
    assert_eq!(RiskBucket::from_label("unknown category"), RiskBucket::Unclassified);
}
