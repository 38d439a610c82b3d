//! Basic Risk Assessment Example
//!
//! This example demonstrates the simplest use case of VitalGuard:
//! scoring a patient's charted vitals and checking them against the
//! clinical thresholds for their age.
//!
//! ## What You'll Learn
//!
//! - Building a fuzzy engine from auto-partitioned variables
//! - Wiring a pipeline with an alert sink and a clock
//! - Reading the two halves of a risk report
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_assessment
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use vitalguard_core::{
    time::SystemTime, AlertEvent, Antecedent, AssessmentResult, FuzzyInferenceEngine,
    FuzzyVariable, LabelScheme, PatientProfile, RiskAssessmentPipeline, Rule, Universe, Vital,
    VitalSigns,
};

/// (vital, universe min, universe max)
const UNIVERSES: [(Vital, f64, f64); 6] = [
    (Vital::OxygenSaturation, 85.0, 100.0),
    (Vital::RespiratoryRate, 10.0, 59.0),
    (Vital::CoughCount, 0.0, 19.0),
    (Vital::SleepInterruptions, 0.0, 9.0),
    (Vital::HeartRate, 50.0, 149.0),
    (Vital::Temperature, 35.0, 40.9),
];

fn build_engine() -> AssessmentResult<FuzzyInferenceEngine> {
    let mut builder = FuzzyInferenceEngine::builder().name("respiratory_risk_v1");
    for (vital, min, max) in UNIVERSES {
        builder = builder.antecedent(FuzzyVariable::partition_auto(
            vital.name(),
            Universe::new(min, max, 0.1)?,
            &LabelScheme::Quality,
        )?);
    }

    let each = |label: &str| UNIVERSES.map(|(vital, ..)| Antecedent::is(vital.name(), label));

    builder
        .consequent(FuzzyVariable::partition_auto(
            "risk",
            Universe::new(0.0, 100.0, 1.0)?,
            &LabelScheme::Level,
        )?)
        .rule(Rule::new(Antecedent::any(each("poor")), "risk", "high"))
        .rule(Rule::new(Antecedent::all(each("good")), "risk", "low"))
        .rule(Rule::new(Antecedent::any(each("average")), "risk", "medium"))
        .build()
}

fn main() -> AssessmentResult<()> {
    println!("VitalGuard Basic Assessment Example");
    println!("===================================\n");

    let engine = Arc::new(build_engine()?);
    println!(
        "Engine '{}': {} antecedents, {} rules\n",
        engine.name(),
        engine.antecedents().len(),
        engine.rules().len()
    );

    // Alerts go to stdout here; a deployment would hand them to a pager or queue
    let sink = |alert: AlertEvent| println!("ALERT {alert}\n");
    let pipeline = RiskAssessmentPipeline::builder(engine).build(sink, SystemTime)?;

    let patients = [
        (
            PatientProfile::new("bed-12", NaiveDate::from_ymd_opt(1958, 7, 14)),
            VitalSigns::new(18.0, 82.0, 96.0, 37.1, 1.0, 0.0)?,
        ),
        (
            PatientProfile::new("bed-14", NaiveDate::from_ymd_opt(1971, 2, 3)),
            VitalSigns::new(31.0, 118.0, 89.0, 38.9, 14.0, 5.0)?,
        ),
        (
            PatientProfile::new("walk-in", None),
            VitalSigns::new(24.0, 104.0, 91.0, 38.0, 9.0, 2.0)?,
        ),
    ];

    for (patient, vitals) in &patients {
        let report = pipeline.assess(*vitals, patient)?;
        println!("{report}\n");
    }

    Ok(())
}
