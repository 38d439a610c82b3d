//! Common test utilities for integration tests
//!
//! This module provides:
//! - Synthetic wearable signals ([`generators`])
//! - The reference respiratory risk engine, built in code
//! - A recording alert sink and a fixed clock
//! - Tolerance assertions

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use vitalguard_core::{
    traits::AlertSink, time::FixedTime, AlertEvent, Antecedent, FuzzyInferenceEngine,
    FuzzyVariable, LabelScheme, PatientProfile, Rule, Universe,
};

pub mod generators;

/// Antecedents of the reference engine: (name, min, max, step)
pub const REFERENCE_UNIVERSES: [(&str, f64, f64, f64); 6] = [
    ("oxygen_saturation", 85.0, 100.0, 1.0),
    ("respiratory_rate", 10.0, 59.0, 1.0),
    ("cough_count", 0.0, 19.0, 1.0),
    ("sleep_interruptions", 0.0, 9.0, 1.0),
    ("heart_rate", 50.0, 149.0, 1.0),
    ("temperature", 35.0, 40.9, 0.1),
];

/// Reference engine: six quality-partitioned vitals, three rules
///
/// - any vital poor → risk high
/// - every vital good → risk low
/// - any vital average → risk medium
pub fn respiratory_risk_engine() -> FuzzyInferenceEngine {
    let antecedents: Vec<FuzzyVariable> = REFERENCE_UNIVERSES
        .iter()
        .map(|&(name, min, max, step)| {
            FuzzyVariable::partition_auto(name, Universe::new(min, max, step).unwrap(), &LabelScheme::Quality)
                .unwrap()
        })
        .collect();
    let risk = FuzzyVariable::partition_auto("risk", Universe::new(0.0, 100.0, 1.0).unwrap(), &LabelScheme::Level)
        .unwrap();

    let each = |label: &str| -> Vec<Antecedent> {
        REFERENCE_UNIVERSES
            .iter()
            .map(|(name, ..)| Antecedent::is(*name, label))
            .collect()
    };

    FuzzyInferenceEngine::builder()
        .name("respiratory_risk_v1")
        .antecedents(antecedents)
        .consequent(risk)
        .rule(Rule::new(Antecedent::any(each("poor")), "risk", "high"))
        .rule(Rule::new(Antecedent::all(each("good")), "risk", "low"))
        .rule(Rule::new(Antecedent::any(each("average")), "risk", "medium"))
        .build()
        .unwrap()
}

/// Shared handle to [`respiratory_risk_engine`]
pub fn shared_engine() -> Arc<FuzzyInferenceEngine> {
    Arc::new(respiratory_risk_engine())
}

/// Sink that keeps every alert for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    alerts: Arc<Mutex<Vec<AlertEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<AlertEvent> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for RecordingSink {
    fn deliver(&self, alert: AlertEvent) {
        self.alerts.lock().unwrap().push(alert);
    }
}

/// Clock frozen on the reference assessment day, 2025-03-01
pub fn assessment_day() -> FixedTime {
    FixedTime::at_date(date(2025, 3, 1))
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Adult born 1980-01-01
pub fn adult() -> PatientProfile {
    PatientProfile::new("adult-1", Some(date(1980, 1, 1)))
}

/// Infant born 2024-09-01 (six months old on the assessment day)
pub fn infant() -> PatientProfile {
    PatientProfile::new("infant-1", Some(date(2024, 9, 1)))
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}
