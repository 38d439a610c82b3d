//! Risk Assessment Pipeline
//!
//! ## Overview
//!
//! One call to [`RiskAssessmentPipeline::assess`] runs both judgements for a
//! patient and merges them into a [`RiskReport`]:
//!
//! ```text
//!                         ┌──► FuzzyInferenceEngine ──► score ──► SeverityBand
//! signals ──► vitals ─────┤
//!   (or vitals directly)  └──► ThresholdClassifier ──► violations ──► AlertEvent ──► sink
//!                                      ▲
//!                    PatientProfile ───┘ (age category)
//! ```
//!
//! ## Failure Isolation
//!
//! Only vital extraction can fail the whole assessment: without vitals there
//! is nothing to judge. After that the halves are independent. A fuzzy engine
//! that fires no rule does not hide a low SpO2 alert, and a patient without a
//! date of birth still gets a risk score. A failed half is kept in the report
//! as `Err` and logged.
//!
//! ## Sharing
//!
//! The engine sits behind an `Arc`; any number of pipelines (one per ward,
//! per sink, per thread) can share one compiled engine. `assess` takes
//! `&self` and keeps no state between calls.

mod builder;
mod report;

pub use builder::PipelineBuilder;
pub use report::{AssessmentInput, FuzzyAssessment, RiskReport, ThresholdAssessment};

use alloc::{string::ToString, sync::Arc};
use core::fmt;

use crate::{
    alerts::{AlertEvent, SeverityBand},
    errors::AssessmentResult,
    fuzzy::{CrispInputs, FuzzyInferenceEngine},
    patient::PatientProfile,
    signal::SignalProcessor,
    thresholds::ThresholdClassifier,
    time::{calendar_date, TimeSource},
    traits::AlertSink,
    vitals::VitalSigns,
};

/// Orchestrates vitals extraction, fuzzy scoring and threshold alerting
pub struct RiskAssessmentPipeline<S, T> {
    engine: Arc<FuzzyInferenceEngine>,
    classifier: ThresholdClassifier,
    processor: SignalProcessor,
    sink: S,
    clock: T,
}

impl RiskAssessmentPipeline<(), ()> {
    /// Start a pipeline around a compiled engine
    pub fn builder(engine: Arc<FuzzyInferenceEngine>) -> PipelineBuilder {
        PipelineBuilder::new(engine)
    }
}

impl<S: AlertSink, T: TimeSource> RiskAssessmentPipeline<S, T> {
    /// Shared fuzzy engine
    pub fn engine(&self) -> &Arc<FuzzyInferenceEngine> {
        &self.engine
    }

    /// Threshold classifier
    pub fn classifier(&self) -> &ThresholdClassifier {
        &self.classifier
    }

    /// Alert sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Assess one patient
    ///
    /// Fails only when vitals cannot be derived from the input. Threshold
    /// violations are delivered to the sink before the report is returned.
    pub fn assess(
        &self,
        input: impl Into<AssessmentInput>,
        patient: &PatientProfile,
    ) -> AssessmentResult<RiskReport> {
        let vitals = match input.into() {
            AssessmentInput::Vitals(vitals) => vitals,
            AssessmentInput::Signals(raw) => self.processor.vitals_from(&raw)?,
        };

        let timestamp = self.clock.now();
        let age_years = calendar_date(timestamp).and_then(|today| patient.age_years(today));
        let category = self.classifier.categorize(age_years);

        let fuzzy = self
            .engine
            .evaluate(&self.engine_inputs(&vitals))
            .map(|risk_score| FuzzyAssessment {
                risk_score,
                severity: SeverityBand::from_score(risk_score),
            });
        match &fuzzy {
            Ok(f) => log_debug!(
                "patient {}: risk score {:.2} ({})",
                patient.id(),
                f.risk_score,
                f.severity
            ),
            Err(err) => log_warn!("patient {}: risk score unavailable: {}", patient.id(), err),
        }

        let thresholds = self
            .classifier
            .thresholds(category)
            .map(|thresholds| ThresholdAssessment {
                violations: self.classifier.evaluate(&vitals, &thresholds),
                thresholds,
            });

        match &thresholds {
            Ok(t) if t.is_alert() => {
                let severity = fuzzy.as_ref().ok().map(|f| f.severity);
                let alert = AlertEvent::emergency(patient.id(), &t.violations, severity, timestamp);
                log_warn!(
                    "patient {}: {} threshold violation(s), raising alert",
                    patient.id(),
                    t.violations.len()
                );
                self.sink.deliver(alert);
            }
            Ok(_) => {}
            Err(err) => log_warn!(
                "patient {}: thresholds unavailable ({}): {}",
                patient.id(),
                category,
                err
            ),
        }

        Ok(RiskReport {
            patient_id: patient.id().to_string(),
            vitals,
            age_years,
            category,
            fuzzy,
            thresholds,
            timestamp,
        })
    }

    /// Crisp inputs restricted to the vitals the engine reasons about
    fn engine_inputs(&self, vitals: &VitalSigns) -> CrispInputs {
        vitals
            .crisp_inputs()
            .into_iter()
            .filter(|(name, _)| self.engine.antecedent(name).is_some())
            .collect()
    }
}

impl<S, T> fmt::Debug for RiskAssessmentPipeline<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskAssessmentPipeline")
            .field("engine", &self.engine.name())
            .field("classifier", &self.classifier)
            .field("processor", &self.processor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::AssessmentError,
        fuzzy::{Antecedent, FuzzyVariable, LabelScheme, Rule, Universe},
        thresholds::AgeCategory,
        time::FixedTime,
    };
    use alloc::{format, vec::Vec};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn spo2_engine() -> Arc<FuzzyInferenceEngine> {
        let spo2 = FuzzyVariable::partition_auto(
            "oxygen_saturation",
            Universe::new(85.0, 100.0, 1.0).unwrap(),
            &LabelScheme::Quality,
        )
        .unwrap();
        let risk = FuzzyVariable::partition_auto("risk", Universe::new(0.0, 100.0, 1.0).unwrap(), &LabelScheme::Level)
            .unwrap();

        Arc::new(
            FuzzyInferenceEngine::builder()
                .antecedent(spo2)
                .consequent(risk)
                .rule(Rule::new(Antecedent::is("oxygen_saturation", "poor"), "risk", "high"))
                .rule(Rule::new(Antecedent::is("oxygen_saturation", "average"), "risk", "medium"))
                .build()
                .unwrap(),
        )
    }

    fn today() -> FixedTime {
        FixedTime::at_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    fn adult() -> PatientProfile {
        PatientProfile::new("adult-1", NaiveDate::from_ymd_opt(1980, 1, 1))
    }

    #[test]
    fn alert_carries_reasons_and_severity() {
        let delivered = Mutex::new(Vec::new());
        let sink = |alert: AlertEvent| delivered.lock().unwrap().push(alert);
        let pipeline = RiskAssessmentPipeline::builder(spo2_engine())
            .build(sink, today())
            .unwrap();

        let vitals = VitalSigns::new(50.0, 130.0, 88.0, 37.0, 0.0, 0.0).unwrap();
        let report = pipeline.assess(vitals, &adult()).unwrap();

        assert_eq!(report.category, AgeCategory::Adult);
        assert!(report.alert_raised());
        assert_eq!(report.violations().len(), 3);

        let alerts = delivered.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].patient_id, "adult-1");
        assert_eq!(alerts[0].reasons.len(), 3);
        assert_eq!(alerts[0].severity, report.severity());
        assert_eq!(alerts[0].severity, Some(SeverityBand::Moderate));
        assert_eq!(alerts[0].timestamp, today().now());
    }

    #[test]
    fn engine_covering_some_vitals_still_scores() {
        let pipeline = RiskAssessmentPipeline::builder(spo2_engine())
            .build(crate::traits::DiscardSink, today())
            .unwrap();

        // Cough and sleep values the engine has no antecedent for
        let vitals = VitalSigns::new(18.0, 80.0, 86.0, 37.0, 12.0, 4.0).unwrap();
        let report = pipeline.assess(vitals, &adult()).unwrap();

        let fuzzy = report.fuzzy.as_ref().unwrap();
        assert!((fuzzy.risk_score - 71.78).abs() < 0.01, "score {}", fuzzy.risk_score);
        assert_eq!(report.severity(), Some(SeverityBand::High));
    }

    #[test]
    fn halves_fail_independently() {
        let delivered = Mutex::new(Vec::new());
        let sink = |alert: AlertEvent| delivered.lock().unwrap().push(alert);
        let pipeline = RiskAssessmentPipeline::builder(spo2_engine())
            .build(sink, today())
            .unwrap();

        // SpO2 fully "good": no rule fires, but the threshold half still alerts
        let vitals = VitalSigns::new(40.0, 80.0, 100.0, 37.0, 0.0, 0.0).unwrap();
        let report = pipeline.assess(vitals, &adult()).unwrap();
        assert!(matches!(report.fuzzy, Err(AssessmentError::NoRuleFired { .. })));
        assert!(report.alert_raised());
        assert_eq!(delivered.lock().unwrap()[0].severity, None);

        // Unknown age: score available, thresholds unavailable, no alert
        let anonymous = PatientProfile::new("anon", None);
        let vitals = VitalSigns::new(40.0, 80.0, 90.0, 37.0, 0.0, 0.0).unwrap();
        let report = pipeline.assess(vitals, &anonymous).unwrap();
        assert!(report.risk_score().is_some());
        assert_eq!(report.thresholds, Err(AssessmentError::UnknownCategory));
        assert_eq!(report.category, AgeCategory::Unknown);
        assert_eq!(delivered.lock().unwrap().len(), 1);
    }

    #[test]
    fn engine_must_fit_the_pipeline() {
        let foreign = FuzzyVariable::partition_auto("pressure", Universe::new(0.0, 10.0, 1.0).unwrap(), &LabelScheme::Level)
            .unwrap();
        let risk = FuzzyVariable::partition_auto("risk", Universe::new(0.0, 100.0, 1.0).unwrap(), &LabelScheme::Level)
            .unwrap();
        let engine = FuzzyInferenceEngine::builder()
            .antecedent(foreign)
            .consequent(risk)
            .rule(Rule::new(Antecedent::is("pressure", "high"), "risk", "high"))
            .build()
            .unwrap();

        let result = RiskAssessmentPipeline::builder(Arc::new(engine))
            .build(crate::traits::DiscardSink, today());
        assert!(matches!(result, Err(ref e) if e.is_configuration()));
    }

    #[test]
    fn debug_names_the_engine() {
        let pipeline = RiskAssessmentPipeline::builder(spo2_engine())
            .build(crate::traits::DiscardSink, today())
            .unwrap();
        let rendered = format!("{pipeline:?}");
        assert!(rendered.starts_with("RiskAssessmentPipeline"));
        assert!(rendered.contains(pipeline.engine().name()));
    }
}
