//! Assessment inputs and the combined risk report

use alloc::string::String;
use core::fmt;

use crate::{
    alerts::SeverityBand,
    errors::AssessmentResult,
    signal::RawSignals,
    thresholds::{AgeCategory, ThresholdSet, ThresholdViolation, Violations},
    time::Timestamp,
    vitals::VitalSigns,
};

/// What an assessment starts from
#[derive(Debug, Clone)]
pub enum AssessmentInput {
    /// Vitals already measured or charted
    Vitals(VitalSigns),
    /// Raw wearable series to extract vitals from
    Signals(RawSignals),
}

impl From<VitalSigns> for AssessmentInput {
    fn from(vitals: VitalSigns) -> Self {
        AssessmentInput::Vitals(vitals)
    }
}

impl From<RawSignals> for AssessmentInput {
    fn from(signals: RawSignals) -> Self {
        AssessmentInput::Signals(signals)
    }
}

/// Fuzzy half of a report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyAssessment {
    /// Defuzzified risk score in [0, 100]
    pub risk_score: f64,
    /// Band of the score
    pub severity: SeverityBand,
}

/// Threshold half of a report
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdAssessment {
    /// Cutoffs that were applied
    pub thresholds: ThresholdSet,
    /// Violations in check order
    pub violations: Violations,
}

impl ThresholdAssessment {
    /// Whether any cutoff was crossed
    pub fn is_alert(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Outcome of one assessment
///
/// The two halves are independent: either can be unavailable (carrying the
/// error that stopped it) while the other completed.
///
/// The risk score is only as clinical as the engine behind it. The built-in
/// respiratory engine labels the low end of every universe "poor", including
/// respiratory rate and temperature, so ordinary adult vitals score around 60
/// and low readings across the board score above 80.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskReport {
    /// Patient assessed
    pub patient_id: String,
    /// Crisp vitals both halves were computed from
    pub vitals: VitalSigns,
    /// Age at assessment time, when the date of birth is known
    pub age_years: Option<f64>,
    /// Age category used for the threshold lookup
    pub category: AgeCategory,
    /// Fuzzy risk score and band
    pub fuzzy: AssessmentResult<FuzzyAssessment>,
    /// Threshold checks
    pub thresholds: AssessmentResult<ThresholdAssessment>,
    /// Assessment time, milliseconds since the Unix epoch
    pub timestamp: Timestamp,
}

impl RiskReport {
    /// Risk score, if the fuzzy half completed
    pub fn risk_score(&self) -> Option<f64> {
        self.fuzzy.as_ref().ok().map(|f| f.risk_score)
    }

    /// Severity band, if the fuzzy half completed
    pub fn severity(&self) -> Option<SeverityBand> {
        self.fuzzy.as_ref().ok().map(|f| f.severity)
    }

    /// Violations; empty when none or when the threshold half is unavailable
    pub fn violations(&self) -> &[ThresholdViolation] {
        self.thresholds
            .as_ref()
            .map(|t| t.violations.as_slice())
            .unwrap_or(&[])
    }

    /// Whether an alert was raised for this assessment
    pub fn alert_raised(&self) -> bool {
        self.thresholds.as_ref().is_ok_and(ThresholdAssessment::is_alert)
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Patient {} ({}", self.patient_id, self.category)?;
        if let Some(age) = self.age_years {
            write!(f, ", {age:.1} years")?;
        }
        writeln!(f, ")")?;

        match &self.fuzzy {
            Ok(fuzzy) => writeln!(f, "Status: {:.2} ({})", fuzzy.risk_score, fuzzy.severity)?,
            Err(err) => writeln!(f, "Status: unavailable ({err})")?,
        }

        writeln!(f, "Vitals: {}", self.vitals)?;

        match &self.thresholds {
            Ok(t) if t.violations.is_empty() => f.write_str("Thresholds: within limits"),
            Ok(t) => {
                f.write_str("Thresholds: ALERT")?;
                for violation in &t.violations {
                    write!(f, "\n  - {violation}")?;
                }
                Ok(())
            }
            Err(err) => write!(f, "Thresholds: unavailable ({err})"),
        }
    }
}
