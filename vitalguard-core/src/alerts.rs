//! Alert events and severity bands

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::clinical::{EMERGENCY_MESSAGE, SEVERITY_BREAKPOINTS},
    thresholds::ThresholdViolation,
    time::Timestamp,
};

/// Coarse band of a continuous risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeverityBand {
    /// Score under 30
    Low,
    /// 30 to under 60
    Moderate,
    /// 60 to under 80
    High,
    /// 80 and above
    Severe,
}

impl SeverityBand {
    /// Band for a risk score in [0, 100]
    pub fn from_score(score: f64) -> Self {
        SEVERITY_BREAKPOINTS
            .iter()
            .find(|(upper, _)| score < *upper)
            .map_or(SeverityBand::Severe, |(_, band)| *band)
    }

    /// Machine name
    pub const fn name(&self) -> &'static str {
        match self {
            SeverityBand::Low => "low",
            SeverityBand::Moderate => "moderate",
            SeverityBand::High => "high",
            SeverityBand::Severe => "severe",
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Threshold alert handed to an [`AlertSink`](crate::traits::AlertSink)
///
/// The core never stores these; ownership passes to the sink.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlertEvent {
    /// Patient the alert concerns
    pub patient_id: String,
    /// Fixed emergency message
    pub message: String,
    /// One rendered reason per violation, in check order
    pub reasons: Vec<String>,
    /// Band of the fuzzy score; `None` when the score was unavailable
    pub severity: Option<SeverityBand>,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: Timestamp,
}

impl AlertEvent {
    /// Emergency alert for a set of threshold violations
    pub fn emergency(
        patient_id: impl Into<String>,
        violations: &[ThresholdViolation],
        severity: Option<SeverityBand>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            message: EMERGENCY_MESSAGE.to_string(),
            reasons: violations.iter().map(ToString::to_string).collect(),
            severity,
            timestamp,
        }
    }
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.patient_id, self.message)?;
        if let Some(severity) = self.severity {
            write!(f, " (risk {severity})")?;
        }
        for reason in &self.reasons {
            write!(f, "\n  - {reason}")?;
        }
        Ok(())
    }
}
