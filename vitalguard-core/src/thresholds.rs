//! Age-Banded Clinical Thresholds
//!
//! ## Overview
//!
//! Independent of the fuzzy score, every assessment is checked against fixed
//! clinical cutoffs. Normal ranges depend heavily on age (a resting infant
//! breathes twice as fast as an adult), so the cutoffs are looked up per age
//! category:
//!
//! ```text
//! age (years)   0 ──── 1 ──────── 5 ──────────── 13 ──────────►
//! category        infant  preschooler   school_age      adult
//! ```
//!
//! Each band is closed at its lower bound and open at its upper bound. A
//! patient without a usable age is [`AgeCategory::Unknown`], and the threshold
//! lookup fails closed for that category: no cutoffs are guessed.
//!
//! ## Violations
//!
//! [`ThresholdClassifier::evaluate`] reports violations in a fixed order
//! (SpO2, respiratory rate, heart rate), at most one per vital. The list is
//! stored inline; an assessment never allocates for it.

use core::fmt;

use heapless::Vec as HeaplessVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::clinical::{AGE_BANDS, THRESHOLD_TABLE},
    errors::{AssessmentError, AssessmentResult},
    vitals::VitalSigns,
};

/// Upper bound on violations per assessment (one per checked vital)
pub const MAX_VIOLATIONS: usize = 3;

/// Ordered threshold violations of one assessment
pub type Violations = HeaplessVec<ThresholdViolation, MAX_VIOLATIONS>;

/// Age category that selects a threshold set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgeCategory {
    /// Under 1 year
    Infant,
    /// 1 to under 5 years
    Preschooler,
    /// 5 to under 13 years
    SchoolAge,
    /// 13 years and older
    Adult,
    /// No usable age
    Unknown,
}

impl AgeCategory {
    /// Machine name
    pub const fn name(&self) -> &'static str {
        match self {
            AgeCategory::Infant => "infant",
            AgeCategory::Preschooler => "preschooler",
            AgeCategory::SchoolAge => "school_age",
            AgeCategory::Adult => "adult",
            AgeCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Alert cutoffs for one age category
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdSet {
    /// SpO2 below this is low (%)
    pub oxygen_saturation_min: f64,
    /// Respiratory rate above this is high (breaths/min)
    pub respiratory_rate_max: f64,
    /// Heart rate below this is abnormal (bpm)
    pub heart_rate_min: f64,
    /// Heart rate above this is abnormal (bpm)
    pub heart_rate_max: f64,
}

/// One vital outside its age-specific limits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ThresholdViolation {
    /// SpO2 under the minimum
    LowOxygenSaturation {
        /// Measured SpO2 (%)
        value: f64,
        /// Category minimum (%)
        min: f64,
    },
    /// Respiratory rate over the maximum
    HighRespiratoryRate {
        /// Measured rate (breaths/min)
        value: f64,
        /// Category maximum (breaths/min)
        max: f64,
    },
    /// Heart rate outside [min, max]
    AbnormalHeartRate {
        /// Measured rate (bpm)
        value: f64,
        /// Category minimum (bpm)
        min: f64,
        /// Category maximum (bpm)
        max: f64,
    },
}

impl fmt::Display for ThresholdViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ThresholdViolation::LowOxygenSaturation { value, min } => {
                write!(f, "Low oxygen saturation: {value:.1}% (minimum {min}%)")
            }
            ThresholdViolation::HighRespiratoryRate { value, max } => write!(
                f,
                "High respiratory rate: {value:.1} breaths/min (maximum {max})"
            ),
            ThresholdViolation::AbnormalHeartRate { value, min, max } => write!(
                f,
                "Abnormal heart rate: {value:.1} bpm (expected {min}-{max})"
            ),
        }
    }
}

/// Deterministic age-banded threshold checks
#[derive(Debug, Clone)]
pub struct ThresholdClassifier {
    bands: &'static [(f64, AgeCategory)],
    table: &'static [(AgeCategory, ThresholdSet)],
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self::with_tables(&AGE_BANDS, &THRESHOLD_TABLE)
    }
}

impl ThresholdClassifier {
    /// Classifier over custom tables
    ///
    /// `bands` holds exclusive upper age bounds in ascending order; ages at or
    /// past the last bound are adults.
    pub const fn with_tables(
        bands: &'static [(f64, AgeCategory)],
        table: &'static [(AgeCategory, ThresholdSet)],
    ) -> Self {
        Self { bands, table }
    }

    /// Age category for an age in years
    ///
    /// Missing, negative and non-finite ages are [`AgeCategory::Unknown`].
    pub fn categorize(&self, age_years: Option<f64>) -> AgeCategory {
        let age = match age_years {
            Some(age) if age.is_finite() && age >= 0.0 => age,
            _ => return AgeCategory::Unknown,
        };

        self.bands
            .iter()
            .find(|(upper, _)| age < *upper)
            .map_or(AgeCategory::Adult, |(_, category)| *category)
    }

    /// Threshold set for a category; fails closed for `Unknown`
    pub fn thresholds(&self, category: AgeCategory) -> AssessmentResult<ThresholdSet> {
        self.table
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, set)| *set)
            .ok_or(AssessmentError::UnknownCategory)
    }

    /// Ordered violations of `thresholds` by `vitals`; empty means no alert
    pub fn evaluate(&self, vitals: &VitalSigns, thresholds: &ThresholdSet) -> Violations {
        let mut violations = Violations::new();

        let spo2 = vitals.oxygen_saturation();
        if spo2 < thresholds.oxygen_saturation_min {
            violations
                .push(ThresholdViolation::LowOxygenSaturation {
                    value: spo2,
                    min: thresholds.oxygen_saturation_min,
                })
                .ok();
        }

        let rr = vitals.respiratory_rate();
        if rr > thresholds.respiratory_rate_max {
            violations
                .push(ThresholdViolation::HighRespiratoryRate {
                    value: rr,
                    max: thresholds.respiratory_rate_max,
                })
                .ok();
        }

        let hr = vitals.heart_rate();
        if hr < thresholds.heart_rate_min || hr > thresholds.heart_rate_max {
            violations
                .push(ThresholdViolation::AbnormalHeartRate {
                    value: hr,
                    min: thresholds.heart_rate_min,
                    max: thresholds.heart_rate_max,
                })
                .ok();
        }

        violations
    }
}
