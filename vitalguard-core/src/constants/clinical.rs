//! Clinical Constants for VitalGuard
//!
//! Age-stratified vital-sign cutoffs and the physiological domains used to
//! reject implausible readings. The tables are deliberately declarative: a
//! reviewer can audit every cutoff here without reading any control flow.

use crate::alerts::SeverityBand;
use crate::thresholds::{AgeCategory, ThresholdSet};

// ===== AGE BANDS =====

/// Exclusive upper age bound (years) for each banded category, youngest first.
///
/// Any age at or above the last bound is an adult. Bands are contiguous, so
/// every non-negative age maps to exactly one category.
///
/// Source: WHO IMCI age groupings (infant < 1 y, preschool < 5 y, school age < 13 y)
pub const AGE_BANDS: [(f64, AgeCategory); 3] = [
    (1.0, AgeCategory::Infant),
    (5.0, AgeCategory::Preschooler),
    (13.0, AgeCategory::SchoolAge),
];

// ===== THRESHOLD TABLE =====

/// Alert thresholds per age category.
///
/// | category     | SpO2 min | RR max | HR low | HR high |
/// |--------------|----------|--------|--------|---------|
/// | infant       | 94       | 60     | 60     | 120     |
/// | preschooler  | 94       | 40     | 60     | 110     |
/// | school_age   | 94       | 30     | 60     | 100     |
/// | adult        | 92       | 25     | 60     | 100     |
///
/// There is intentionally no row for [`AgeCategory::Unknown`]: lookup fails closed.
pub const THRESHOLD_TABLE: [(AgeCategory, ThresholdSet); 4] = [
    (
        AgeCategory::Infant,
        ThresholdSet {
            oxygen_saturation_min: 94.0,
            respiratory_rate_max: 60.0,
            heart_rate_min: 60.0,
            heart_rate_max: 120.0,
        },
    ),
    (
        AgeCategory::Preschooler,
        ThresholdSet {
            oxygen_saturation_min: 94.0,
            respiratory_rate_max: 40.0,
            heart_rate_min: 60.0,
            heart_rate_max: 110.0,
        },
    ),
    (
        AgeCategory::SchoolAge,
        ThresholdSet {
            oxygen_saturation_min: 94.0,
            respiratory_rate_max: 30.0,
            heart_rate_min: 60.0,
            heart_rate_max: 100.0,
        },
    ),
    (
        AgeCategory::Adult,
        ThresholdSet {
            oxygen_saturation_min: 92.0,
            respiratory_rate_max: 25.0,
            heart_rate_min: 60.0,
            heart_rate_max: 100.0,
        },
    ),
];

/// Message attached to every threshold alert.
pub const EMERGENCY_MESSAGE: &str =
    "Emergency: vital signs outside safe limits for the patient's age group";

// ===== SEVERITY BANDS =====

/// Exclusive upper risk score for each band, lowest first.
///
/// Scores at or above the last bound are [`SeverityBand::Severe`].
pub const SEVERITY_BREAKPOINTS: [(f64, SeverityBand); 3] = [
    (30.0, SeverityBand::Low),
    (60.0, SeverityBand::Moderate),
    (80.0, SeverityBand::High),
];

// ===== PHYSIOLOGICAL DOMAINS =====
//
// Plausibility limits, not alert limits. A reading outside these bounds is a
// sensor or transcription fault and is rejected before any inference runs.

/// Respiratory rate domain (breaths/min).
///
/// Neonates peak around 60-80; anything above 150 is not breathing.
pub const RESPIRATORY_RATE_DOMAIN: (f64, f64) = (0.0, 150.0);

/// Heart rate domain (beats/min).
///
/// Source: maximal neonatal SVT rates rarely exceed 300 bpm
pub const HEART_RATE_DOMAIN: (f64, f64) = (0.0, 300.0);

/// Peripheral oxygen saturation domain (%).
pub const OXYGEN_SATURATION_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Core body temperature domain (°C).
///
/// Source: survivable extremes of accidental hypothermia and heat stroke
pub const TEMPERATURE_DOMAIN: (f64, f64) = (25.0, 45.0);

/// Coughs counted in one observation window.
pub const COUGH_COUNT_DOMAIN: (f64, f64) = (0.0, 1000.0);

/// Sleep interruptions counted in one night.
pub const SLEEP_INTERRUPTIONS_DOMAIN: (f64, f64) = (0.0, 100.0);
