//! Constants for VitalGuard Core
//!
//! Centralized, documented constants used throughout the risk engine. Clinical
//! cutoffs in particular live here as data tables so they can be audited
//! independently of the code that applies them.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Clinical**: Age bands, threshold table, severity bands, physiological domains
//! - **Signal**: Smoothing, peak spacing and SpO2 calibration parameters
//! - **Fuzzy**: Label schemes, score range and discretization limits
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include units in names
//! 3. Reference the clinical or engineering source where one exists

/// Clinical cutoffs, age bands and physiological domains.
pub mod clinical;

/// Signal processing parameters for rate and saturation estimation.
pub mod signal;

/// Fuzzy engine limits and canonical label schemes.
pub mod fuzzy;

// Re-export commonly used constants for convenience
pub use clinical::{
    AGE_BANDS, EMERGENCY_MESSAGE, SEVERITY_BREAKPOINTS, THRESHOLD_TABLE,
};

pub use signal::{
    MIN_PEAK_SPACING_S, SECONDS_PER_MINUTE, SMOOTHING_WINDOW_SAMPLES,
    SPO2_CLAMP_MAX_PCT, SPO2_CLAMP_MIN_PCT,
};

pub use fuzzy::{LEVEL_LABELS, QUALITY_LABELS, RISK_SCORE_MAX, RISK_SCORE_MIN};
