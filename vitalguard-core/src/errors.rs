//! Error Types for Risk Assessment Failures
//!
//! ## Design Philosophy
//!
//! A clinical estimator must never hand a guessed number to a decision. Every
//! stage that cannot produce a trustworthy value returns an error instead, and
//! that error names the vital or the inference stage that caused it.
//!
//! 1. **One Taxonomy**: Signal extraction, fuzzy inference, threshold lookup and
//!    engine construction all report through [`AssessmentError`], so a caller of
//!    the pipeline only matches on one type.
//!
//! 2. **Fail Fast on Configuration**: Malformed membership breakpoints or rules
//!    referencing undefined variables/labels are rejected when the engine is
//!    built, not when it is evaluated.
//!
//! 3. **Scoped to One Assessment**: None of these errors poison shared state.
//!    Engines and classifiers are immutable; the next patient is unaffected.
//!
//! ## Error Categories
//!
//! ### Signal Problems
//! - `InsufficientSignal`: too few samples or peaks to estimate a rate
//! - `DegenerateSignal`: zero DC level (or flat channel) in SpO2 computation
//!
//! ### Input Problems
//! - `InvalidValue`: NaN or infinite input
//! - `OutOfRange`: a vital outside its physiological domain
//! - `UnknownVariable` / `UnknownLabel`: a query naming something the engine does not define
//!
//! ### Inference and Lookup
//! - `NoRuleFired`: the aggregated fuzzy output set is empty
//! - `UnknownCategory`: no age is available, so no thresholds apply
//!
//! ### Construction
//! - `InvalidConfiguration`: detected while building variables or engines
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use vitalguard_core::{AssessmentError, Signal, SignalProcessor};
//!
//! let processor = SignalProcessor::default();
//! let flat = Signal::new(vec![1.0; 100], 50.0)?;
//!
//! match processor.heart_rate(&flat) {
//!     Ok(bpm) => println!("heart rate {bpm:.0} bpm"),
//!     Err(AssessmentError::InsufficientSignal { vital, .. }) => {
//!         // Re-acquire the sensor window, do not substitute a value
//!         println!("not enough {vital} signal");
//!     }
//!     Err(other) => println!("assessment failed: {other}"),
//! }
//! # Ok::<(), AssessmentError>(())
//! ```

use alloc::string::String;

use thiserror_no_std::Error;

use crate::vitals::Vital;

/// Result type for assessment operations
pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Everything that can stop a single assessment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// Too few samples or peaks to estimate a rate
    #[error("Insufficient {vital} signal: need {required} {what}, have {available}")]
    InsufficientSignal {
        /// Vital being estimated
        vital: Vital,
        /// What was counted ("smoothed samples", "peaks", ...)
        what: &'static str,
        /// Minimum count needed
        required: usize,
        /// Count actually available
        available: usize,
    },

    /// Signal cannot produce a meaningful ratio (zero DC level, flat channel)
    #[error("Degenerate {vital} signal: {reason}")]
    DegenerateSignal {
        /// Vital being estimated
        vital: Vital,
        /// Which property of the signal is degenerate
        reason: &'static str,
    },

    /// Aggregated fuzzy output set is empty; there is nothing to defuzzify
    #[error("No rule fired: aggregated output of '{consequent}' is empty at defuzzification")]
    NoRuleFired {
        /// Name of the consequent variable being defuzzified
        consequent: String,
    },

    /// No age is available, so no threshold set applies
    #[error("Unknown age category: no clinical thresholds without a date of birth")]
    UnknownCategory,

    /// Engine or variable construction rejected its inputs
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the defect
        reason: String,
    },

    /// NaN or infinite value
    #[error("Invalid value for {variable}: not a finite number")]
    InvalidValue {
        /// Variable or vital that carried the value
        variable: String,
    },

    /// Vital outside its physiological domain
    #[error("{vital} value {value} outside physiological range [{min}, {max}]")]
    OutOfRange {
        /// Vital that failed the range check
        vital: Vital,
        /// Offending value
        value: f64,
        /// Lowest plausible value
        min: f64,
        /// Highest plausible value
        max: f64,
    },

    /// Crisp input names a variable the engine does not define
    #[error("Unknown fuzzy variable '{name}'")]
    UnknownVariable {
        /// Name that could not be resolved
        name: String,
    },

    /// Query names a label the variable does not define
    #[error("Unknown label '{label}' for fuzzy variable '{variable}'")]
    UnknownLabel {
        /// Variable that was queried
        variable: String,
        /// Label that could not be resolved
        label: String,
    },
}

impl AssessmentError {
    /// Shorthand for configuration errors built from a formatted message
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Whether the error comes from engine or variable construction
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    /// Vital this error is attributed to, if any
    pub fn vital(&self) -> Option<Vital> {
        match self {
            Self::InsufficientSignal { vital, .. }
            | Self::DegenerateSignal { vital, .. }
            | Self::OutOfRange { vital, .. } => Some(*vital),
            _ => None,
        }
    }
}
