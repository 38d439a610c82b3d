//! Core risk engine for VitalGuard
//!
//! Turns wearable biosignals and bedside observations into a patient risk
//! assessment. Two independent judgements are produced for every patient:
//!
//! - a continuous risk score from a Mamdani fuzzy inference engine
//! - a deterministic list of age-banded clinical threshold violations
//!
//! Key constraints:
//! - No I/O in the core: patient metadata comes in through [`traits::PatientDirectory`],
//!   alerts go out through [`traits::AlertSink`]
//! - Engines and classifiers are immutable once built and can be shared
//!   across threads for concurrent assessments
//! - Missing or degenerate signals are errors, never guessed values
//!
//! ```no_run
//! use std::sync::Arc;
//! use vitalguard_core::{
//!     FuzzyInferenceEngine, PatientProfile, RiskAssessmentPipeline, VitalSigns,
//!     time::SystemTime, traits::DiscardSink,
//! };
//!
//! # fn engine() -> FuzzyInferenceEngine { unimplemented!() }
//! let pipeline = RiskAssessmentPipeline::builder(Arc::new(engine()))
//!     .build(DiscardSink, SystemTime)?;
//!
//! let vitals = VitalSigns::new(18.0, 72.0, 97.0, 36.8, 2.0, 1.0)?;
//! let report = pipeline.assess(vitals, &PatientProfile::new("patient-7", None))?;
//! println!("{report}");
//! # Ok::<(), vitalguard_core::AssessmentError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod alerts;
pub mod constants;
pub mod errors;
pub mod fuzzy;
pub mod patient;
pub mod pipeline;
pub mod signal;
pub mod thresholds;
pub mod time;
pub mod traits;
pub mod vitals;

// Public API
pub use alerts::{AlertEvent, SeverityBand};
pub use errors::{AssessmentError, AssessmentResult};
pub use fuzzy::{
    Antecedent, CrispInputs, EngineBuilder, FuzzyInferenceEngine, FuzzyVariable, InferenceTrace,
    LabelScheme, MembershipFunction, Rule, Universe,
};
pub use patient::PatientProfile;
pub use pipeline::{
    AssessmentInput, FuzzyAssessment, PipelineBuilder, RiskAssessmentPipeline, RiskReport,
    ThresholdAssessment,
};
pub use signal::{RawSignals, Signal, SignalProcessor};
pub use thresholds::{AgeCategory, ThresholdClassifier, ThresholdSet, ThresholdViolation};
pub use vitals::{Vital, VitalSigns};

/// Crate version, as published
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
