//! Versioned Fuzzy Engine Documents
//!
//! ## Overview
//!
//! A risk engine is data: six linguistic variables, one consequent and a
//! handful of rules. This crate keeps that data out of code as JSON
//! documents, so a clinical team can review and version an engine the way
//! they version any other protocol.
//!
//! ## Document Shape
//!
//! ```json
//! {
//!   "name": "respiratory_risk",
//!   "version": "v1",
//!   "antecedents": [
//!     {"name": "oxygen_saturation",
//!      "universe": {"min": 85, "max": 100, "step": 1},
//!      "partition": "quality"}
//!   ],
//!   "consequent": {"name": "risk",
//!                  "universe": {"min": 0, "max": 100, "step": 1},
//!                  "partition": "level"},
//!   "rules": [
//!     {"if": {"is": {"variable": "oxygen_saturation", "label": "poor"}},
//!      "then": {"variable": "risk", "label": "high"}}
//!   ]
//! }
//! ```
//!
//! A variable is either an automatic partition (`"quality"`, `"level"` or
//! `{"custom": [..]}`) or an explicit list of triangles under `"terms"`.
//! Conditions nest with `"all"` and `"any"`.
//!
//! ## Versioning
//!
//! 1. **Version in Name**: `respiratory_risk_v1`, `respiratory_risk_v2`
//! 2. **Never Overwrite**: a registered version is immutable
//! 3. **Deprecate, Don't Delete**: deprecated versions stay addressable but
//!    are skipped when resolving the latest
//!
//! ## Usage Example
//!
//! ```rust
//! use vitalguard_schemas::GLOBAL_REGISTRY;
//! use vitalguard_core::VitalSigns;
//!
//! let engine = GLOBAL_REGISTRY.latest_engine("respiratory_risk")?;
//! let vitals = VitalSigns::new(18.0, 80.0, 97.0, 36.9, 2.0, 1.0)?;
//! let score = engine.evaluate(&vitals.crisp_inputs())?;
//! assert!((0.0..=100.0).contains(&score));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use vitalguard_core::AssessmentError;

pub mod document;
pub mod documents;
pub mod registry;
pub mod validation;

pub use document::{
    load_from_path, load_from_str, EngineDocument, ExprDoc, PartitionDoc, RuleDoc, TargetDoc,
    TermDoc, UniverseDoc, VariableDoc,
};
pub use documents::{builtin_document, builtin_documents, respiratory_risk_v1};
pub use registry::{ConfigRegistry, EngineMetadata, GLOBAL_REGISTRY};
pub use validation::{validate_document, IssueType, Severity, ValidationIssue, ValidationReport};

/// Document-related errors
#[derive(Debug, Clone, thiserror_no_std::Error)]
pub enum ConfigError {
    /// JSON could not be parsed or serialized
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// Document file could not be read
    #[error("Failed to read {path}: {reason}")]
    Io {
        /// File that was requested
        path: String,
        /// Underlying I/O error
        reason: String,
    },

    /// Document failed validation or was already registered
    #[error("Invalid document: {0}")]
    Invalid(String),

    /// No document (or no active version) under that name
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Engine builder rejected the described engine
    #[error("Engine construction failed: {0}")]
    Engine(#[from] AssessmentError),

    /// A registry lock was poisoned by a panicking writer
    #[error("Registry lock poisoned")]
    LockPoisoned,
}
