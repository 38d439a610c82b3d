//! Fuzzy Logic Risk Inference
//!
//! ## Overview
//!
//! Clinical indicators rarely cross a single sharp line. A saturation of 93%
//! is "somewhat poor" and "somewhat average" at the same time. This module
//! models each indicator as a linguistic variable with overlapping membership
//! functions and combines them with Mamdani inference into one continuous
//! risk score.
//!
//! ## Building Blocks
//!
//! | Type                    | Role                                              |
//! |-------------------------|---------------------------------------------------|
//! | [`MembershipFunction`]  | Labeled triangle, degree in [0, 1]                |
//! | [`Universe`]            | Closed interval plus discretization step          |
//! | [`FuzzyVariable`]       | Named universe with uniquely labeled functions    |
//! | [`Antecedent`], [`Rule`]| IF-expression trees (AND = min, OR = max)         |
//! | [`FuzzyInferenceEngine`]| Validated, compiled, immutable rule system        |
//!
//! ## Example
//!
//! ```rust
//! use vitalguard_core::fuzzy::{
//!     Antecedent, CrispInputs, FuzzyInferenceEngine, FuzzyVariable, LabelScheme, Rule, Universe,
//! };
//!
//! let spo2 = FuzzyVariable::partition_auto(
//!     "oxygen_saturation",
//!     Universe::new(85.0, 100.0, 1.0)?,
//!     &LabelScheme::Quality,
//! )?;
//! let risk = FuzzyVariable::partition_auto("risk", Universe::new(0.0, 100.0, 1.0)?, &LabelScheme::Level)?;
//!
//! let engine = FuzzyInferenceEngine::builder()
//!     .antecedent(spo2)
//!     .consequent(risk)
//!     .rule(Rule::new(Antecedent::is("oxygen_saturation", "poor"), "risk", "high"))
//!     .rule(Rule::new(Antecedent::is("oxygen_saturation", "good"), "risk", "low"))
//!     .build()?;
//!
//! let mut inputs = CrispInputs::new();
//! inputs.insert("oxygen_saturation".into(), 87.0);
//! assert!(engine.evaluate(&inputs)? > 50.0);
//! # Ok::<(), vitalguard_core::AssessmentError>(())
//! ```

mod engine;
mod membership;
mod rule;
mod variable;

pub use engine::{CrispInputs, EngineBuilder, FuzzyInferenceEngine, InferenceTrace};
pub use membership::MembershipFunction;
pub use rule::{Antecedent, Rule};
pub use variable::{FuzzyVariable, LabelScheme, Universe};
