//! Fuzzy Engine Constants

/// Canonical labels for a three-way quality partition, low end first.
pub const QUALITY_LABELS: [&str; 3] = ["poor", "average", "good"];

/// Canonical labels for a three-way level partition, low end first.
pub const LEVEL_LABELS: [&str; 3] = ["low", "medium", "high"];

/// Lowest risk score the pipeline accepts from an engine.
pub const RISK_SCORE_MIN: f64 = 0.0;

/// Highest risk score the pipeline accepts from an engine.
pub const RISK_SCORE_MAX: f64 = 100.0;

/// Upper bound on discretization points per universe.
///
/// Keeps a mistyped step (e.g. 1e-9) from allocating gigabytes at build time.
pub const MAX_UNIVERSE_POINTS: usize = 100_000;

/// Relative slack when counting universe points, absorbs `0.1`-style step rounding.
pub const UNIVERSE_STEP_EPSILON: f64 = 1e-9;
