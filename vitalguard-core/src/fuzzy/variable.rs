//! Linguistic variables: a universe plus labeled membership functions

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    constants::fuzzy::{LEVEL_LABELS, MAX_UNIVERSE_POINTS, QUALITY_LABELS, UNIVERSE_STEP_EPSILON},
    errors::{AssessmentError, AssessmentResult},
};

use super::MembershipFunction;

/// Closed interval `[min, max]` discretized at a fixed step
///
/// The step sets the defuzzification resolution of a consequent variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
}

impl Universe {
    /// Universe over `[min, max]` sampled every `step`
    pub fn new(min: f64, max: f64, step: f64) -> AssessmentResult<Self> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(AssessmentError::config("universe bounds and step must be finite"));
        }
        if min >= max {
            return Err(AssessmentError::config(format!(
                "universe [{min}, {max}] is empty or inverted"
            )));
        }
        if step <= 0.0 {
            return Err(AssessmentError::config(format!(
                "universe step must be positive, got {step}"
            )));
        }

        let universe = Self { min, max, step };
        if universe.len() > MAX_UNIVERSE_POINTS {
            return Err(AssessmentError::config(format!(
                "universe [{min}, {max}] with step {step} exceeds {MAX_UNIVERSE_POINTS} points"
            )));
        }

        Ok(universe)
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Discretization step
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of discretization points, both bounds included when on-grid
    pub fn len(&self) -> usize {
        let spans = (self.max - self.min) / self.step;
        libm::floor(spans + spans * UNIVERSE_STEP_EPSILON) as usize + 1
    }

    /// Always false: a valid universe holds at least two points' worth of range
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Saturate `x` to the bounds
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Whether `x` lies inside the closed interval
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Discretization points, ascending
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| (self.min + i as f64 * self.step).min(self.max))
    }
}

/// Label set used when partitioning a universe automatically
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelScheme {
    /// poor / average / good
    Quality,
    /// low / medium / high
    Level,
    /// Any two or more labels, low end first
    Custom(Vec<String>),
}

impl LabelScheme {
    /// Labels in partition order (low end of the universe first)
    pub fn labels(&self) -> Vec<String> {
        match self {
            LabelScheme::Quality => QUALITY_LABELS.iter().map(|l| l.to_string()).collect(),
            LabelScheme::Level => LEVEL_LABELS.iter().map(|l| l.to_string()).collect(),
            LabelScheme::Custom(labels) => labels.clone(),
        }
    }
}

/// Named universe with labeled, overlapping membership functions
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyVariable {
    name: String,
    universe: Universe,
    terms: Vec<MembershipFunction>,
}

impl FuzzyVariable {
    /// Variable with explicit membership functions
    ///
    /// Labels must be unique; at least one term is required.
    pub fn new(
        name: impl Into<String>,
        universe: Universe,
        terms: Vec<MembershipFunction>,
    ) -> AssessmentResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(AssessmentError::config("fuzzy variable name is empty"));
        }
        if terms.is_empty() {
            return Err(AssessmentError::config(format!(
                "fuzzy variable '{name}' has no membership functions"
            )));
        }
        for (i, term) in terms.iter().enumerate() {
            if terms[..i].iter().any(|t| t.label() == term.label()) {
                return Err(AssessmentError::config(format!(
                    "fuzzy variable '{name}' defines label '{}' twice",
                    term.label()
                )));
            }
        }

        Ok(Self {
            name,
            universe,
            terms,
        })
    }

    /// Evenly tile the universe with 50%-overlapping triangles
    ///
    /// Centers sit at `linspace(min, max, n)`; each triangle reaches the
    /// neighbouring centers, so the outer sets become shoulders at the bounds
    /// and every point of the universe belongs to at least one set.
    pub fn partition_auto(
        name: impl Into<String>,
        universe: Universe,
        scheme: &LabelScheme,
    ) -> AssessmentResult<Self> {
        let name = name.into();
        let labels = scheme.labels();
        let n = labels.len();
        if n < 2 {
            return Err(AssessmentError::config(format!(
                "automatic partition of '{name}' needs at least 2 labels, got {n}"
            )));
        }

        let (min, max) = (universe.min(), universe.max());
        let half_width = (max - min) / (n - 1) as f64;
        let center = |i: usize| if i == n - 1 { max } else { min + i as f64 * half_width };

        let terms = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let a = if i == 0 { min } else { center(i - 1) };
                let c = if i == n - 1 { max } else { center(i + 1) };
                MembershipFunction::triangular(label, a, center(i), c)
            })
            .collect::<AssessmentResult<Vec<_>>>()?;

        Self::new(name, universe, terms)
    }

    /// Variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universe of discourse
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Membership functions in definition order
    pub fn terms(&self) -> &[MembershipFunction] {
        &self.terms
    }

    /// Labels in definition order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.label())
    }

    /// Position of `label` among the terms
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.label() == label)
    }

    /// Membership function for `label`
    pub fn term(&self, label: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|t| t.label() == label)
    }

    /// Degree of `value` in the set named `label`
    pub fn membership(&self, value: f64, label: &str) -> AssessmentResult<f64> {
        self.term(label)
            .map(|term| term.degree(value))
            .ok_or_else(|| AssessmentError::UnknownLabel {
                variable: self.name.clone(),
                label: label.to_string(),
            })
    }

    /// Degrees of a crisp value in every term, after saturating it to the universe
    pub fn fuzzify(&self, value: f64) -> Vec<f64> {
        let x = self.universe.clamp(value);
        self.terms.iter().map(|t| t.degree(x)).collect()
    }
}
