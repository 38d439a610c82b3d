//! Mamdani inference engine
//!
//! ## Evaluation
//!
//! ```text
//! crisp inputs ──► fuzzify ──► fire rules ──► clip ──► aggregate ──► centroid
//!                  (clamp)     (min / max)    (min)     (max)        Σxμ / Σμ
//! ```
//!
//! Rules are compiled at construction into an index graph: every leaf holds
//! the positions of its variable and label, so evaluation never looks up a
//! name. The consequent's membership degrees over its discretized universe
//! are precomputed as well.

use alloc::{
    collections::BTreeMap,
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::errors::{AssessmentError, AssessmentResult};

use super::{Antecedent, FuzzyVariable, Rule};

/// Crisp inputs keyed by antecedent variable name
pub type CrispInputs = BTreeMap<String, f64>;

/// Antecedent tree with names resolved to indices
#[derive(Debug, Clone)]
enum Expr {
    Leaf { variable: usize, term: usize },
    All(Vec<Expr>),
    Any(Vec<Expr>),
}

impl Expr {
    fn strength(&self, degrees: &[Option<Vec<f64>>]) -> f64 {
        match self {
            // Absent variable: no evidence
            Expr::Leaf { variable, term } => degrees[*variable]
                .as_ref()
                .map_or(0.0, |d| d[*term]),
            Expr::All(children) => children
                .iter()
                .map(|c| c.strength(degrees))
                .fold(1.0, f64::min),
            Expr::Any(children) => children
                .iter()
                .map(|c| c.strength(degrees))
                .fold(0.0, f64::max),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    expr: Expr,
    output_term: usize,
}

/// Audit record of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceTrace {
    /// Defuzzified score
    pub score: f64,
    /// Firing strength of each rule, in rule order
    pub rule_strengths: Vec<f64>,
    /// Clip level of each consequent label, in label order
    pub activations: Vec<(String, f64)>,
}

/// Immutable Mamdani fuzzy system
///
/// Built once through [`EngineBuilder`]; evaluation borrows it immutably, so
/// a single engine can serve concurrent assessments behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FuzzyInferenceEngine {
    name: String,
    antecedents: Vec<FuzzyVariable>,
    consequent: FuzzyVariable,
    rules: Vec<Rule>,
    compiled: Vec<CompiledRule>,
    grid: Vec<f64>,
    grid_degrees: Vec<Vec<f64>>,
}

impl FuzzyInferenceEngine {
    /// Start describing an engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Engine name (document identifier for loaded configurations)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Antecedent variables in definition order
    pub fn antecedents(&self) -> &[FuzzyVariable] {
        &self.antecedents
    }

    /// Antecedent variable by name
    pub fn antecedent(&self, name: &str) -> Option<&FuzzyVariable> {
        self.antecedents.iter().find(|v| v.name() == name)
    }

    /// Output variable
    pub fn consequent(&self) -> &FuzzyVariable {
        &self.consequent
    }

    /// Rules in definition order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Crisp score for the given inputs
    pub fn evaluate(&self, inputs: &CrispInputs) -> AssessmentResult<f64> {
        self.evaluate_detailed(inputs).map(|trace| trace.score)
    }

    /// Crisp score plus per-rule and per-label activation
    pub fn evaluate_detailed(&self, inputs: &CrispInputs) -> AssessmentResult<InferenceTrace> {
        let degrees = self.fuzzify(inputs)?;

        let rule_strengths: Vec<f64> = self
            .compiled
            .iter()
            .map(|rule| rule.expr.strength(&degrees))
            .collect();

        let mut clip = alloc::vec![0.0_f64; self.consequent.terms().len()];
        for (rule, &strength) in self.compiled.iter().zip(&rule_strengths) {
            clip[rule.output_term] = clip[rule.output_term].max(strength);
        }

        let score = self.defuzzify(&clip)?;

        Ok(InferenceTrace {
            score,
            rule_strengths,
            activations: self
                .consequent
                .labels()
                .map(str::to_string)
                .zip(clip)
                .collect(),
        })
    }

    /// Per-antecedent degrees; `None` for variables missing from the inputs
    fn fuzzify(&self, inputs: &CrispInputs) -> AssessmentResult<Vec<Option<Vec<f64>>>> {
        let mut degrees = alloc::vec![None; self.antecedents.len()];

        for (name, &value) in inputs {
            let index = self
                .antecedents
                .iter()
                .position(|v| v.name() == name)
                .ok_or_else(|| AssessmentError::UnknownVariable { name: name.clone() })?;

            if !value.is_finite() {
                return Err(AssessmentError::InvalidValue {
                    variable: name.clone(),
                });
            }

            degrees[index] = Some(self.antecedents[index].fuzzify(value));
        }

        Ok(degrees)
    }

    /// Discrete centroid of the clipped, max-aggregated output set
    fn defuzzify(&self, clip: &[f64]) -> AssessmentResult<f64> {
        let mut weighted = 0.0;
        let mut total = 0.0;

        for (i, &x) in self.grid.iter().enumerate() {
            let mu = self
                .grid_degrees
                .iter()
                .zip(clip)
                .map(|(term, &level)| term[i].min(level))
                .fold(0.0, f64::max);
            weighted += x * mu;
            total += mu;
        }

        if total <= 0.0 {
            return Err(AssessmentError::NoRuleFired {
                consequent: self.consequent.name().to_string(),
            });
        }

        Ok(self.consequent.universe().clamp(weighted / total))
    }
}

/// Collects variables and rules, validated and compiled by [`build`](Self::build)
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    name: Option<String>,
    antecedents: Vec<FuzzyVariable>,
    consequent: Option<FuzzyVariable>,
    rules: Vec<Rule>,
}

impl EngineBuilder {
    /// Engine name, defaults to the consequent's name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an input variable
    pub fn antecedent(mut self, variable: FuzzyVariable) -> Self {
        self.antecedents.push(variable);
        self
    }

    /// Add several input variables
    pub fn antecedents(mut self, variables: impl IntoIterator<Item = FuzzyVariable>) -> Self {
        self.antecedents.extend(variables);
        self
    }

    /// Set the output variable
    pub fn consequent(mut self, variable: FuzzyVariable) -> Self {
        self.consequent = Some(variable);
        self
    }

    /// Add a rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add several rules
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validate every reference and compile the rule graph
    pub fn build(self) -> AssessmentResult<FuzzyInferenceEngine> {
        let consequent = self
            .consequent
            .ok_or_else(|| AssessmentError::config("engine has no consequent variable"))?;

        for (i, var) in self.antecedents.iter().enumerate() {
            if self.antecedents[..i].iter().any(|v| v.name() == var.name()) {
                return Err(AssessmentError::config(format!(
                    "antecedent '{}' defined twice",
                    var.name()
                )));
            }
            if var.name() == consequent.name() {
                return Err(AssessmentError::config(format!(
                    "'{}' is both antecedent and consequent",
                    var.name()
                )));
            }
        }

        if self.rules.is_empty() {
            return Err(AssessmentError::config("engine has no rules"));
        }

        let compiled = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| compile_rule(i, rule, &self.antecedents, &consequent))
            .collect::<AssessmentResult<Vec<_>>>()?;

        let grid: Vec<f64> = consequent.universe().points().collect();
        let grid_degrees = consequent
            .terms()
            .iter()
            .map(|term| grid.iter().map(|&x| term.degree(x)).collect())
            .collect();

        let name = self
            .name
            .unwrap_or_else(|| consequent.name().to_string());

        log_debug!(
            "built fuzzy engine '{}': {} antecedents, {} rules, {} grid points",
            name,
            self.antecedents.len(),
            compiled.len(),
            grid.len()
        );

        Ok(FuzzyInferenceEngine {
            name,
            antecedents: self.antecedents,
            consequent,
            rules: self.rules,
            compiled,
            grid,
            grid_degrees,
        })
    }
}

fn compile_rule(
    index: usize,
    rule: &Rule,
    antecedents: &[FuzzyVariable],
    consequent: &FuzzyVariable,
) -> AssessmentResult<CompiledRule> {
    if rule.consequent_variable() != consequent.name() {
        return Err(AssessmentError::config(format!(
            "rule {index} concludes on '{}', engine consequent is '{}'",
            rule.consequent_variable(),
            consequent.name()
        )));
    }

    let output_term = consequent
        .label_index(rule.consequent_label())
        .ok_or_else(|| {
            AssessmentError::config(format!(
                "rule {index} uses undefined label '{}' of '{}'",
                rule.consequent_label(),
                consequent.name()
            ))
        })?;

    Ok(CompiledRule {
        expr: compile_expr(index, rule.antecedent(), antecedents)?,
        output_term,
    })
}

fn compile_expr(
    index: usize,
    antecedent: &Antecedent,
    variables: &[FuzzyVariable],
) -> AssessmentResult<Expr> {
    match antecedent {
        Antecedent::Is { variable, label } => {
            let var_index = variables
                .iter()
                .position(|v| v.name() == variable)
                .ok_or_else(|| {
                    AssessmentError::config(format!(
                        "rule {index} references undefined variable '{variable}'"
                    ))
                })?;
            let term = variables[var_index].label_index(label).ok_or_else(|| {
                AssessmentError::config(format!(
                    "rule {index} references undefined label '{label}' of '{variable}'"
                ))
            })?;
            Ok(Expr::Leaf {
                variable: var_index,
                term,
            })
        }
        Antecedent::All(children) | Antecedent::Any(children) => {
            if children.is_empty() {
                return Err(AssessmentError::config(format!(
                    "rule {index} contains an empty condition group"
                )));
            }
            let compiled = children
                .iter()
                .map(|c| compile_expr(index, c, variables))
                .collect::<AssessmentResult<Vec<_>>>()?;
            Ok(match antecedent {
                Antecedent::All(_) => Expr::All(compiled),
                _ => Expr::Any(compiled),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::{LabelScheme, MembershipFunction, Universe};

    fn quality(name: &str, min: f64, max: f64) -> FuzzyVariable {
        FuzzyVariable::partition_auto(name, Universe::new(min, max, 1.0).unwrap(), &LabelScheme::Quality)
            .unwrap()
    }

    fn risk() -> FuzzyVariable {
        FuzzyVariable::partition_auto("risk", Universe::new(0.0, 100.0, 1.0).unwrap(), &LabelScheme::Level)
            .unwrap()
    }

    fn two_input_engine() -> FuzzyInferenceEngine {
        let inputs = ["oxygen_saturation", "heart_rate"];
        FuzzyInferenceEngine::builder()
            .antecedent(quality("oxygen_saturation", 85.0, 100.0))
            .antecedent(quality("heart_rate", 50.0, 149.0))
            .consequent(risk())
            .rule(Rule::new(
                Antecedent::any(inputs.map(|v| Antecedent::is(v, "poor"))),
                "risk",
                "high",
            ))
            .rule(Rule::new(
                Antecedent::all(inputs.map(|v| Antecedent::is(v, "good"))),
                "risk",
                "low",
            ))
            .rule(Rule::new(
                Antecedent::any(inputs.map(|v| Antecedent::is(v, "average"))),
                "risk",
                "medium",
            ))
            .build()
            .unwrap()
    }

    fn inputs(pairs: &[(&str, f64)]) -> CrispInputs {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn single_rule_full_activation_is_label_centroid() {
        let engine = two_input_engine();
        // Both inputs fully "good": only the low label fires, at strength 1
        let trace = engine
            .evaluate_detailed(&inputs(&[("oxygen_saturation", 100.0), ("heart_rate", 149.0)]))
            .unwrap();
        assert_eq!(trace.rule_strengths, alloc::vec![0.0, 1.0, 0.0]);
        assert_eq!(trace.activations[0], ("low".to_string(), 1.0));

        // Centroid of the low shoulder (0, 0, 50) on the integer grid
        let expected = (0..=50).map(|x| x as f64 * (50 - x) as f64).sum::<f64>()
            / (0..=50).map(|x| (50 - x) as f64).sum::<f64>();
        assert!((trace.score - expected).abs() < 1e-9);
    }

    #[test]
    fn poor_input_raises_risk() {
        let engine = two_input_engine();
        let good = engine
            .evaluate(&inputs(&[("oxygen_saturation", 99.0), ("heart_rate", 140.0)]))
            .unwrap();
        let poor = engine
            .evaluate(&inputs(&[("oxygen_saturation", 86.0), ("heart_rate", 140.0)]))
            .unwrap();
        assert!(poor > good);
        assert!((0.0..=100.0).contains(&poor));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let engine = two_input_engine();
        let crisp = inputs(&[("oxygen_saturation", 91.3), ("heart_rate", 77.0)]);
        let first = engine.evaluate(&crisp).unwrap();
        for _ in 0..10 {
            assert_eq!(engine.evaluate(&crisp).unwrap(), first);
        }
    }

    #[test]
    fn out_of_universe_inputs_saturate() {
        let engine = two_input_engine();
        let clamped = engine
            .evaluate(&inputs(&[("oxygen_saturation", 100.0), ("heart_rate", 149.0)]))
            .unwrap();
        let beyond = engine
            .evaluate(&inputs(&[("oxygen_saturation", 100.0), ("heart_rate", 200.0)]))
            .unwrap();
        assert_eq!(clamped, beyond);
    }

    #[test]
    fn no_activation_is_an_error_not_zero() {
        let engine = FuzzyInferenceEngine::builder()
            .antecedent(quality("heart_rate", 50.0, 149.0))
            .consequent(risk())
            .rule(Rule::new(Antecedent::is("heart_rate", "poor"), "risk", "high"))
            .build()
            .unwrap();

        let err = engine.evaluate(&inputs(&[("heart_rate", 149.0)])).unwrap_err();
        assert_eq!(err, AssessmentError::NoRuleFired { consequent: "risk".into() });

        // Absent input contributes nothing either
        assert!(matches!(
            engine.evaluate(&CrispInputs::new()),
            Err(AssessmentError::NoRuleFired { .. })
        ));
    }

    #[test]
    fn bad_inputs_rejected() {
        let engine = two_input_engine();
        assert_eq!(
            engine.evaluate(&inputs(&[("blood_pressure", 120.0)])).unwrap_err(),
            AssessmentError::UnknownVariable { name: "blood_pressure".into() }
        );
        assert_eq!(
            engine.evaluate(&inputs(&[("heart_rate", f64::NAN)])).unwrap_err(),
            AssessmentError::InvalidValue { variable: "heart_rate".into() }
        );
    }

    #[test]
    fn construction_rejects_dangling_references() {
        let base = || {
            FuzzyInferenceEngine::builder()
                .antecedent(quality("heart_rate", 50.0, 149.0))
                .consequent(risk())
        };

        let undefined_var = base()
            .rule(Rule::new(Antecedent::is("temperature", "poor"), "risk", "high"))
            .build();
        assert!(undefined_var.unwrap_err().is_configuration());

        let undefined_label = base()
            .rule(Rule::new(Antecedent::is("heart_rate", "critical"), "risk", "high"))
            .build();
        assert!(undefined_label.unwrap_err().is_configuration());

        let undefined_output = base()
            .rule(Rule::new(Antecedent::is("heart_rate", "poor"), "risk", "extreme"))
            .build();
        assert!(undefined_output.unwrap_err().is_configuration());

        let wrong_consequent = base()
            .rule(Rule::new(Antecedent::is("heart_rate", "poor"), "status", "high"))
            .build();
        assert!(wrong_consequent.unwrap_err().is_configuration());

        let empty_group = base()
            .rule(Rule::new(Antecedent::any([]), "risk", "high"))
            .build();
        assert!(empty_group.unwrap_err().is_configuration());

        assert!(base().build().unwrap_err().is_configuration());
        assert!(FuzzyInferenceEngine::builder()
            .antecedent(quality("heart_rate", 50.0, 149.0))
            .rule(Rule::new(Antecedent::is("heart_rate", "poor"), "risk", "high"))
            .build()
            .is_err());
    }

    #[test]
    fn duplicate_variables_rejected() {
        let result = FuzzyInferenceEngine::builder()
            .antecedent(quality("heart_rate", 50.0, 149.0))
            .antecedent(quality("heart_rate", 40.0, 160.0))
            .consequent(risk())
            .rule(Rule::new(Antecedent::is("heart_rate", "poor"), "risk", "high"))
            .build();
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn explicit_terms_engine() {
        let temp = FuzzyVariable::new(
            "temperature",
            Universe::new(35.0, 41.0, 0.1).unwrap(),
            alloc::vec![
                MembershipFunction::triangular("normal", 35.0, 36.8, 38.0).unwrap(),
                MembershipFunction::triangular("fever", 37.5, 41.0, 41.0).unwrap(),
            ],
        )
        .unwrap();

        let engine = FuzzyInferenceEngine::builder()
            .name("fever_check")
            .antecedent(temp)
            .consequent(risk())
            .rule(Rule::new(Antecedent::is("temperature", "fever"), "risk", "high"))
            .rule(Rule::new(Antecedent::is("temperature", "normal"), "risk", "low"))
            .build()
            .unwrap();

        assert_eq!(engine.name(), "fever_check");
        let afebrile = engine.evaluate(&inputs(&[("temperature", 36.8)])).unwrap();
        let febrile = engine.evaluate(&inputs(&[("temperature", 40.5)])).unwrap();
        assert!(afebrile < 30.0);
        assert!(febrile > 60.0);
    }
}
