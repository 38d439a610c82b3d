//! Engine documents: the JSON form of a fuzzy inference engine
//!
//! A document only describes an engine. Turning it into one goes through the
//! same builder as hand-written engines, so every construction check
//! (breakpoint order, label uniqueness, rule references) applies unchanged.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use vitalguard_core::{
    Antecedent, FuzzyInferenceEngine, FuzzyVariable, LabelScheme, MembershipFunction, Rule,
    Universe,
};

use crate::{
    validation::{validate_document, ValidationReport},
    ConfigError,
};

/// Versioned description of a fuzzy engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineDocument {
    /// Base name shared by every version (e.g. "respiratory_risk")
    pub name: String,
    /// Version tag, `v` followed by a number
    pub version: String,
    /// Free-text summary for reviewers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input variables
    pub antecedents: Vec<VariableDoc>,
    /// Output variable
    pub consequent: VariableDoc,
    /// Rules in evaluation order
    pub rules: Vec<RuleDoc>,
}

/// One linguistic variable
///
/// Exactly one of `partition` and `terms` must be given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDoc {
    /// Variable name
    pub name: String,
    /// Universe of discourse
    pub universe: UniverseDoc,
    /// Automatic even partition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionDoc>,
    /// Explicit triangles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<TermDoc>>,
}

/// Closed interval with discretization step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniverseDoc {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Discretization step
    pub step: f64,
}

/// Label scheme of an automatic partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionDoc {
    /// poor / average / good
    Quality,
    /// low / medium / high
    Level,
    /// Explicit labels, low end first
    Custom(Vec<String>),
}

/// Labeled triangle `[a, b, c]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDoc {
    /// Label
    pub label: String,
    /// Breakpoints `[a, b, c]`
    pub points: [f64; 3],
}

/// Condition tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprDoc {
    /// `{"is": {"variable": .., "label": ..}}`
    Is {
        /// Antecedent name
        variable: String,
        /// Label of that antecedent
        label: String,
    },
    /// `{"all": [..]}`, fuzzy AND
    All(Vec<ExprDoc>),
    /// `{"any": [..]}`, fuzzy OR
    Any(Vec<ExprDoc>),
}

/// `{"variable": .., "label": ..}` target of a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDoc {
    /// Consequent name
    pub variable: String,
    /// Consequent label
    pub label: String,
}

/// IF condition THEN target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDoc {
    /// Condition
    #[serde(rename = "if")]
    pub condition: ExprDoc,
    /// Conclusion
    pub then: TargetDoc,
}

impl EngineDocument {
    /// Registry key, `<name>_<version>`
    pub fn qualified_name(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }

    /// Numeric part of the version tag, if well formed
    pub fn version_number(&self) -> Option<u32> {
        self.version.strip_prefix('v')?.parse().ok()
    }

    /// Structural review of the document
    pub fn validate(&self) -> ValidationReport {
        validate_document(self)
    }

    /// Compile the described engine
    pub fn to_engine(&self) -> Result<FuzzyInferenceEngine, ConfigError> {
        let antecedents = self
            .antecedents
            .iter()
            .map(VariableDoc::to_variable)
            .collect::<Result<Vec<_>, _>>()?;

        let rules = self.rules.iter().map(|rule| {
            Rule::new(
                rule.condition.to_antecedent(),
                rule.then.variable.clone(),
                rule.then.label.clone(),
            )
        });

        Ok(FuzzyInferenceEngine::builder()
            .name(self.qualified_name())
            .antecedents(antecedents)
            .consequent(self.consequent.to_variable()?)
            .rules(rules)
            .build()?)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl VariableDoc {
    fn to_variable(&self) -> Result<FuzzyVariable, ConfigError> {
        let universe = Universe::new(self.universe.min, self.universe.max, self.universe.step)?;

        match (&self.partition, &self.terms) {
            (Some(partition), None) => Ok(FuzzyVariable::partition_auto(
                self.name.clone(),
                universe,
                &partition.scheme(),
            )?),
            (None, Some(terms)) => {
                let terms = terms
                    .iter()
                    .map(|t| {
                        let [a, b, c] = t.points;
                        MembershipFunction::triangular(t.label.clone(), a, b, c)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FuzzyVariable::new(self.name.clone(), universe, terms)?)
            }
            _ => Err(ConfigError::Invalid(format!(
                "variable '{}' needs exactly one of 'partition' or 'terms'",
                self.name
            ))),
        }
    }
}

impl PartitionDoc {
    /// Core label scheme
    pub fn scheme(&self) -> LabelScheme {
        match self {
            PartitionDoc::Quality => LabelScheme::Quality,
            PartitionDoc::Level => LabelScheme::Level,
            PartitionDoc::Custom(labels) => LabelScheme::Custom(labels.clone()),
        }
    }
}

impl ExprDoc {
    /// Core condition tree
    pub fn to_antecedent(&self) -> Antecedent {
        match self {
            ExprDoc::Is { variable, label } => Antecedent::is(variable.clone(), label.clone()),
            ExprDoc::All(children) => Antecedent::all(children.iter().map(ExprDoc::to_antecedent)),
            ExprDoc::Any(children) => Antecedent::any(children.iter().map(ExprDoc::to_antecedent)),
        }
    }

    /// Every `(variable, label)` leaf
    pub fn leaves(&self) -> Vec<(&str, &str)> {
        match self {
            ExprDoc::Is { variable, label } => vec![(variable.as_str(), label.as_str())],
            ExprDoc::All(children) | ExprDoc::Any(children) => {
                children.iter().flat_map(ExprDoc::leaves).collect()
            }
        }
    }
}

/// Parse a document and reject it if validation reports errors
pub fn load_from_str(json: &str) -> Result<EngineDocument, ConfigError> {
    let document: EngineDocument =
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let report = document.validate();
    if !report.is_valid() {
        return Err(ConfigError::Invalid(report.error_summary()));
    }

    Ok(document)
}

/// Read, parse and validate a document file
pub fn load_from_path(path: impl AsRef<Path>) -> Result<EngineDocument, ConfigError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_from_str(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalguard_core::CrispInputs;

    const FEVER_DOC: &str = r#"{
        "name": "fever",
        "version": "v1",
        "antecedents": [
            {
                "name": "temperature",
                "universe": {"min": 35.0, "max": 41.0, "step": 0.1},
                "terms": [
                    {"label": "normal", "points": [35.0, 36.8, 38.0]},
                    {"label": "fever", "points": [37.5, 41.0, 41.0]}
                ]
            }
        ],
        "consequent": {
            "name": "risk",
            "universe": {"min": 0, "max": 100, "step": 1},
            "partition": {"custom": ["low", "high"]}
        },
        "rules": [
            {"if": {"is": {"variable": "temperature", "label": "fever"}}, "then": {"variable": "risk", "label": "high"}},
            {"if": {"is": {"variable": "temperature", "label": "normal"}}, "then": {"variable": "risk", "label": "low"}}
        ]
    }"#;

    #[test]
    fn explicit_terms_document() {
        let doc = load_from_str(FEVER_DOC).unwrap();
        assert_eq!(doc.qualified_name(), "fever_v1");
        assert_eq!(doc.version_number(), Some(1));

        let engine = doc.to_engine().unwrap();
        assert_eq!(engine.name(), "fever_v1");

        let mut inputs = CrispInputs::new();
        inputs.insert("temperature".into(), 40.0);
        assert!(engine.evaluate(&inputs).unwrap() > 50.0);
    }

    #[test]
    fn json_round_trip_preserves_document() {
        let doc = load_from_str(FEVER_DOC).unwrap();
        let reparsed = load_from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(load_from_str("{ not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn construction_errors_surface_from_core() {
        let bad = FEVER_DOC.replace("[35.0, 36.8, 38.0]", "[38.0, 36.8, 35.0]");
        let doc: EngineDocument = serde_json::from_str(&bad).unwrap();
        let err = doc.to_engine().unwrap_err();
        assert!(matches!(err, ConfigError::Engine(ref e) if e.is_configuration()));
    }

    #[test]
    fn partition_and_terms_are_exclusive() {
        let both = FEVER_DOC.replace(
            r#""universe": {"min": 35.0, "max": 41.0, "step": 0.1},"#,
            r#""universe": {"min": 35.0, "max": 41.0, "step": 0.1}, "partition": "quality","#,
        );
        assert!(matches!(load_from_str(&both), Err(ConfigError::Invalid(_))));
    }
}
