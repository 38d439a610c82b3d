//! Document Validation
//!
//! Reviews an [`EngineDocument`] before it is compiled. Errors here are the
//! structural defects the engine builder cannot phrase well (a variable with
//! both a partition and explicit terms, a malformed version tag). Warnings
//! flag documents that compile but will not behave as a reviewer expects in
//! the risk pipeline: antecedents that are not vital signs, rules that never
//! mention a variable, universes reaching outside physiological limits.

use std::collections::HashSet;

use vitalguard_core::{
    constants::fuzzy::{RISK_SCORE_MAX, RISK_SCORE_MIN},
    Vital,
};

use crate::document::{EngineDocument, VariableDoc};

/// Validation report containing all issues found
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Validation errors (must be fixed)
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (should be reviewed)
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an issue to the list matching its severity
    pub fn add(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// Get total issue count
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Error messages joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|issue| issue.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Individual validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Type of issue
    pub issue_type: IssueType,

    /// Variable that caused the issue (if applicable)
    pub variable: Option<String>,

    /// Human-readable message
    pub message: String,

    /// Issue severity
    pub severity: Severity,
}

impl ValidationIssue {
    fn error(issue_type: IssueType, variable: Option<&str>, message: String) -> Self {
        Self {
            issue_type,
            variable: variable.map(str::to_string),
            message,
            severity: Severity::Error,
        }
    }

    fn warning(issue_type: IssueType, variable: Option<&str>, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(issue_type, variable, message)
        }
    }
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    /// Required field is missing or empty
    MissingField,

    /// Mutually exclusive fields both given
    ConflictingFields,

    /// Version tag is not `v<number>`
    VersionFormat,

    /// Antecedent is not a vital sign the pipeline can feed
    UnknownVital,

    /// Antecedent never appears in any rule
    UnusedVariable,

    /// Universe reaches outside a physiological or score range
    RangeOutsideDomain,
}

/// Issue severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Should be reviewed
    Warning,

    /// Must be fixed
    Error,
}

/// Review a document
pub fn validate_document(document: &EngineDocument) -> ValidationReport {
    let mut report = ValidationReport::new();

    if document.name.trim().is_empty() {
        report.add(ValidationIssue::error(
            IssueType::MissingField,
            None,
            "document name is empty".to_string(),
        ));
    }
    if document.version_number().is_none() {
        report.add(ValidationIssue::error(
            IssueType::VersionFormat,
            None,
            format!("version '{}' is not of the form v<number>", document.version),
        ));
    }
    if document.antecedents.is_empty() {
        report.add(ValidationIssue::error(
            IssueType::MissingField,
            None,
            "document defines no antecedents".to_string(),
        ));
    }
    if document.rules.is_empty() {
        report.add(ValidationIssue::error(
            IssueType::MissingField,
            None,
            "document defines no rules".to_string(),
        ));
    }

    for variable in document.antecedents.iter().chain([&document.consequent]) {
        check_terms(variable, &mut report);
    }

    let referenced: HashSet<&str> = document
        .rules
        .iter()
        .flat_map(|rule| rule.condition.leaves())
        .map(|(variable, _)| variable)
        .collect();

    for variable in &document.antecedents {
        let name = variable.name.as_str();
        match Vital::from_name(name) {
            None => report.add(ValidationIssue::warning(
                IssueType::UnknownVital,
                Some(name),
                format!("antecedent '{name}' is not a vital sign; the risk pipeline will refuse this engine"),
            )),
            Some(vital) => {
                let (min, max) = vital.domain();
                if variable.universe.min < min || variable.universe.max > max {
                    report.add(ValidationIssue::warning(
                        IssueType::RangeOutsideDomain,
                        Some(name),
                        format!(
                            "universe [{}, {}] of '{name}' reaches outside the physiological range [{min}, {max}]",
                            variable.universe.min, variable.universe.max
                        ),
                    ));
                }
            }
        }

        if !referenced.contains(name) {
            report.add(ValidationIssue::warning(
                IssueType::UnusedVariable,
                Some(name),
                format!("antecedent '{name}' is not used by any rule"),
            ));
        }
    }

    let consequent = &document.consequent;
    if consequent.universe.min < RISK_SCORE_MIN || consequent.universe.max > RISK_SCORE_MAX {
        report.add(ValidationIssue::warning(
            IssueType::RangeOutsideDomain,
            Some(&consequent.name),
            format!(
                "consequent '{}' scores outside [{RISK_SCORE_MIN}, {RISK_SCORE_MAX}]",
                consequent.name
            ),
        ));
    }

    report
}

fn check_terms(variable: &VariableDoc, report: &mut ValidationReport) {
    let name = variable.name.as_str();
    match (&variable.partition, &variable.terms) {
        (Some(_), Some(_)) => report.add(ValidationIssue::error(
            IssueType::ConflictingFields,
            Some(name),
            format!("variable '{name}' has both 'partition' and 'terms'"),
        )),
        (None, None) => report.add(ValidationIssue::error(
            IssueType::MissingField,
            Some(name),
            format!("variable '{name}' has neither 'partition' nor 'terms'"),
        )),
        (None, Some(terms)) if terms.is_empty() => report.add(ValidationIssue::error(
            IssueType::MissingField,
            Some(name),
            format!("variable '{name}' has an empty 'terms' list"),
        )),
        _ => {}
    }
}
