//! Fuzzy rules: antecedent expression trees and their consequents
//!
//! Rules are written against variable and label *names*. The engine resolves
//! every name once, at construction, and refuses rules that reference
//! anything undefined.
//!
//! ```rust
//! use vitalguard_core::fuzzy::{Antecedent, Rule};
//!
//! // IF oxygen_saturation is poor OR heart_rate is poor THEN risk is high
//! let rule = Rule::new(
//!     Antecedent::is("oxygen_saturation", "poor") | Antecedent::is("heart_rate", "poor"),
//!     "risk",
//!     "high",
//! );
//! assert_eq!(rule.consequent_label(), "high");
//! ```

use alloc::{string::String, vec::Vec};
use core::ops::{BitAnd, BitOr};

/// Boolean-valued condition over membership degrees
///
/// `All` takes the minimum of its children, `Any` the maximum.
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    /// Degree of `variable` in the set `label`
    Is {
        /// Antecedent variable name
        variable: String,
        /// Label of one of its membership functions
        label: String,
    },
    /// Fuzzy AND (min)
    All(Vec<Antecedent>),
    /// Fuzzy OR (max)
    Any(Vec<Antecedent>),
}

impl Antecedent {
    /// Leaf condition "`variable` is `label`"
    pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Antecedent::Is {
            variable: variable.into(),
            label: label.into(),
        }
    }

    /// Conjunction of all given conditions
    pub fn all(children: impl IntoIterator<Item = Antecedent>) -> Self {
        Antecedent::All(children.into_iter().collect())
    }

    /// Disjunction of all given conditions
    pub fn any(children: impl IntoIterator<Item = Antecedent>) -> Self {
        Antecedent::Any(children.into_iter().collect())
    }

    /// Every (variable, label) leaf, depth first
    pub fn leaves(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            Antecedent::Is { variable, label } => out.push((variable, label)),
            Antecedent::All(children) | Antecedent::Any(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl BitAnd for Antecedent {
    type Output = Antecedent;

    /// `a & b`; chains flatten into one `All`
    fn bitand(self, rhs: Antecedent) -> Antecedent {
        match self {
            Antecedent::All(mut children) => {
                children.push(rhs);
                Antecedent::All(children)
            }
            lhs => Antecedent::All(alloc::vec![lhs, rhs]),
        }
    }
}

impl BitOr for Antecedent {
    type Output = Antecedent;

    /// `a | b`; chains flatten into one `Any`
    fn bitor(self, rhs: Antecedent) -> Antecedent {
        match self {
            Antecedent::Any(mut children) => {
                children.push(rhs);
                Antecedent::Any(children)
            }
            lhs => Antecedent::Any(alloc::vec![lhs, rhs]),
        }
    }
}

/// IF antecedent THEN consequent_variable is consequent_label
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: Antecedent,
    consequent_variable: String,
    consequent_label: String,
}

impl Rule {
    /// Rule activating `label` of the consequent `variable`
    pub fn new(
        antecedent: Antecedent,
        variable: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            antecedent,
            consequent_variable: variable.into(),
            consequent_label: label.into(),
        }
    }

    /// Condition tree
    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    /// Consequent variable name
    pub fn consequent_variable(&self) -> &str {
        &self.consequent_variable
    }

    /// Consequent label
    pub fn consequent_label(&self) -> &str {
        &self.consequent_label
    }
}
