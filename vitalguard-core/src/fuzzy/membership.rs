//! Triangular membership functions

use alloc::{format, string::String};

use crate::errors::{AssessmentError, AssessmentResult};

/// Labeled triangle over a variable's universe
///
/// ```text
///  1 |      /\
///    |     /  \
///  0 |____/    \____
///         a  b  c
/// ```
///
/// `a == b` gives a left shoulder (degree 1 at `a`), `b == c` a right one.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipFunction {
    label: String,
    a: f64,
    b: f64,
    c: f64,
}

impl MembershipFunction {
    /// Triangle with breakpoints `a <= b <= c`
    pub fn triangular(label: impl Into<String>, a: f64, b: f64, c: f64) -> AssessmentResult<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(AssessmentError::config("membership function label is empty"));
        }
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(AssessmentError::config(format!(
                "membership function '{label}' has non-finite breakpoints"
            )));
        }
        if a > b || b > c {
            return Err(AssessmentError::config(format!(
                "membership function '{label}' breakpoints must be non-decreasing, got [{a}, {b}, {c}]"
            )));
        }

        Ok(Self { label, a, b, c })
    }

    /// Linguistic label ("low", "poor", ...)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Breakpoints `(a, b, c)`
    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Degree of membership of `x`, always in [0, 1]
    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c, .. } = *self;

        // Written so NaN falls into the zero branch
        if !(x >= a && x <= c) {
            0.0
        } else if x == b {
            1.0
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_shape() {
        let mf = MembershipFunction::triangular("normal", 60.0, 80.0, 100.0).unwrap();
        assert_eq!(mf.degree(50.0), 0.0);
        assert_eq!(mf.degree(60.0), 0.0);
        assert_eq!(mf.degree(70.0), 0.5);
        assert_eq!(mf.degree(80.0), 1.0);
        assert_eq!(mf.degree(90.0), 0.5);
        assert_eq!(mf.degree(100.0), 0.0);
        assert_eq!(mf.degree(120.0), 0.0);
    }

    #[test]
    fn shoulders() {
        let left = MembershipFunction::triangular("low", 0.0, 0.0, 10.0).unwrap();
        assert_eq!(left.degree(0.0), 1.0);
        assert_eq!(left.degree(5.0), 0.5);

        let right = MembershipFunction::triangular("high", 0.0, 10.0, 10.0).unwrap();
        assert_eq!(right.degree(10.0), 1.0);
        assert_eq!(right.degree(5.0), 0.5);

        let spike = MembershipFunction::triangular("exact", 3.0, 3.0, 3.0).unwrap();
        assert_eq!(spike.degree(3.0), 1.0);
        assert_eq!(spike.degree(3.1), 0.0);
    }

    #[test]
    fn rejects_bad_breakpoints() {
        assert!(MembershipFunction::triangular("x", 2.0, 1.0, 3.0).is_err());
        assert!(MembershipFunction::triangular("x", 1.0, 3.0, 2.0).is_err());
        assert!(MembershipFunction::triangular("x", f64::NAN, 1.0, 2.0).is_err());
        assert!(MembershipFunction::triangular("", 0.0, 1.0, 2.0).is_err());
    }
}
