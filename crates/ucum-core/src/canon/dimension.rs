//! Dimension analysis of canonical terms

use serde::Serialize;

use crate::types::{
    add_dimension, diff_dimensions, merge_dimensions, scale_dimensions, CanonicalTerm,
    CanonicalUnit, Dimensions, Operator, Term,
};

/// Outcome of comparing the dimensions of two terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Comparison {
    Equal,
    /// `left - right`, with zero entries removed
    Differs(Dimensions),
}

/// Dimension vector of a canonical term. Integer literals are dimensionless.
pub fn analyze(term: &CanonicalTerm) -> Dimensions {
    match term {
        Term::Component(component) => {
            let mut dims = Dimensions::new();
            if let CanonicalUnit::Base(base) = component.unit() {
                let exponent = i64::from(component.exponent().unwrap_or(1));
                add_dimension(&mut dims, base.dimension, exponent);
            }
            dims
        }
        Term::Binary(left, op, right) => {
            let right = analyze(right);
            let right = match op {
                Operator::Mul => right,
                Operator::Div => scale_dimensions(&right, -1),
            };
            merge_dimensions(&analyze(left), &right)
        }
        Term::UnaryDiv(inner) => scale_dimensions(&analyze(inner), -1),
        Term::Paren(inner) | Term::Annot(inner, _) => analyze(inner),
        Term::AnnotOnly(_) => Dimensions::new(),
    }
}

pub fn compare(left: &CanonicalTerm, right: &CanonicalTerm) -> Comparison {
    let diff = diff_dimensions(&analyze(left), &analyze(right));
    if diff.is_empty() {
        Comparison::Equal
    } else {
        Comparison::Differs(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::types::Dimension;

    fn unit(code: &str) -> CanonicalTerm {
        Term::unit(CanonicalUnit::Base(Registry::new().base_unit(code).unwrap()))
    }

    #[test]
    fn test_analyze_velocity() {
        let velocity = Term::div(unit("m"), unit("s"));
        let dims = analyze(&velocity);
        assert_eq!(dims.get(&Dimension::Length), Some(&1));
        assert_eq!(dims.get(&Dimension::Time), Some(&-1));
        assert_eq!(dims.len(), 2);
    }

    #[test]
    fn test_integers_are_dimensionless() {
        let term = Term::mul(Term::unit(CanonicalUnit::Integer(1000)), unit("g"));
        assert_eq!(analyze(&term), analyze(&unit("g")));
    }

    #[test]
    fn test_nested_division() {
        // /(m/s2) is s2.m-1
        let term = Term::UnaryDiv(Box::new(Term::Paren(Box::new(Term::div(
            unit("m"),
            Term::unit_with_exponent(CanonicalUnit::Base(Registry::new().base_unit("s").unwrap()), 2),
        )))));
        let dims = analyze(&term);
        assert_eq!(dims.get(&Dimension::Length), Some(&-1));
        assert_eq!(dims.get(&Dimension::Time), Some(&2));
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&unit("m"), &unit("m")), Comparison::Equal);
        let Comparison::Differs(diff) = compare(&unit("m"), &unit("s")) else {
            panic!("m and s must differ");
        };
        assert_eq!(diff.get(&Dimension::Length), Some(&1));
        assert_eq!(diff.get(&Dimension::Time), Some(&-1));
    }

    #[test]
    fn test_cancelled_dimensions_are_dropped() {
        let term = Term::div(unit("m"), unit("m"));
        assert!(analyze(&term).is_empty());
    }
}
