//! Remove unity factors from terms

use crate::types::{Component, Exponent, Operator, Term, TermUnit};

/// True if the term is equal to 1
pub fn is_unity<U: TermUnit>(term: &Term<U>) -> bool {
    match term {
        Term::Component(Component::Plain(unit)) => unit.as_integer() == Some(1),
        Term::Component(Component::Exponent(unit, Exponent(exp))) => {
            *exp == 0 || unit.as_integer() == Some(1)
        }
        Term::AnnotOnly(_) => true,
        Term::Paren(inner) | Term::Annot(inner, _) | Term::UnaryDiv(inner) => is_unity(inner),
        Term::Binary(left, _, right) => is_unity(left) && is_unity(right),
    }
}

/// Simplify unity factors bottom-up.
///
/// `x^0` and `1^n` become `1`, `x.1`, `x/1` and `1.x` become `x`, `/1`
/// becomes `1`. A `1/x` is kept, it is not equal to `x`.
pub fn normalize<U: TermUnit>(term: &Term<U>) -> Term<U> {
    match term {
        Term::Component(Component::Exponent(unit, Exponent(exp)))
            if *exp == 0 || unit.as_integer() == Some(1) =>
        {
            Term::unity()
        }
        Term::Binary(left, op, right) => {
            let left = normalize(left);
            let right = normalize(right);
            match (is_unity(&left), is_unity(&right), op) {
                (true, true, _) => Term::unity(),
                (false, true, _) => left,
                (true, false, Operator::Mul) => right,
                _ => Term::binary(left, *op, right),
            }
        }
        Term::UnaryDiv(inner) => {
            let inner = normalize(inner);
            if is_unity(&inner) {
                Term::unity()
            } else {
                Term::UnaryDiv(Box::new(inner))
            }
        }
        Term::Paren(inner) => Term::Paren(Box::new(normalize(inner))),
        Term::Annot(inner, annotation) => Term::Annot(Box::new(normalize(inner)), annotation.clone()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::types::{Annotation, CanonicalTerm, CanonicalUnit};
    use pretty_assertions::assert_eq;

    fn meter() -> CanonicalTerm {
        Term::unit(CanonicalUnit::Base(Registry::new().base_unit("m").unwrap()))
    }

    fn one() -> CanonicalTerm {
        Term::unity()
    }

    #[test]
    fn test_zero_exponent() {
        let term = Term::unit_with_exponent(CanonicalUnit::Integer(7), 0);
        assert_eq!(normalize(&term), one());
    }

    #[test]
    fn test_one_to_negative_one() {
        let term = Term::unit_with_exponent(CanonicalUnit::Integer(1), -1);
        assert_eq!(normalize(&term), one());
    }

    #[test]
    fn test_unity_operands() {
        assert_eq!(normalize(&Term::mul(one(), meter())), meter());
        assert_eq!(normalize(&Term::mul(meter(), one())), meter());
        assert_eq!(normalize(&Term::div(meter(), one())), meter());
        assert_eq!(normalize(&Term::div(one(), one())), one());
    }

    #[test]
    fn test_reciprocal_is_kept() {
        let term = Term::div(one(), meter());
        assert_eq!(normalize(&term), term);
        assert!(!is_unity(&term));

        let unary = Term::UnaryDiv(Box::new(meter()));
        assert_eq!(normalize(&unary), unary);
        assert_eq!(normalize(&Term::UnaryDiv(Box::new(one()))), one());
    }

    #[test]
    fn test_nested() {
        // (1.m)/(1^-1.1)
        let term = Term::div(
            Term::Paren(Box::new(Term::mul(one(), meter()))),
            Term::mul(Term::unit_with_exponent(CanonicalUnit::Integer(1), -1), one()),
        );
        assert_eq!(normalize(&term), Term::Paren(Box::new(meter())));
    }

    #[test]
    fn test_is_unity() {
        assert!(is_unity(&one()));
        assert!(is_unity::<CanonicalUnit>(&Term::AnnotOnly(Annotation("x".into()))));
        assert!(!is_unity(&meter()));
        assert!(!is_unity(&Term::mul(one(), meter())));
    }

    #[test]
    fn test_idempotent() {
        let term = Term::div(Term::mul(one(), meter()), Term::mul(meter(), one()));
        let once = normalize(&term);
        assert_eq!(normalize(&once), once);
    }
}
