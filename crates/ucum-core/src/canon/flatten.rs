//! Flatten canonical terms into products of powers
//!
//! A canonical term of any shape becomes a list of `(unit, exponent)` pairs.
//! Equal units are merged, zero exponents dropped, and the result is sorted
//! (integers first, then base units by code), so two terms with the same
//! dimensions and unit powers flatten to the same tree.

use crate::error::CanonicalizeError;
use crate::types::{CanonicalTerm, CanonicalUnit, Component, Operator, Term, TermUnit};

/// Flatten without merging, in left-to-right order
pub fn flatten(term: &CanonicalTerm) -> Result<Vec<(CanonicalUnit, i32)>, CanonicalizeError> {
    let mut entries = Vec::new();
    collect(term, false, &mut entries)?;
    Ok(entries)
}

fn collect(
    term: &CanonicalTerm,
    negate: bool,
    entries: &mut Vec<(CanonicalUnit, i32)>,
) -> Result<(), CanonicalizeError> {
    match term {
        Term::Component(component) => {
            let exponent = component.exponent().unwrap_or(1);
            let exponent = if negate {
                exponent.checked_neg().ok_or(CanonicalizeError::ExponentOverflow)?
            } else {
                exponent
            };
            entries.push((*component.unit(), exponent));
        }
        Term::Binary(left, op, right) => {
            collect(left, negate, entries)?;
            let negate_right = match op {
                Operator::Mul => negate,
                Operator::Div => !negate,
            };
            collect(right, negate_right, entries)?;
        }
        Term::UnaryDiv(inner) => collect(inner, !negate, entries)?,
        Term::Paren(inner) | Term::Annot(inner, _) => collect(inner, negate, entries)?,
        Term::AnnotOnly(_) => {}
    }
    Ok(())
}

/// Flatten, cancel and rebuild as a sorted left-associative product
pub fn flatten_and_cancel(term: &CanonicalTerm) -> Result<CanonicalTerm, CanonicalizeError> {
    let mut merged: Vec<(CanonicalUnit, i32)> = Vec::new();
    for (unit, exponent) in flatten(term)? {
        // the literal 1 contributes nothing, at any power
        if unit.as_integer() == Some(1) {
            continue;
        }
        match merged.iter_mut().find(|(seen, _)| *seen == unit) {
            Some((_, total)) => {
                *total = total
                    .checked_add(exponent)
                    .ok_or(CanonicalizeError::ExponentOverflow)?;
            }
            None => merged.push((unit, exponent)),
        }
    }
    merged.retain(|(_, exponent)| *exponent != 0);
    merged.sort_by_key(|(unit, _)| unit.sort_key());
    Ok(rebuild(merged))
}

fn rebuild(entries: Vec<(CanonicalUnit, i32)>) -> CanonicalTerm {
    entries
        .into_iter()
        .map(|(unit, exponent)| match exponent {
            1 => Term::Component(Component::Plain(unit)),
            _ => Term::unit_with_exponent(unit, exponent),
        })
        .reduce(Term::mul)
        .unwrap_or_else(Term::unity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use pretty_assertions::assert_eq;

    fn base(code: &str) -> CanonicalUnit {
        CanonicalUnit::Base(Registry::new().base_unit(code).unwrap())
    }

    fn unit(code: &str) -> CanonicalTerm {
        Term::unit(base(code))
    }

    #[test]
    fn test_flatten_signs() {
        // m / (s . g-1)
        let term = Term::div(
            unit("m"),
            Term::Paren(Box::new(Term::mul(
                unit("s"),
                Term::unit_with_exponent(base("g"), -1),
            ))),
        );
        assert_eq!(flatten(&term).unwrap(), vec![(base("m"), 1), (base("s"), -1), (base("g"), 1)]);
    }

    #[test]
    fn test_unary_div_negates() {
        let term = Term::UnaryDiv(Box::new(Term::unit_with_exponent(base("s"), 2)));
        assert_eq!(flatten(&term).unwrap(), vec![(base("s"), -2)]);
    }

    #[test]
    fn test_cancel_to_unity() {
        let term = Term::div(unit("m"), unit("m"));
        assert_eq!(flatten_and_cancel(&term).unwrap(), Term::unity());
    }

    #[test]
    fn test_merge_and_sort() {
        // s.m.g.s-3.m
        let term = [
            unit("s"),
            unit("m"),
            unit("g"),
            Term::unit_with_exponent(base("s"), -3),
            unit("m"),
        ]
        .into_iter()
        .reduce(Term::mul)
        .unwrap();
        assert_eq!(flatten_and_cancel(&term).unwrap().to_string(), "g.m2.s-2");
    }

    #[test]
    fn test_order_independent() {
        let a = Term::div(Term::mul(unit("g"), unit("m")), Term::unit_with_exponent(base("s"), 2));
        let b = Term::mul(
            Term::mul(Term::UnaryDiv(Box::new(unit("s"))), unit("m")),
            Term::div(unit("g"), unit("s")),
        );
        assert_eq!(flatten_and_cancel(&a).unwrap(), flatten_and_cancel(&b).unwrap());
    }

    #[test]
    fn test_annotations_vanish() {
        let term = Term::mul(
            Term::AnnotOnly(crate::types::Annotation("cells".into())),
            unit("m"),
        );
        assert_eq!(flatten_and_cancel(&term).unwrap(), unit("m"));
    }

    #[test]
    fn test_exponent_overflow() {
        let term = Term::mul(Term::unit_with_exponent(base("m"), i32::MAX), unit("m"));
        assert_eq!(flatten_and_cancel(&term), Err(CanonicalizeError::ExponentOverflow));

        let term = Term::UnaryDiv(Box::new(Term::unit_with_exponent(base("m"), i32::MIN)));
        assert_eq!(flatten(&term), Err(CanonicalizeError::ExponentOverflow));
    }
}
