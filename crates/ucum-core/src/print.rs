//! UCUM syntax printer
//!
//! Prints terms back into the case-sensitive UCUM syntax they were parsed
//! from. Parsing the printed text of a parsed term yields the same tree.
//! The grammar gives integer literals no exponent, so a hand-built integer
//! power prints as plain digits and does not re-parse.

use std::fmt;

use crate::types::{Component, Term};

impl<U: fmt::Display> fmt::Display for Component<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Plain(unit) => write!(f, "{unit}"),
            Component::Exponent(unit, exponent) => write!(f, "{unit}{}", exponent.0),
        }
    }
}

impl<U: fmt::Display> fmt::Display for Term<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Component(component) => write!(f, "{component}"),
            Term::Annot(inner, annotation) => write!(f, "{inner}{{{}}}", annotation.0),
            Term::AnnotOnly(annotation) => write!(f, "{{{}}}", annotation.0),
            Term::Paren(inner) => write!(f, "({inner})"),
            Term::Binary(left, op, right) => write!(f, "{left}{}{right}", op.symbol()),
            Term::UnaryDiv(inner) => write!(f, "/{inner}"),
        }
    }
}

/// Render a term in UCUM syntax
pub fn print<U: fmt::Display>(term: &Term<U>) -> String {
    term.to_string()
}
