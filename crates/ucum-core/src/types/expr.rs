//! UCUM expression trees
//!
//! [`Term`] is generic over the kind of unit at its leaves. `Term<Unit>`, the
//! default, is what the parser produces and may reference any concept with or
//! without a prefix. [`CanonicalTerm`] can only hold base units and integer
//! literals, so a canonical result cannot smuggle in a derived unit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BaseUnitDef, PrefixDef, UcumUnit};

/// Binary operator between two terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `.`
    Mul,
    /// `/`
    Div,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Mul => '.',
            Operator::Div => '/',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exponent(pub i32);

/// Curly-brace annotation text, without the braces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation(pub String);

/// Leaf types a [`Term`] can be built from
pub trait TermUnit: Clone + PartialEq + fmt::Display {
    fn integer(value: u64) -> Self;
    fn as_integer(&self) -> Option<u64>;
}

/// A unit as written in an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Integer literal used as a unit factor, e.g. the `10` in `10.m`
    Integer(u64),
    Prefixed(&'static PrefixDef, UcumUnit),
    Simple(UcumUnit),
}

impl Unit {
    /// The referenced concept, if this is not a literal
    pub fn concept(&self) -> Option<UcumUnit> {
        match self {
            Unit::Integer(_) => None,
            Unit::Prefixed(_, unit) | Unit::Simple(unit) => Some(*unit),
        }
    }
}

impl TermUnit for Unit {
    fn integer(value: u64) -> Self {
        Unit::Integer(value)
    }

    fn as_integer(&self) -> Option<u64> {
        match self {
            Unit::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

/// A unit allowed in canonical terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalUnit {
    Integer(u64),
    Base(&'static BaseUnitDef),
}

impl CanonicalUnit {
    /// Sort key for canonical ordering: integers first, then base units by code
    pub fn sort_key(&self) -> (u8, u64, &'static str) {
        match self {
            CanonicalUnit::Integer(value) => (0, *value, ""),
            CanonicalUnit::Base(base) => (1, 0, base.code),
        }
    }
}

impl TermUnit for CanonicalUnit {
    fn integer(value: u64) -> Self {
        CanonicalUnit::Integer(value)
    }

    fn as_integer(&self) -> Option<u64> {
        match self {
            CanonicalUnit::Integer(value) => Some(*value),
            CanonicalUnit::Base(_) => None,
        }
    }
}

impl From<CanonicalUnit> for Unit {
    fn from(unit: CanonicalUnit) -> Self {
        match unit {
            CanonicalUnit::Integer(value) => Unit::Integer(value),
            CanonicalUnit::Base(base) => Unit::Simple(UcumUnit::Base(base)),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Integer(value) => write!(f, "{value}"),
            Unit::Prefixed(prefix, unit) => write!(f, "{}{}", prefix.code, unit.code()),
            Unit::Simple(unit) => f.write_str(unit.code()),
        }
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalUnit::Integer(value) => write!(f, "{value}"),
            CanonicalUnit::Base(base) => f.write_str(base.code),
        }
    }
}

/// A unit, optionally raised to an integer power
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component<U = Unit> {
    Plain(U),
    Exponent(U, Exponent),
}

impl<U> Component<U> {
    pub fn unit(&self) -> &U {
        match self {
            Component::Plain(unit) | Component::Exponent(unit, _) => unit,
        }
    }

    /// Written exponent, `None` when absent
    pub fn exponent(&self) -> Option<i32> {
        match self {
            Component::Plain(_) => None,
            Component::Exponent(_, Exponent(exp)) => Some(*exp),
        }
    }
}

/// A UCUM expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term<U = Unit> {
    Component(Component<U>),
    /// A term followed by an annotation, `m{length}`
    Annot(Box<Term<U>>, Annotation),
    /// A bare annotation, `{cells}`; means 1
    AnnotOnly(Annotation),
    Paren(Box<Term<U>>),
    Binary(Box<Term<U>>, Operator, Box<Term<U>>),
    /// Leading division, `/s`
    UnaryDiv(Box<Term<U>>),
}

/// Term built only from base units and integer literals
pub type CanonicalTerm = Term<CanonicalUnit>;

impl<U: TermUnit> Term<U> {
    /// The literal `1`
    pub fn unity() -> Self {
        Term::Component(Component::Plain(U::integer(1)))
    }

    pub fn unit(unit: U) -> Self {
        Term::Component(Component::Plain(unit))
    }

    pub fn unit_with_exponent(unit: U, exponent: i32) -> Self {
        Term::Component(Component::Exponent(unit, Exponent(exponent)))
    }

    pub fn binary(left: Term<U>, op: Operator, right: Term<U>) -> Self {
        Term::Binary(Box::new(left), op, Box::new(right))
    }

    pub fn mul(left: Term<U>, right: Term<U>) -> Self {
        Self::binary(left, Operator::Mul, right)
    }

    pub fn div(left: Term<U>, right: Term<U>) -> Self {
        Self::binary(left, Operator::Div, right)
    }

    /// Value of an integer literal, looking through parentheses and annotations
    pub fn integer_literal(&self) -> Option<u64> {
        match self {
            Term::Component(Component::Plain(unit)) => unit.as_integer(),
            Term::Paren(inner) | Term::Annot(inner, _) => inner.integer_literal(),
            _ => None,
        }
    }
}

impl<U> Term<U> {
    /// Rebuild the tree with different leaves, failing if any leaf is rejected
    pub fn try_map_units<V, F>(&self, f: &F) -> Option<Term<V>>
    where
        F: Fn(&U) -> Option<V>,
    {
        Some(match self {
            Term::Component(Component::Plain(unit)) => Term::Component(Component::Plain(f(unit)?)),
            Term::Component(Component::Exponent(unit, exp)) => {
                Term::Component(Component::Exponent(f(unit)?, *exp))
            }
            Term::Annot(inner, annotation) => {
                Term::Annot(Box::new(inner.try_map_units(f)?), annotation.clone())
            }
            Term::AnnotOnly(annotation) => Term::AnnotOnly(annotation.clone()),
            Term::Paren(inner) => Term::Paren(Box::new(inner.try_map_units(f)?)),
            Term::Binary(left, op, right) => Term::Binary(
                Box::new(left.try_map_units(f)?),
                *op,
                Box::new(right.try_map_units(f)?),
            ),
            Term::UnaryDiv(inner) => Term::UnaryDiv(Box::new(inner.try_map_units(f)?)),
        })
    }

    /// Visit every leaf unit, left to right
    pub fn for_each_unit(&self, f: &mut impl FnMut(&U)) {
        match self {
            Term::Component(component) => f(component.unit()),
            Term::AnnotOnly(_) => {}
            Term::Annot(inner, _) | Term::Paren(inner) | Term::UnaryDiv(inner) => {
                inner.for_each_unit(f)
            }
            Term::Binary(left, _, right) => {
                left.for_each_unit(f);
                right.for_each_unit(f);
            }
        }
    }
}

impl Term<Unit> {
    /// Reinterpret as a canonical term; `None` if it names anything but
    /// unprefixed base units and integers
    pub fn to_canonical(&self) -> Option<CanonicalTerm> {
        self.try_map_units(&|unit: &Unit| match unit {
            Unit::Integer(value) => Some(CanonicalUnit::Integer(*value)),
            Unit::Simple(UcumUnit::Base(base)) => Some(CanonicalUnit::Base(base)),
            _ => None,
        })
    }
}

impl From<CanonicalTerm> for Term<Unit> {
    fn from(term: CanonicalTerm) -> Self {
        let mapped: Option<Term<Unit>> =
            term.try_map_units(&|unit: &CanonicalUnit| Some(Unit::from(*unit)));
        mapped.unwrap_or_else(Term::unity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn test_unity() {
        let one: Term = Term::unity();
        assert_eq!(one.integer_literal(), Some(1));
    }

    #[test]
    fn test_to_canonical() {
        let registry = Registry::new();
        let meter = registry.unit("m").unwrap();
        let gram = registry.unit("g").unwrap();
        let kilo = registry.prefix("k").unwrap();

        let term = Term::div(Term::unit(Unit::Simple(meter)), Term::unit_with_exponent(Unit::Integer(10), 2));
        let canonical = term.to_canonical().unwrap();
        assert_eq!(Term::from(canonical), term);

        let prefixed = Term::unit(Unit::Prefixed(kilo, gram));
        assert_eq!(prefixed.to_canonical(), None);

        let liter = registry.unit("l").unwrap();
        assert_eq!(Term::unit(Unit::Simple(liter)).to_canonical(), None);
    }

    #[test]
    fn test_for_each_unit_order() {
        let term: Term = Term::mul(
            Term::unit(Unit::Integer(2)),
            Term::UnaryDiv(Box::new(Term::unit(Unit::Integer(3)))),
        );
        let mut seen = Vec::new();
        term.for_each_unit(&mut |unit| seen.push(unit.as_integer()));
        assert_eq!(seen, vec![Some(2), Some(3)]);
    }
}
