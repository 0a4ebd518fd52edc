//! Canonicalization: reduce terms to base units
//!
//! Every unit is replaced by its definition until only base units and
//! integer literals remain. Along the way three quantities are tracked:
//!
//! - `magnitude`, the ratio factor from ordinary units and prefixes, kept as
//!   a numerator and denominator
//! - `cf_prefix`, the factor a value is scaled by before a special unit's
//!   function is applied (the `m` of `mCel`, the `5` of `5.Cel`)
//! - `special`, the name of the pending special function, if any
//!
//! The caller's factor is combined with these only at the top level, where
//! the direction of the conversion is known.

pub mod dimension;
mod flatten;
mod magnitude;
mod normalize;

pub use dimension::{analyze, compare, Comparison};
pub use flatten::{flatten, flatten_and_cancel};
pub use magnitude::Magnitude;
pub use normalize::{is_unity, normalize};

use crate::cache::{Cache, CacheKey};
use crate::config::FeatureFlags;
use crate::error::CanonicalizeError;
use crate::registry::Registry;
use crate::special::{SpecialFunction, SpecialFunctions};
use crate::types::{
    CanonicalTerm, CanonicalUnit, Component, Decimal, DefinedKind, Exponent, Operator, Term,
    UcumUnit, Unit,
};

/// Which side of a conversion a term is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The source unit: factor is in this unit, result in base units
    From,
    /// The target unit: factor is in base units, result in this unit
    To,
    /// Caller asserts the term has no special unit
    NoSpecialInvolved,
}

/// Factor and term after canonicalization
#[derive(Debug, Clone, PartialEq)]
pub struct Canonicalized {
    pub factor: Decimal,
    pub term: CanonicalTerm,
}

/// Intermediate result of reducing a (sub)term
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalStep {
    pub term: CanonicalTerm,
    pub magnitude: Magnitude,
    pub cf_prefix: Decimal,
    /// Name of the pending special function
    pub special: Option<&'static str>,
}

impl CanonicalStep {
    fn initial() -> Self {
        Self {
            term: Term::unity(),
            magnitude: Magnitude::one(),
            cf_prefix: Decimal::one(),
            special: None,
        }
    }

    fn integer(n: u64) -> Self {
        Self {
            magnitude: Magnitude::from(Decimal::from(n)),
            ..Self::initial()
        }
    }

    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }
}

/// Reduces terms to canonical form against a registry and function set
#[derive(Clone, Copy)]
pub struct Canonicalizer<'a> {
    registry: &'a Registry,
    functions: &'a SpecialFunctions,
    flags: FeatureFlags,
    cache: Option<&'a Cache>,
    mol_mass: Option<&'a Decimal>,
}

impl<'a> Canonicalizer<'a> {
    pub fn new(registry: &'a Registry, functions: &'a SpecialFunctions) -> Self {
        Self {
            registry,
            functions,
            flags: FeatureFlags::default(),
            cache: None,
            mol_mass: None,
        }
    }

    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_cache(mut self, cache: &'a Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Treat `mol` as a mass of `coefficient` grams. Only takes effect when
    /// molar-mass conversion is enabled in the flags.
    pub fn with_mol_mass(mut self, coefficient: &'a Decimal) -> Self {
        self.mol_mass = Some(coefficient);
        self
    }

    fn mol_as_mass(&self) -> Option<&'a Decimal> {
        self.mol_mass.filter(|_| self.flags.mol_mass_conversion)
    }

    /// Canonicalize `factor` units of `term`
    #[tracing::instrument(level = "trace", skip_all, fields(term = %term, ?direction))]
    pub fn canonicalize(
        &self,
        factor: &Decimal,
        term: &Term,
        direction: Direction,
    ) -> Result<Canonicalized, CanonicalizeError> {
        let step = self.canonical_step(term)?;

        let factor = match (step.special, direction) {
            (None, Direction::From | Direction::NoSpecialInvolved) => step.magnitude.apply(factor)?,
            (None, Direction::To) => step.magnitude.apply_inverse(factor)?,
            (Some(name), Direction::From) => {
                let function = self.function(name)?;
                let scaled = factor * &step.cf_prefix;
                step.magnitude
                    .apply(&function.to_canonical(&scaled, self.functions.scale())?)?
            }
            (Some(name), Direction::To) => {
                let function = self.function(name)?;
                let base = step.magnitude.apply_inverse(factor)?;
                let special = function.from_canonical(&base, self.functions.scale())?;
                special.checked_div(&step.cf_prefix)?
            }
            (Some(name), Direction::NoSpecialInvolved) => {
                panic!("special unit function '{name}' reached a conversion declared free of special units")
            }
        };

        Ok(Canonicalized {
            factor,
            term: step.term,
        })
    }

    /// Reduced, flattened and normalized step for a whole term
    pub fn canonical_step(&self, term: &Term) -> Result<CanonicalStep, CanonicalizeError> {
        let involves_mol = self.contains_mol(term)?;
        let key = match (self.cache, involves_mol) {
            (Some(_), false) => Some(CacheKey::new(term.to_string(), self.flags)),
            _ => None,
        };

        if let (Some(cache), Some(key)) = (self.cache, &key) {
            if let Some(hit) = cache.canonical(key) {
                return Ok(hit);
            }
        }

        if let Some(coefficient) = self.mol_as_mass().filter(|_| involves_mol) {
            tracing::debug!(%term, %coefficient, "canonicalizing mol as mass");
        }

        let raw = self.step(term, &Decimal::one())?;
        if raw.is_special() && involves_mol && self.mol_as_mass().is_some() {
            tracing::warn!(%term, "special unit with mol under molar-mass conversion");
            return Err(CanonicalizeError::MolInSpecialUnitToMass);
        }

        let step = CanonicalStep {
            term: normalize(&flatten_and_cancel(&raw.term)?),
            ..raw
        };

        if let (Some(cache), Some(key)) = (self.cache, key) {
            cache.store_canonical(key, step.clone());
        }
        Ok(step)
    }

    fn function(&self, name: &str) -> Result<&'a SpecialFunction, CanonicalizeError> {
        self.functions
            .get(name)
            .ok_or_else(|| CanonicalizeError::UnknownSpecialFunction(name.to_string()))
    }

    /// Reduce a (sub)term. `seed` scales the input of a special unit met
    /// directly below, as the `5` of `5.Cel` does.
    fn step(&self, term: &Term, seed: &Decimal) -> Result<CanonicalStep, CanonicalizeError> {
        match term {
            Term::Component(component) => self.component(component, seed),
            Term::Binary(left, op, right) => self.binary(left, *op, right),
            Term::UnaryDiv(inner) => self.binary(&Term::unity(), Operator::Div, inner),
            Term::Paren(inner) | Term::Annot(inner, _) => self.step(inner, seed),
            Term::AnnotOnly(_) => Ok(CanonicalStep::initial()),
        }
    }

    fn binary(&self, left: &Term, op: Operator, right: &Term) -> Result<CanonicalStep, CanonicalizeError> {
        if let Some(folded) = self.fold_integer_into_special(left, op, right)? {
            return Ok(folded);
        }
        let left = self.step(left, &Decimal::one())?;
        let right = self.step(right, &Decimal::one())?;
        match op {
            Operator::Mul => multiply(left, right),
            Operator::Div => divide(left, right),
        }
    }

    /// `n.Cel`, `Cel.n` and `Cel/n`: scale the special unit's input directly
    fn fold_integer_into_special(
        &self,
        left: &Term,
        op: Operator,
        right: &Term,
    ) -> Result<Option<CanonicalStep>, CanonicalizeError> {
        let (seed, special_side) = match (op, left.integer_literal(), right.integer_literal()) {
            (Operator::Mul, Some(n), None) if is_special_unit(right) => (Decimal::from(n), right),
            (Operator::Mul, None, Some(n)) if is_special_unit(left) => (Decimal::from(n), left),
            (Operator::Div, None, Some(n)) if is_special_unit(left) => {
                (Decimal::one().checked_div(&Decimal::from(n))?, left)
            }
            _ => return Ok(None),
        };
        self.step(special_side, &seed).map(Some)
    }

    fn component(&self, component: &Component, seed: &Decimal) -> Result<CanonicalStep, CanonicalizeError> {
        let step = self.unit(component.unit(), seed)?;
        match component {
            Component::Plain(_) => Ok(step),
            Component::Exponent(_, Exponent(exp)) => {
                let term = raise_term(&step.term, *exp)?;
                let raised = raise(step, *exp)?;
                Ok(CanonicalStep { term, ..raised })
            }
        }
    }

    fn unit(&self, unit: &Unit, seed: &Decimal) -> Result<CanonicalStep, CanonicalizeError> {
        match unit {
            Unit::Integer(n) => Ok(CanonicalStep::integer(*n)),
            Unit::Simple(concept) => self.concept(*concept, seed),
            Unit::Prefixed(prefix, concept) => {
                let step = self.concept(*concept, seed)?;
                Ok(compose_considering_special(step, &Decimal::exact(prefix.factor)?))
            }
        }
    }

    fn concept(&self, concept: UcumUnit, seed: &Decimal) -> Result<CanonicalStep, CanonicalizeError> {
        let def = match concept {
            UcumUnit::Base(base) => {
                return Ok(CanonicalStep {
                    term: Term::unit(CanonicalUnit::Base(base)),
                    ..CanonicalStep::initial()
                })
            }
            UcumUnit::Defined(def) => def,
        };

        let mol_as_mass = self.mol_as_mass();
        match def.kind {
            DefinedKind::Derived { factor, .. } | DefinedKind::Dimless { factor, .. } => {
                let source = self.registry.source_definition(def, mol_as_mass.is_some())?;
                let inner = self.step(source, &Decimal::one())?;
                let factor = match mol_as_mass {
                    Some(coefficient) if def.code == "mol" => coefficient.clone(),
                    _ => Decimal::exact(factor)?,
                };
                Ok(compose_considering_special(inner, &factor))
            }
            DefinedKind::Special { function, factor, .. } => {
                let source = self.registry.source_definition(def, mol_as_mass.is_some())?;
                let inner = self.step(source, &Decimal::one())?;
                Ok(CanonicalStep {
                    magnitude: inner.magnitude.scale(&Decimal::exact(factor)?),
                    cf_prefix: seed.clone(),
                    special: Some(function),
                    term: inner.term,
                })
            }
            DefinedKind::Arbitrary => Err(CanonicalizeError::ArbitraryUnitEncountered(def.code.to_string())),
        }
    }

    /// True if any unit in the term is, or is defined through, `mol`
    pub fn contains_mol(&self, term: &Term) -> Result<bool, CanonicalizeError> {
        let mut concepts = Vec::new();
        term.for_each_unit(&mut |unit| concepts.extend(unit.concept()));
        for concept in concepts {
            let UcumUnit::Defined(def) = concept else {
                continue;
            };
            if def.code == "mol" {
                return Ok(true);
            }
            if def.definition().is_some() && self.contains_mol(self.registry.source_definition(def, false)?)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn is_special_unit(term: &Term) -> bool {
    match term {
        Term::Component(Component::Plain(unit)) => unit.concept().is_some_and(|c| c.is_special()),
        Term::Paren(inner) | Term::Annot(inner, _) => is_special_unit(inner),
        _ => false,
    }
}

fn multiply(left: CanonicalStep, right: CanonicalStep) -> Result<CanonicalStep, CanonicalizeError> {
    let term = Term::mul(left.term, right.term);
    match (left.special, right.special) {
        (Some(a), Some(b)) => {
            panic!("cannot multiply two pending special units '{a}' and '{b}'")
        }
        (Some(function), None) => Ok(CanonicalStep {
            term,
            cf_prefix: right.magnitude.apply(&left.cf_prefix)?,
            magnitude: left.magnitude,
            special: Some(function),
        }),
        (None, Some(function)) => Ok(CanonicalStep {
            term,
            cf_prefix: left.magnitude.apply(&right.cf_prefix)?,
            magnitude: right.magnitude,
            special: Some(function),
        }),
        (None, None) => Ok(CanonicalStep {
            term,
            magnitude: left.magnitude.mul(&right.magnitude),
            cf_prefix: Decimal::one(),
            special: None,
        }),
    }
}

fn divide(left: CanonicalStep, right: CanonicalStep) -> Result<CanonicalStep, CanonicalizeError> {
    let term = Term::div(left.term, right.term);
    match (left.special, right.special) {
        (Some(a), Some(b)) => {
            panic!("cannot divide two pending special units '{a}' and '{b}'")
        }
        (None, None) => Ok(CanonicalStep {
            term,
            magnitude: left.magnitude.checked_div(&right.magnitude)?,
            cf_prefix: Decimal::one(),
            special: None,
        }),
        (left_special, right_special) => Ok(CanonicalStep {
            term,
            cf_prefix: right
                .magnitude
                .apply_inverse(&left.cf_prefix)?
                .checked_div(&right.cf_prefix)?,
            magnitude: left.magnitude,
            special: left_special.or(right_special),
        }),
    }
}

fn raise(step: CanonicalStep, exponent: i32) -> Result<CanonicalStep, CanonicalizeError> {
    if step.is_special() {
        Ok(CanonicalStep {
            cf_prefix: step.cf_prefix.checked_pow(exponent)?,
            ..step
        })
    } else {
        Ok(CanonicalStep {
            magnitude: step.magnitude.checked_pow(exponent)?,
            cf_prefix: Decimal::one(),
            ..step
        })
    }
}

/// A prefix or unit factor goes into `cf_prefix` while a special function is
/// pending, into `magnitude` otherwise
fn compose_considering_special(step: CanonicalStep, factor: &Decimal) -> CanonicalStep {
    if step.is_special() {
        CanonicalStep {
            cf_prefix: &step.cf_prefix * factor,
            ..step
        }
    } else {
        CanonicalStep {
            magnitude: step.magnitude.scale(factor),
            ..step
        }
    }
}

/// Multiply every exponent in the term by `exponent`
fn raise_term(term: &CanonicalTerm, exponent: i32) -> Result<CanonicalTerm, CanonicalizeError> {
    Ok(match term {
        Term::Component(component) => {
            let total = component
                .exponent()
                .unwrap_or(1)
                .checked_mul(exponent)
                .ok_or(CanonicalizeError::ExponentOverflow)?;
            match total {
                1 => Term::unit(*component.unit()),
                _ => Term::unit_with_exponent(*component.unit(), total),
            }
        }
        Term::Binary(left, op, right) => {
            Term::binary(raise_term(left, exponent)?, *op, raise_term(right, exponent)?)
        }
        Term::UnaryDiv(inner) => Term::UnaryDiv(Box::new(raise_term(inner, exponent)?)),
        Term::Paren(inner) | Term::Annot(inner, _) => raise_term(inner, exponent)?,
        Term::AnnotOnly(_) => Term::unity(),
    })
}
