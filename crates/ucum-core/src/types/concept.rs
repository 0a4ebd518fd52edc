//! UCUM concepts: prefixes, base units and defined units
//!
//! Concepts are static data. Terms reference them by `&'static` pointer, so
//! comparing two concepts is comparing the table entries they point at.

use std::fmt;

use super::Dimension;

/// A metric prefix such as `k` (10^3) or `Ki` (2^10)
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PrefixDef {
    pub code: &'static str,
    pub name: &'static str,
    /// Exact decimal literal
    pub factor: &'static str,
}

/// One of the seven base units
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct BaseUnitDef {
    pub code: &'static str,
    pub name: &'static str,
    pub property: &'static str,
    pub dimension: Dimension,
}

/// A unit defined in terms of other units
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct UnitDef {
    pub code: &'static str,
    pub name: &'static str,
    pub property: &'static str,
    /// Whether prefixes may be applied
    pub metric: bool,
    pub kind: DefinedKind,
}

/// How a defined unit relates to base units
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum DefinedKind {
    /// `factor` times the definition term
    Derived {
        factor: &'static str,
        definition: &'static str,
    },
    /// Like `Derived`, but the definition reduces to a pure number
    Dimless {
        factor: &'static str,
        definition: &'static str,
    },
    /// Non-linear scale; `function` names a [`crate::special::SpecialFunction`]
    /// applied to multiples of `factor` times the definition term
    Special {
        function: &'static str,
        factor: &'static str,
        definition: &'static str,
    },
    /// Procedure-defined, never convertible
    Arbitrary,
}

impl UnitDef {
    /// Factor and source definition, if the unit has one
    pub fn definition(&self) -> Option<(&'static str, &'static str)> {
        match self.kind {
            DefinedKind::Derived { factor, definition }
            | DefinedKind::Dimless { factor, definition }
            | DefinedKind::Special {
                factor, definition, ..
            } => Some((factor, definition)),
            DefinedKind::Arbitrary => None,
        }
    }

    pub fn special_function(&self) -> Option<&'static str> {
        match self.kind {
            DefinedKind::Special { function, .. } => Some(function),
            _ => None,
        }
    }
}

/// A unit concept as referenced from a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UcumUnit {
    Base(&'static BaseUnitDef),
    Defined(&'static UnitDef),
}

impl UcumUnit {
    pub fn code(&self) -> &'static str {
        match self {
            UcumUnit::Base(base) => base.code,
            UcumUnit::Defined(def) => def.code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UcumUnit::Base(base) => base.name,
            UcumUnit::Defined(def) => def.name,
        }
    }

    pub fn property(&self) -> &'static str {
        match self {
            UcumUnit::Base(base) => base.property,
            UcumUnit::Defined(def) => def.property,
        }
    }

    /// Base units are always metric
    pub fn is_metric(&self) -> bool {
        match self {
            UcumUnit::Base(_) => true,
            UcumUnit::Defined(def) => def.metric,
        }
    }

    pub fn is_special(&self) -> bool {
        self.special_function().is_some()
    }

    pub fn is_arbitrary(&self) -> bool {
        matches!(
            self,
            UcumUnit::Defined(UnitDef {
                kind: DefinedKind::Arbitrary,
                ..
            })
        )
    }

    pub fn special_function(&self) -> Option<&'static str> {
        match self {
            UcumUnit::Base(_) => None,
            UcumUnit::Defined(def) => def.special_function(),
        }
    }
}

impl fmt::Display for UcumUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for PrefixDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
