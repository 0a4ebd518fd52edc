//! Concept lookup
//!
//! The [`Registry`] indexes the static tables by code and hands out parsed
//! source definitions. Definitions are parsed on first request and kept for
//! the lifetime of the registry.

mod tables;

pub use tables::{BASE_UNITS, PREFIXES, UNITS};

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{CanonicalizeError, ParseError};
use crate::parser::{self, ParseOptions};
use crate::types::{BaseUnitDef, PrefixDef, Term, UcumUnit, UnitDef};

/// Definition used for `mol` when converting through molar mass
const MOL_AS_MASS_DEFINITION: &str = "g";

type Parsed = OnceLock<Result<Term, ParseError>>;

/// Code-indexed view of the UCUM concept tables
pub struct Registry {
    prefixes: HashMap<&'static str, &'static PrefixDef>,
    units: HashMap<&'static str, UcumUnit>,
    definitions: HashMap<&'static str, Parsed>,
    mol_as_mass: Parsed,
}

impl Registry {
    pub fn new() -> Self {
        let prefixes = PREFIXES.iter().map(|p| (p.code, p)).collect();

        let mut units: HashMap<&'static str, UcumUnit> = HashMap::new();
        for base in BASE_UNITS {
            units.insert(base.code, UcumUnit::Base(base));
        }
        for def in UNITS {
            units.insert(def.code, UcumUnit::Defined(def));
        }

        let definitions = UNITS
            .iter()
            .filter(|def| def.definition().is_some())
            .map(|def| (def.code, OnceLock::new()))
            .collect();

        Self {
            prefixes,
            units,
            definitions,
            mol_as_mass: OnceLock::new(),
        }
    }

    pub fn prefix(&self, code: &str) -> Option<&'static PrefixDef> {
        self.prefixes.get(code).copied()
    }

    pub fn unit(&self, code: &str) -> Option<UcumUnit> {
        self.units.get(code).copied()
    }

    pub fn base_unit(&self, code: &str) -> Option<&'static BaseUnitDef> {
        match self.unit(code)? {
            UcumUnit::Base(base) => Some(base),
            UcumUnit::Defined(_) => None,
        }
    }

    pub fn defined_unit(&self, code: &str) -> Option<&'static UnitDef> {
        match self.unit(code)? {
            UcumUnit::Defined(def) => Some(def),
            UcumUnit::Base(_) => None,
        }
    }

    /// All known units, base units first
    pub fn units(&self) -> impl Iterator<Item = UcumUnit> {
        BASE_UNITS
            .iter()
            .map(UcumUnit::Base)
            .chain(UNITS.iter().map(UcumUnit::Defined))
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &'static PrefixDef> {
        PREFIXES.iter()
    }

    /// Parsed source definition of a defined unit.
    ///
    /// With `mol_as_mass` set, `mol` is defined as `g` so that amounts of
    /// substance convert to masses through a molar-mass coefficient.
    pub fn source_definition(
        &self,
        def: &'static UnitDef,
        mol_as_mass: bool,
    ) -> Result<&Term, CanonicalizeError> {
        let (slot, text) = if mol_as_mass && def.code == "mol" {
            (&self.mol_as_mass, MOL_AS_MASS_DEFINITION)
        } else {
            let (_, text) = def
                .definition()
                .ok_or_else(|| CanonicalizeError::ArbitraryUnitEncountered(def.code.to_string()))?;
            let slot = self.definitions.get(def.code).ok_or_else(|| {
                CanonicalizeError::InvalidDefinition {
                    code: def.code.to_string(),
                    source: ParseError::UnknownUnit(def.code.to_string()),
                }
            })?;
            (slot, text)
        };

        slot.get_or_init(|| parser::parse_term(text, self, &ParseOptions::permissive()))
            .as_ref()
            .map_err(|source| CanonicalizeError::InvalidDefinition {
                code: def.code.to_string(),
                source: source.clone(),
            })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;

    #[test]
    fn test_lookup() {
        let registry = Registry::new();
        assert_eq!(registry.base_unit("m").map(|b| b.dimension), Some(Dimension::Length));
        assert_eq!(registry.prefix("k").map(|p| p.factor), Some("1e3"));
        assert!(registry.defined_unit("[in_i]").is_some());
        assert!(registry.unit("inch").is_none());
        assert!(registry.defined_unit("m").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let registry = Registry::new();
        assert_eq!(registry.units().count(), BASE_UNITS.len() + UNITS.len());
        assert_eq!(registry.units.len(), BASE_UNITS.len() + UNITS.len());
        assert_eq!(registry.prefixes.len(), PREFIXES.len());
    }

    #[test]
    fn test_every_definition_parses() {
        let registry = Registry::new();
        for def in UNITS.iter().filter(|def| def.definition().is_some()) {
            let parsed = registry.source_definition(def, false);
            assert!(parsed.is_ok(), "{}: {:?}", def.code, parsed.err());
        }
    }

    #[test]
    fn test_mol_as_mass() {
        let registry = Registry::new();
        let mol = registry.defined_unit("mol").unwrap();
        let mass = registry.source_definition(mol, true).unwrap();
        assert_eq!(mass.to_string(), "g");
        let count = registry.source_definition(mol, false).unwrap();
        assert_eq!(count.to_string(), "10*23");
    }

    #[test]
    fn test_arbitrary_units_have_no_definition() {
        let registry = Registry::new();
        let iu = registry.defined_unit("[IU]").unwrap();
        assert_eq!(
            registry.source_definition(iu, false),
            Err(CanonicalizeError::ArbitraryUnitEncountered("[IU]".into()))
        );
    }
}
