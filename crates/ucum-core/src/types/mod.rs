//! Core value and expression types

pub mod concept;
pub mod decimal;
pub mod dimension;
pub mod expr;

pub use concept::{BaseUnitDef, DefinedKind, PrefixDef, UcumUnit, UnitDef};
pub use decimal::Decimal;
pub use dimension::{
    add_dimension, diff_dimensions, format_dimensions, merge_dimensions, scale_dimensions,
    Dimension, Dimensions,
};
pub use expr::{
    Annotation, CanonicalTerm, CanonicalUnit, Component, Exponent, Operator, Term, TermUnit, Unit,
};
