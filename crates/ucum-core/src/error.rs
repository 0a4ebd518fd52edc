//! Error types for every stage of the engine

use thiserror::Error;

use crate::types::{format_dimensions, Dimensions};

/// Failures of decimal arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("invalid decimal literal '{0}'")]
    InvalidLiteral(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("zero cannot be raised to a negative power")]
    ZeroToNegativePower,

    #[error("special unit function produced a non-finite value")]
    NonFinite,

    #[error("exponent {0} is out of range")]
    ExponentOutOfRange(i32),
}

/// Rejections of unit expressions during parsing and validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("'{prefix}' is not a valid prefix for unit '{unit}'")]
    InvalidPrefix { prefix: String, unit: String },

    #[error("prefix '{prefix}' is not allowed on non-metric unit '{unit}'")]
    PrefixOnNonMetricUnit { prefix: String, unit: String },

    #[error("annotation '{0}' contains characters outside printable ASCII")]
    InvalidAnnotation(String),

    #[error("annotations directly after a parenthesized term are disabled")]
    AnnotationAfterParens,

    #[error("invalid use of special unit: {0}")]
    InvalidSpecialUnitUsage(String),
}

/// Failures while reducing a term to base units
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonicalizeError {
    #[error("arbitrary unit '{0}' has no canonical form")]
    ArbitraryUnitEncountered(String),

    #[error("a special unit involving mol cannot be converted through molar mass")]
    MolInSpecialUnitToMass,

    #[error("no special function named '{0}' is registered")]
    UnknownSpecialFunction(String),

    #[error("unit exponents overflow")]
    ExponentOverflow,

    #[error("definition of '{code}' does not parse: {source}")]
    InvalidDefinition { code: String, source: ParseError },

    #[error(transparent)]
    Arithmetic(#[from] DecimalError),
}

/// Failures of a unit conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("canonicalization failed: {0}")]
    FailedCanonicalization(#[from] CanonicalizeError),

    #[error("units are not commensurable, base dimensions differ by {}", format_dimensions(.0))]
    BaseDimensionMismatch(Dimensions),
}

/// Any failure surfaced by [`crate::Engine`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Canonicalize(#[from] CanonicalizeError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Decimal(#[from] DecimalError),
}

/// Failures loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;

    #[test]
    fn test_mismatch_message_lists_dimensions() {
        let mut diff = Dimensions::new();
        diff.insert(Dimension::Length, 1);
        diff.insert(Dimension::Time, -1);
        let err = ConversionError::BaseDimensionMismatch(diff);
        assert_eq!(
            err.to_string(),
            "units are not commensurable, base dimensions differ by L.T-1"
        );
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err: EngineError = ParseError::UnknownUnit("foo".into()).into();
        assert_eq!(err.to_string(), "unknown unit 'foo'");
    }
}
