//! Expression validation
//!
//! Validation is parsing plus the rules the grammar cannot express:
//!
//! - annotations directly after a parenthesized term, when disabled
//! - special units must appear at most once, without an exponent and never
//!   in a divisor, since their scales are not ratio scales

use crate::config::FeatureFlags;
use crate::error::ParseError;
use crate::parser::{self, ParseOptions};
use crate::registry::Registry;
use crate::types::{Operator, Term};

/// Parse and validate a unit expression
#[tracing::instrument(level = "trace", skip(registry))]
pub fn validate(input: &str, registry: &Registry, flags: FeatureFlags) -> Result<Term, ParseError> {
    let options = ParseOptions {
        allow_prefix_on_non_metric: flags.prefix_on_non_metric_units,
    };
    let term = parser::parse_term(input, registry, &options)?;

    if !flags.annot_after_parens && has_annotation_after_parens(&term) {
        tracing::warn!(input, "annotation after parentheses rejected");
        return Err(ParseError::AnnotationAfterParens);
    }

    let mut specials = Vec::new();
    collect_special_units(&term, false, &mut specials)?;
    if specials.len() > 1 {
        tracing::warn!(input, "more than one special unit");
        return Err(ParseError::InvalidSpecialUnitUsage(format!(
            "at most one special unit per expression, found {}",
            specials.join(", ")
        )));
    }

    Ok(term)
}

fn has_annotation_after_parens(term: &Term) -> bool {
    match term {
        Term::Annot(inner, _) => {
            matches!(**inner, Term::Paren(_)) || has_annotation_after_parens(inner)
        }
        Term::Paren(inner) | Term::UnaryDiv(inner) => has_annotation_after_parens(inner),
        Term::Binary(left, _, right) => {
            has_annotation_after_parens(left) || has_annotation_after_parens(right)
        }
        Term::Component(_) | Term::AnnotOnly(_) => false,
    }
}

/// Collect special-unit codes, rejecting exponents and divisor positions
fn collect_special_units(
    term: &Term,
    in_divisor: bool,
    found: &mut Vec<String>,
) -> Result<(), ParseError> {
    match term {
        Term::Component(component) => {
            let unit = component.unit();
            if !unit.concept().is_some_and(|c| c.is_special()) {
                return Ok(());
            }
            let code = unit.to_string();
            if component.exponent().is_some_and(|exp| exp != 1) {
                return Err(ParseError::InvalidSpecialUnitUsage(format!(
                    "'{code}' cannot carry an exponent"
                )));
            }
            if in_divisor {
                return Err(ParseError::InvalidSpecialUnitUsage(format!(
                    "'{code}' cannot be divided by"
                )));
            }
            found.push(code);
            Ok(())
        }
        Term::Binary(left, op, right) => {
            collect_special_units(left, in_divisor, found)?;
            collect_special_units(right, in_divisor || *op == Operator::Div, found)
        }
        Term::UnaryDiv(inner) => collect_special_units(inner, true, found),
        Term::Paren(inner) | Term::Annot(inner, _) => collect_special_units(inner, in_divisor, found),
        Term::AnnotOnly(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str) -> Result<Term, ParseError> {
        validate(input, &Registry::new(), FeatureFlags::default())
    }

    #[test]
    fn test_valid_expressions() {
        for input in ["m", "kg.m/s2", "mmol/l", "Cel", "5.Cel", "Cel.5", "[degF]/2", "mCel", "B[SPL].m"] {
            assert!(check(input).is_ok(), "{input}");
        }
    }

    #[test]
    fn test_special_unit_with_exponent() {
        assert!(matches!(check("Cel2"), Err(ParseError::InvalidSpecialUnitUsage(_))));
        assert!(check("Cel1").is_ok());
    }

    #[test]
    fn test_special_unit_in_divisor() {
        assert!(matches!(check("m/Cel"), Err(ParseError::InvalidSpecialUnitUsage(_))));
        assert!(matches!(check("/Cel"), Err(ParseError::InvalidSpecialUnitUsage(_))));
        assert!(matches!(check("m/(2.Cel)"), Err(ParseError::InvalidSpecialUnitUsage(_))));
    }

    #[test]
    fn test_two_special_units() {
        assert!(matches!(check("Cel.[degF]"), Err(ParseError::InvalidSpecialUnitUsage(_))));
    }

    #[test]
    fn test_annotation_after_parens_flag() {
        let registry = Registry::new();
        assert!(validate("(m/s){speed}", &registry, FeatureFlags::default()).is_ok());

        let strict = FeatureFlags {
            annot_after_parens: false,
            ..FeatureFlags::default()
        };
        assert_eq!(
            validate("(m/s){speed}", &registry, strict),
            Err(ParseError::AnnotationAfterParens)
        );
        assert!(validate("m{speed}/s", &registry, strict).is_ok());
    }

    #[test]
    fn test_prefix_flag() {
        let registry = Registry::new();
        let strict = FeatureFlags {
            prefix_on_non_metric_units: false,
            ..FeatureFlags::default()
        };
        assert!(matches!(
            validate("k[ft_i]", &registry, strict),
            Err(ParseError::PrefixOnNonMetricUnit { .. })
        ));
        assert!(validate("k[ft_i]", &registry, FeatureFlags::default()).is_ok());
    }
}
