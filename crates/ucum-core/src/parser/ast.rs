//! Build expression trees from parsed pairs

use pest::iterators::{Pair, Pairs};

use super::{ParseOptions, Rule};
use crate::error::ParseError;
use crate::registry::Registry;
use crate::types::{Annotation, Operator, Term, Unit};

/// Build a term from the pairs of a `main_term` parse
pub fn build_term(
    pairs: Pairs<'_, Rule>,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Term, ParseError> {
    for pair in pairs {
        if pair.as_rule() == Rule::main_term {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::term {
                    return build_chain(inner, registry, options);
                }
            }
        }
    }
    Err(ParseError::Syntax("expected a unit expression".to_string()))
}

/// `term`: optional leading "/", then components joined left-associatively
fn build_chain(
    pair: Pair<'_, Rule>,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Term, ParseError> {
    let mut pairs = pair.into_inner().peekable();

    let leading_div = pairs
        .next_if(|p| p.as_rule() == Rule::leading_div)
        .is_some();

    let first = pairs
        .next()
        .ok_or_else(|| ParseError::Syntax("expected a component".to_string()))?;
    let mut acc = build_component(first, registry, options)?;
    if leading_div {
        acc = Term::UnaryDiv(Box::new(acc));
    }

    while let Some(op_pair) = pairs.next() {
        let op = match op_pair.as_str() {
            "." => Operator::Mul,
            _ => Operator::Div,
        };
        let rhs = pairs
            .next()
            .ok_or_else(|| ParseError::Syntax(format!("expected a component after '{}'", op.symbol())))?;
        acc = Term::binary(acc, op, build_component(rhs, registry, options)?);
    }

    Ok(acc)
}

fn build_component(
    pair: Pair<'_, Rule>,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Term, ParseError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| ParseError::Syntax("empty component".to_string()))?;

    match inner.as_rule() {
        Rule::paren_term => {
            let mut parts = inner.into_inner();
            let body = parts
                .next()
                .ok_or_else(|| ParseError::Syntax("empty parentheses".to_string()))?;
            let term = Term::Paren(Box::new(build_chain(body, registry, options)?));
            attach_annotation(term, parts.next())
        }
        Rule::annotatable => build_annotatable(inner, registry, options),
        Rule::annotation => Ok(Term::AnnotOnly(build_annotation(inner)?)),
        rule => Err(ParseError::Syntax(format!("unexpected {rule:?}"))),
    }
}

fn build_annotatable(
    pair: Pair<'_, Rule>,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Term, ParseError> {
    let mut parts = pair.into_inner().peekable();
    let head = parts
        .next()
        .ok_or_else(|| ParseError::Syntax("expected a unit".to_string()))?;

    let term = match head.as_rule() {
        Rule::integer => {
            let value = head
                .as_str()
                .parse::<u64>()
                .map_err(|_| ParseError::Syntax(format!("integer '{}' is too large", head.as_str())))?;
            Term::unit(Unit::Integer(value))
        }
        _ => {
            let unit = resolve_symbol(head.as_str(), registry, options)?;
            match parts.next_if(|p| p.as_rule() == Rule::exponent) {
                Some(exp) => {
                    let exponent = exp.as_str().parse::<i32>().map_err(|_| {
                        ParseError::Syntax(format!("exponent '{}' is out of range", exp.as_str()))
                    })?;
                    Term::unit_with_exponent(unit, exponent)
                }
                None => Term::unit(unit),
            }
        }
    };

    attach_annotation(term, parts.next())
}

fn attach_annotation(term: Term, annotation: Option<Pair<'_, Rule>>) -> Result<Term, ParseError> {
    match annotation {
        Some(pair) => Ok(Term::Annot(Box::new(term), build_annotation(pair)?)),
        None => Ok(term),
    }
}

fn build_annotation(pair: Pair<'_, Rule>) -> Result<Annotation, ParseError> {
    let text = pair
        .into_inner()
        .next()
        .map(|p| p.as_str())
        .unwrap_or_default();
    if text.chars().all(|c| ('!'..='~').contains(&c)) {
        Ok(Annotation(text.to_string()))
    } else {
        Err(ParseError::InvalidAnnotation(text.to_string()))
    }
}

/// Resolve a unit symbol, splitting off a prefix if needed.
///
/// An exact unit match wins. Otherwise the shortest matching unit suffix
/// whose remainder is a known prefix is taken, so `hPa` resolves to hecto-pascal
/// rather than failing on the year `a`.
pub fn resolve_symbol(
    symbol: &str,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Unit, ParseError> {
    if let Some(unit) = registry.unit(symbol) {
        return Ok(Unit::Simple(unit));
    }

    let mut failure = None;
    let splits = symbol.char_indices().map(|(idx, _)| idx).filter(|&idx| idx > 0);
    for idx in splits.rev() {
        let (prefix_code, unit_code) = symbol.split_at(idx);
        let Some(unit) = registry.unit(unit_code) else {
            continue;
        };
        match registry.prefix(prefix_code) {
            Some(prefix) => {
                if !options.allow_prefix_on_non_metric && !unit.is_metric() {
                    tracing::warn!(symbol, "prefix on non-metric unit rejected");
                    return Err(ParseError::PrefixOnNonMetricUnit {
                        prefix: prefix_code.to_string(),
                        unit: unit_code.to_string(),
                    });
                }
                return Ok(Unit::Prefixed(prefix, unit));
            }
            None => {
                failure.get_or_insert_with(|| ParseError::InvalidPrefix {
                    prefix: prefix_code.to_string(),
                    unit: unit_code.to_string(),
                });
            }
        }
    }

    Err(failure.unwrap_or_else(|| ParseError::UnknownUnit(symbol.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(symbol: &str) -> Result<Unit, ParseError> {
        resolve_symbol(symbol, &Registry::new(), &ParseOptions::default())
    }

    #[test]
    fn test_exact_match_wins() {
        assert!(matches!(resolve("Pa"), Ok(Unit::Simple(u)) if u.code() == "Pa"));
        assert!(matches!(resolve("cd"), Ok(Unit::Simple(u)) if u.code() == "cd"));
        assert!(matches!(resolve("mol"), Ok(Unit::Simple(u)) if u.code() == "mol"));
    }

    #[test]
    fn test_prefix_split() {
        let Ok(Unit::Prefixed(prefix, unit)) = resolve("hPa") else {
            panic!("hPa should resolve to a prefixed unit");
        };
        assert_eq!((prefix.code, unit.code()), ("h", "Pa"));

        let Ok(Unit::Prefixed(prefix, unit)) = resolve("dam") else {
            panic!("dam should resolve to a prefixed unit");
        };
        assert_eq!((prefix.code, unit.code()), ("da", "m"));

        let Ok(Unit::Prefixed(prefix, unit)) = resolve("KiBy") else {
            panic!("KiBy should resolve to a prefixed unit");
        };
        assert_eq!((prefix.code, unit.code()), ("Ki", "By"));
    }

    #[test]
    fn test_invalid_prefix() {
        assert_eq!(
            resolve("xm"),
            Err(ParseError::InvalidPrefix {
                prefix: "x".into(),
                unit: "m".into()
            })
        );
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(resolve("foo"), Err(ParseError::UnknownUnit("foo".into())));
    }

    #[test]
    fn test_prefix_on_non_metric_unit() {
        let registry = Registry::new();
        assert!(resolve_symbol("k[in_i]", &registry, &ParseOptions::default()).is_ok());

        let strict = ParseOptions {
            allow_prefix_on_non_metric: false,
        };
        assert_eq!(
            resolve_symbol("k[in_i]", &registry, &strict),
            Err(ParseError::PrefixOnNonMetricUnit {
                prefix: "k".into(),
                unit: "[in_i]".into()
            })
        );
        assert!(resolve_symbol("km", &registry, &strict).is_ok());
    }
}
