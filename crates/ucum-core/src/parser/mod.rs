//! UCUM expression parser using pest

mod ast;

pub use ast::resolve_symbol;

use pest::Parser;
use pest_derive::Parser;

use crate::error::ParseError;
use crate::registry::Registry;
use crate::types::Term;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct UcumParser;

/// Options that change what the parser accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept prefixes on units that are not flagged metric, e.g. `k[in_i]`
    pub allow_prefix_on_non_metric: bool,
}

impl ParseOptions {
    /// Accept everything the grammar allows
    pub fn permissive() -> Self {
        Self {
            allow_prefix_on_non_metric: true,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Parse a unit expression into a term.
///
/// This checks syntax and resolves every symbol against the registry. Rules
/// about annotation placement and special-unit usage are applied by
/// [`crate::validate`].
pub fn parse_term(
    input: &str,
    registry: &Registry,
    options: &ParseOptions,
) -> Result<Term, ParseError> {
    let pairs = UcumParser::parse(Rule::main_term, input)
        .map_err(|e| ParseError::Syntax(e.variant.message().into_owned()))?;
    ast::build_term(pairs, registry, options)
}
