//! Unit conversion between commensurable terms

mod relation;

pub use relation::{check_commensurable, check_relation, Relation};

use crate::canon::{compare, Canonicalizer, Comparison, Direction};
use crate::error::ConversionError;
use crate::types::{Decimal, Term};

/// Converts values between unit terms
#[derive(Clone, Copy)]
pub struct Converter<'a> {
    canonicalizer: Canonicalizer<'a>,
}

impl<'a> Converter<'a> {
    pub fn new(canonicalizer: Canonicalizer<'a>) -> Self {
        Self { canonicalizer }
    }

    /// Convert `factor` units of `from` into units of `to`.
    ///
    /// `from` is canonicalized with the caller's factor, then `to` is
    /// canonicalized in reverse with the intermediate factor. The result is
    /// only returned if both canonical terms have the same dimensions.
    #[tracing::instrument(level = "trace", skip_all, fields(factor = %factor, from = %from, to = %to))]
    pub fn convert(&self, factor: &Decimal, from: &Term, to: &Term) -> Result<Decimal, ConversionError> {
        let source = self.canonicalizer.canonicalize(factor, from, Direction::From)?;
        let target = self
            .canonicalizer
            .canonicalize(&source.factor, to, Direction::To)?;

        match compare(&source.term, &target.term) {
            Comparison::Equal => Ok(target.factor),
            Comparison::Differs(diff) => {
                tracing::debug!(%from, %to, "base dimensions differ");
                Err(ConversionError::BaseDimensionMismatch(diff))
            }
        }
    }
}
