//! Equality and commensurability between two terms

use serde::Serialize;

use crate::canon::{compare, Canonicalizer, Comparison};
use crate::types::{CanonicalTerm, Dimensions, Term};

/// How two unit terms relate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum Relation {
    /// Equal as written (`strict`) or after canonicalization (`after_processing`)
    Equal { strict: bool, after_processing: bool },
    Commensurable,
    /// Base dimensions differ by `diff`
    NotCommensurable { diff: Dimensions },
    /// One of the terms could not be canonicalized
    Failure,
}

pub fn check_relation(canonicalizer: &Canonicalizer<'_>, left: &Term, right: &Term) -> Relation {
    let (Ok(a), Ok(b)) = (canonicalizer.canonical_step(left), canonicalizer.canonical_step(right)) else {
        return Relation::Failure;
    };

    let strict = left == right;
    let after_processing = a.term == b.term;
    if strict || after_processing {
        return Relation::Equal {
            strict,
            after_processing,
        };
    }
    dimension_relation(&a.term, &b.term)
}

/// Dimension comparison only. Terms that fail to canonicalize are not
/// commensurable with anything.
pub fn check_commensurable(canonicalizer: &Canonicalizer<'_>, left: &Term, right: &Term) -> Relation {
    match (canonicalizer.canonical_step(left), canonicalizer.canonical_step(right)) {
        (Ok(a), Ok(b)) => dimension_relation(&a.term, &b.term),
        _ => Relation::NotCommensurable {
            diff: Dimensions::new(),
        },
    }
}

fn dimension_relation(left: &CanonicalTerm, right: &CanonicalTerm) -> Relation {
    match compare(left, right) {
        Comparison::Equal => Relation::Commensurable,
        Comparison::Differs(diff) => Relation::NotCommensurable { diff },
    }
}
