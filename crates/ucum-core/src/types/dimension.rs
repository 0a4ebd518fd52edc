//! The seven UCUM base dimensions and dimension vectors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A base dimension, identified in UCUM by a one-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Length,
    Time,
    Mass,
    PlaneAngle,
    Temperature,
    ElectricCharge,
    LuminousIntensity,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Length,
        Dimension::Time,
        Dimension::Mass,
        Dimension::PlaneAngle,
        Dimension::Temperature,
        Dimension::ElectricCharge,
        Dimension::LuminousIntensity,
    ];

    /// One-letter UCUM code
    pub fn code(self) -> char {
        match self {
            Dimension::Length => 'L',
            Dimension::Time => 'T',
            Dimension::Mass => 'M',
            Dimension::PlaneAngle => 'A',
            Dimension::Temperature => 'C',
            Dimension::ElectricCharge => 'Q',
            Dimension::LuminousIntensity => 'F',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.code() == code)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Dimension vector. Dimensions with exponent zero are never stored.
///
/// Term exponents are `i32`, so sums and differences of them are exact here.
pub type Dimensions = BTreeMap<Dimension, i64>;

/// Add `exponent` to one dimension of the vector
pub fn add_dimension(dims: &mut Dimensions, dim: Dimension, exponent: i64) {
    let total = dims.get(&dim).copied().unwrap_or(0).saturating_add(exponent);
    if total == 0 {
        dims.remove(&dim);
    } else {
        dims.insert(dim, total);
    }
}

/// Component-wise sum
pub fn merge_dimensions(a: &Dimensions, b: &Dimensions) -> Dimensions {
    let mut result = a.clone();
    for (&dim, &exponent) in b {
        add_dimension(&mut result, dim, exponent);
    }
    result
}

pub fn scale_dimensions(dims: &Dimensions, factor: i64) -> Dimensions {
    if factor == 0 {
        return Dimensions::new();
    }
    dims.iter()
        .map(|(&dim, &exp)| (dim, exp.saturating_mul(factor)))
        .collect()
}

/// `a - b`, zeros dropped
pub fn diff_dimensions(a: &Dimensions, b: &Dimensions) -> Dimensions {
    merge_dimensions(a, &scale_dimensions(b, -1))
}

/// UCUM-style rendering, e.g. `L.T-2`; `1` when dimensionless
pub fn format_dimensions(dims: &Dimensions) -> String {
    if dims.is_empty() {
        return "1".to_string();
    }
    dims.iter()
        .map(|(dim, &exp)| match exp {
            1 => dim.code().to_string(),
            _ => format!("{}{}", dim.code(), exp),
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(entries: &[(Dimension, i64)]) -> Dimensions {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_codes_round_trip() {
        for dim in Dimension::ALL {
            assert_eq!(Dimension::from_code(dim.code()), Some(dim));
        }
        assert_eq!(Dimension::from_code('X'), None);
    }

    #[test]
    fn test_merge_drops_zeros() {
        let velocity = dims(&[(Dimension::Length, 1), (Dimension::Time, -1)]);
        let time = dims(&[(Dimension::Time, 1)]);
        assert_eq!(merge_dimensions(&velocity, &time), dims(&[(Dimension::Length, 1)]));
    }

    #[test]
    fn test_diff() {
        let area = dims(&[(Dimension::Length, 2)]);
        let length = dims(&[(Dimension::Length, 1)]);
        assert_eq!(diff_dimensions(&area, &length), length);
        assert!(diff_dimensions(&area, &area).is_empty());
    }

    #[test]
    fn test_diff_of_extreme_exponents() {
        let a = dims(&[(Dimension::Length, i64::from(i32::MAX))]);
        let b = dims(&[(Dimension::Length, i64::from(i32::MIN))]);
        assert_eq!(
            diff_dimensions(&a, &b),
            dims(&[(Dimension::Length, i64::from(i32::MAX) * 2 + 1)])
        );
    }

    #[test]
    fn test_format() {
        let accel = dims(&[(Dimension::Length, 1), (Dimension::Time, -2)]);
        assert_eq!(format_dimensions(&accel), "L.T-2");
        assert_eq!(format_dimensions(&Dimensions::new()), "1");
    }
}
