//! Unit magnitudes as exact ratios
//!
//! Unit factors are multiplied and divided many times while a term is
//! reduced. Keeping numerator and denominator apart means the only inexact
//! division happens once, when a magnitude is applied to a value.

use std::fmt;

use crate::error::DecimalError;
use crate::types::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Magnitude {
    numerator: Decimal,
    denominator: Decimal,
}

impl Magnitude {
    pub fn one() -> Self {
        Self::from(Decimal::one())
    }

    pub fn numerator(&self) -> &Decimal {
        &self.numerator
    }

    pub fn denominator(&self) -> &Decimal {
        &self.denominator
    }

    /// Multiply by a single factor
    pub fn scale(&self, factor: &Decimal) -> Self {
        Self {
            numerator: &self.numerator * factor,
            denominator: self.denominator.clone(),
        }
    }

    pub fn mul(&self, rhs: &Magnitude) -> Self {
        Self {
            numerator: &self.numerator * &rhs.numerator,
            denominator: &self.denominator * &rhs.denominator,
        }
    }

    pub fn checked_div(&self, rhs: &Magnitude) -> Result<Self, DecimalError> {
        if rhs.numerator.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(Self {
            numerator: &self.numerator * &rhs.denominator,
            denominator: &self.denominator * &rhs.numerator,
        })
    }

    /// Raise to an integer power. A negative exponent swaps the terms.
    pub fn checked_pow(&self, exponent: i32) -> Result<Self, DecimalError> {
        if exponent < 0 && self.numerator.is_zero() {
            return Err(DecimalError::ZeroToNegativePower);
        }
        let (numerator, denominator) = if exponent < 0 {
            (&self.denominator, &self.numerator)
        } else {
            (&self.numerator, &self.denominator)
        };
        let power = exponent
            .checked_abs()
            .ok_or(DecimalError::ExponentOutOfRange(exponent))?;
        Ok(Self {
            numerator: numerator.checked_pow(power)?,
            denominator: denominator.checked_pow(power)?,
        })
    }

    /// `value * self`
    pub fn apply(&self, value: &Decimal) -> Result<Decimal, DecimalError> {
        (value * &self.numerator).checked_div(&self.denominator)
    }

    /// `value / self`
    pub fn apply_inverse(&self, value: &Decimal) -> Result<Decimal, DecimalError> {
        (value * &self.denominator).checked_div(&self.numerator)
    }

    /// Single decimal value of the ratio
    pub fn to_decimal(&self) -> Result<Decimal, DecimalError> {
        self.apply(&Decimal::one())
    }
}

impl From<Decimal> for Magnitude {
    fn from(numerator: Decimal) -> Self {
        Self {
            numerator,
            denominator: Decimal::one(),
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Ok(value) => write!(f, "{value}"),
            Err(_) => write!(f, "{}/{}", self.numerator, self.denominator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn m(value: u64) -> Magnitude {
        Magnitude::from(Decimal::from(value))
    }

    #[test]
    fn test_division_is_deferred() {
        // km/h
        let speed = m(1000).checked_div(&m(3600)).unwrap();
        assert_eq!(speed.numerator(), &Decimal::from(1000u64));
        assert_eq!(speed.denominator(), &Decimal::from(3600u64));
        assert_eq!(speed.apply(&Decimal::from(36u64)).unwrap().to_string(), "10");
        assert_eq!(speed.apply_inverse(&Decimal::from(10u64)).unwrap().to_string(), "36");
    }

    #[test]
    fn test_negative_power_swaps() {
        let squared = m(10).checked_div(&m(4)).unwrap().checked_pow(-2).unwrap();
        assert_eq!(squared.to_string(), "0.16");
    }

    #[test]
    fn test_zero_divisor() {
        assert_eq!(m(1).checked_div(&m(0)), Err(DecimalError::DivisionByZero));
        assert_eq!(m(0).checked_pow(-1), Err(DecimalError::ZeroToNegativePower));
    }
}
