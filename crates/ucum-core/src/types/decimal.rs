//! Precision-aware decimal numbers
//!
//! A [`Decimal`] is either exact (unlimited precision) or measured. A measured
//! value remembers how many significant digits and how many fractional digits
//! it was written with, and arithmetic carries that information forward:
//!
//! - `2.0 * 2.00` keeps 2 significant digits and prints as `4.0`
//! - `2.0 + 0.001` keeps 1 fractional digit and prints as `2.0`
//! - `2 + 0.001` is exact and prints as `2.001`
//!
//! A literal is measured when its fraction ends in a zero (`2.0`, `12.50`),
//! since the zero only states precision. Other literals are exact.
//! [`Decimal::measured`] treats every literal with a decimal point as
//! measured. Registry constants are always built with [`Decimal::exact`].

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use crate::error::DecimalError;

/// Significant digits kept when dividing two exact values
const EXACT_DIVISION_DIGITS: u64 = 20;

/// Largest exponent magnitude accepted by [`Decimal::checked_pow`]
pub const MAX_EXPONENT: u32 = 1024;

/// Measured precision of a limited value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Precision {
    /// Significant digits
    digits: u64,
    /// Digits right of the decimal point
    scale: i64,
}

/// Arbitrary-precision decimal that tracks measured precision
#[derive(Debug, Clone, PartialEq)]
pub struct Decimal {
    value: BigDecimal,
    precision: Option<Precision>,
}

impl Decimal {
    /// The exact value 1
    pub fn one() -> Self {
        Self::from(1u64)
    }

    /// The exact value 0
    pub fn zero() -> Self {
        Self::from(0u64)
    }

    /// Parse a value with unlimited precision, regardless of how it is written.
    pub fn exact(text: &str) -> Result<Self, DecimalError> {
        let value = BigDecimal::from_str(text.trim())
            .map_err(|_| DecimalError::InvalidLiteral(text.to_string()))?;
        Ok(Self::unlimited(value))
    }

    /// Parse a literal, measured whenever it has a decimal point
    pub fn measured(text: &str) -> Result<Self, DecimalError> {
        parse_literal(text, true)
    }

    /// Build a measured value from a float, rounded half-up to `scale`
    /// fractional digits. Used for the results of special-unit functions.
    pub fn from_f64_fixed_scale(value: f64, scale: u32) -> Result<Self, DecimalError> {
        if !value.is_finite() {
            return Err(DecimalError::NonFinite);
        }
        // f64's Display never uses exponent notation
        let parsed = BigDecimal::from_str(&value.to_string())
            .map_err(|_| DecimalError::InvalidLiteral(value.to_string()))?;
        let rounded = parsed.with_scale_round(i64::from(scale), RoundingMode::HalfUp);
        let text = plain_string(&rounded);
        let unsigned = text.trim_start_matches('-');
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let digits = literal_significant_digits(int_part, frac_part);
        Ok(Self::limited(rounded, digits, i64::from(scale)))
    }

    fn unlimited(value: BigDecimal) -> Self {
        Self {
            value: trim_trailing_zeros(&value),
            precision: None,
        }
    }

    fn limited(value: BigDecimal, digits: u64, scale: i64) -> Self {
        Self {
            value,
            precision: Some(Precision { digits, scale }),
        }
    }

    /// Underlying value
    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// True for measured values
    pub fn is_limited(&self) -> bool {
        self.precision.is_some()
    }

    /// Significant digits of a measured value
    pub fn precision(&self) -> Option<u64> {
        self.precision.map(|p| p.digits)
    }

    /// Fractional digits of a measured value
    pub fn scale(&self) -> Option<i64> {
        self.precision.map(|p| p.scale)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.value.to_f64()
    }

    /// Divide, failing on a zero divisor. Dividing a value by itself is exactly 1.
    /// A non-terminating exact quotient keeps 20 significant digits.
    pub fn checked_div(&self, rhs: &Decimal) -> Result<Decimal, DecimalError> {
        if rhs.value.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        if self == rhs {
            return Ok(Self::one());
        }
        let quotient = &self.value / &rhs.value;
        Ok(match effective_digits(self, rhs) {
            None if &quotient * &rhs.value == self.value => Self::unlimited(quotient),
            None => Self::unlimited(round_significant(&quotient, EXACT_DIVISION_DIGITS)),
            Some(digits) => {
                let rounded = round_significant(&quotient, digits);
                let scale = scale_of(&rounded);
                Self::limited(rounded, digits, scale)
            }
        })
    }

    /// Raise to an integer power. A negative exponent takes the reciprocal.
    /// Exponents beyond [`MAX_EXPONENT`] are rejected unless the base is 0 or 1.
    pub fn checked_pow(&self, exponent: i32) -> Result<Decimal, DecimalError> {
        if exponent == 0 {
            return Ok(Self::one());
        }
        if self.value.is_zero() && exponent < 0 {
            return Err(DecimalError::ZeroToNegativePower);
        }
        if self.precision.is_none() && (self.value.is_zero() || self.value == BigDecimal::from(1)) {
            return Ok(self.clone());
        }

        let magnitude = exponent.unsigned_abs();
        if magnitude > MAX_EXPONENT {
            return Err(DecimalError::ExponentOutOfRange(exponent));
        }
        let powered = integer_power(&self.value, magnitude);

        match self.precision {
            Some(precision) => {
                let digits = precision.digits * u64::from(magnitude);
                if exponent > 0 {
                    let rounded = round_significant(&powered, digits);
                    let scale = precision.scale * i64::from(exponent);
                    Ok(Self::limited(rounded, digits, scale))
                } else {
                    let reciprocal = round_significant(&(BigDecimal::from(1) / powered), digits);
                    let scale = scale_of(&reciprocal);
                    Ok(Self::limited(reciprocal, digits, scale))
                }
            }
            None if exponent > 0 => Ok(Self::unlimited(powered)),
            None => Ok(Self::unlimited(round_significant(
                &(BigDecimal::from(1) / powered),
                EXACT_DIVISION_DIGITS,
            ))),
        }
    }

    fn additive(&self, rhs: &Decimal, sum: BigDecimal) -> Decimal {
        let scale = match (self.precision, rhs.precision) {
            (Some(a), Some(b)) => Some(a.scale.min(b.scale)),
            (Some(a), None) => Some(a.scale),
            (None, Some(b)) => Some(b.scale),
            (None, None) => None,
        };
        match scale {
            Some(scale) => {
                let rounded = sum.with_scale_round(scale, RoundingMode::HalfUp);
                let digits = plain_digit_count(&rounded);
                Self::limited(rounded, digits, scale)
            }
            None => Self::unlimited(sum),
        }
    }
}

/// Literal parsing: a fraction ending in zero makes the value measured.
impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_literal(s, false)
    }
}

fn parse_literal(s: &str, measured: bool) -> Result<Decimal, DecimalError> {
    let text = s.trim();
    let value =
        BigDecimal::from_str(text).map_err(|_| DecimalError::InvalidLiteral(text.to_string()))?;

    let unsigned = text.trim_start_matches(|c| c == '+' || c == '-');
    let (coefficient, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
        Some(idx) => {
            let exponent = unsigned[idx + 1..]
                .parse::<i64>()
                .map_err(|_| DecimalError::InvalidLiteral(text.to_string()))?;
            (&unsigned[..idx], exponent)
        }
        None => (unsigned, 0),
    };

    let Some((int_part, frac_part)) = coefficient.split_once('.') else {
        return Ok(Decimal::unlimited(value));
    };
    if !measured && !frac_part.ends_with('0') {
        return Ok(Decimal::unlimited(value));
    }

    let scale = (frac_part.len() as i64).saturating_sub(exponent).max(0);
    let digits = literal_significant_digits(int_part, frac_part);
    Ok(Decimal::limited(value, digits, scale))
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::unlimited(BigDecimal::from(value))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::unlimited(BigDecimal::from(value))
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        self.additive(rhs, &self.value + &rhs.value)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        self.additive(rhs, &self.value - &rhs.value)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        let product = &self.value * &rhs.value;
        match effective_digits(self, rhs) {
            None => Decimal::unlimited(product),
            Some(digits) => {
                let rounded = round_significant(&product, digits);
                let scale = scale_of(&rounded);
                Decimal::limited(rounded, digits, scale)
            }
        }
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        &self + &rhs
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        &self - &rhs
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        &self * &rhs
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Some(precision) => {
                let shown = self
                    .value
                    .with_scale_round(precision.scale, RoundingMode::HalfUp);
                f.write_str(&plain_string(&shown))
            }
            None => f.write_str(&plain_string(&self.value)),
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Minimum precision of the operands, `None` when both are exact
fn effective_digits(a: &Decimal, b: &Decimal) -> Option<u64> {
    match (a.precision, b.precision) {
        (Some(x), Some(y)) => Some(x.digits.min(y.digits)),
        (Some(x), None) => Some(x.digits),
        (None, Some(y)) => Some(y.digits),
        (None, None) => None,
    }
}

/// Significant digits of a decimal literal. Leading zeros of a sub-1 value
/// don't count, an all-zero fraction counts as one digit.
fn literal_significant_digits(int_part: &str, frac_part: &str) -> u64 {
    let int_digits = int_part.trim_start_matches('0');
    if int_digits.is_empty() {
        let frac_digits = frac_part.trim_start_matches('0');
        frac_digits.len().max(1) as u64
    } else {
        (int_digits.len() + frac_part.len()) as u64
    }
}

fn scale_of(value: &BigDecimal) -> i64 {
    value.as_bigint_and_exponent().1
}

/// Round half-up to at most `digits` significant digits.
fn round_significant(value: &BigDecimal, digits: u64) -> BigDecimal {
    let mut rounded = value.clone();
    // a carry (9.99 -> 10.0) can add a digit, so re-check after rounding
    loop {
        let count = rounded.digits();
        if count <= digits {
            return rounded;
        }
        let excess = (count - digits) as i64;
        rounded = rounded.with_scale_round(scale_of(&rounded) - excess, RoundingMode::HalfUp);
    }
}

fn integer_power(base: &BigDecimal, exponent: u32) -> BigDecimal {
    let mut result = BigDecimal::from(1);
    let mut square = base.clone();
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = &result * &square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = &square * &square;
        }
    }
    result
}

/// Strip fractional trailing zeros without going to a negative scale.
fn trim_trailing_zeros(value: &BigDecimal) -> BigDecimal {
    if value.is_zero() {
        return BigDecimal::from(0);
    }
    let normalized = value.normalized();
    if scale_of(&normalized) < 0 {
        normalized.with_scale(0)
    } else {
        normalized
    }
}

/// Digit count of the plain representation, without sign and point
fn plain_digit_count(value: &BigDecimal) -> u64 {
    plain_string(value)
        .chars()
        .filter(char::is_ascii_digit)
        .count() as u64
}

/// Render without exponent notation, keeping the value's scale.
fn plain_string(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let raw = unscaled.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    if scale <= 0 {
        if digits == "0" {
            return "0".to_string();
        }
        return format!("{sign}{digits}{}", "0".repeat(scale.unsigned_abs() as usize));
    }

    let scale = scale as usize;
    if digits.len() > scale {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        format!("{sign}{int_part}.{frac_part}")
    } else {
        format!("{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
    }
}
