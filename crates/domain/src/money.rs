// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary amounts.
//!
//! Amounts are held as signed integer minor units (cents). All arithmetic
//! saturates instead of panicking, and parsing comes in a strict flavor for
//! validated input and a lenient flavor that maps malformed input to zero.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Number of minor units in one major currency unit.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// A monetary amount in minor units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(MINOR_UNITS_PER_MAJOR))
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parses a decimal amount such as `"1234.5"` or `"-0.75"`.
    ///
    /// At most two fractional digits are accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the input is not a decimal
    /// number with at most two fractional digits, or if it overflows.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidAmount {
            value: input.to_string(),
        };

        let trimmed: &str = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let minor: i64 = whole_value
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .and_then(|v| v.checked_add(fraction_value))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Parses an amount, coercing malformed input to zero.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        Self::parse(input).unwrap_or(Self::ZERO)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.0 < 0 { "-" } else { "" };
        let magnitude: u64 = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional_amounts() {
        assert_eq!(Money::parse("100").unwrap(), Money::from_minor(10_000));
        assert_eq!(Money::parse("99.99").unwrap(), Money::from_minor(9_999));
        assert_eq!(Money::parse("0.5").unwrap(), Money::from_minor(50));
        assert_eq!(Money::parse(".25").unwrap(), Money::from_minor(25));
        assert_eq!(Money::parse(" 12. ").unwrap(), Money::from_minor(1_200));
        assert_eq!(Money::parse("-4.05").unwrap(), Money::from_minor(-405));
        assert_eq!(Money::parse("+7").unwrap(), Money::from_minor(700));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", ".", "abc", "1.234", "1,000", "--1", "1e3", "12.3.4"] {
            assert!(Money::parse(input).is_err(), "expected '{input}' to fail");
        }
    }

    #[test]
    fn test_parse_lenient_coerces_to_zero() {
        assert_eq!(Money::parse_lenient("garbage"), Money::ZERO);
        assert_eq!(Money::parse_lenient(""), Money::ZERO);
        assert_eq!(Money::parse_lenient("12.50"), Money::from_minor(1_250));
    }

    #[test]
    fn test_display_formats_two_decimals() {
        assert_eq!(Money::from_minor(123_450).to_string(), "1234.50");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max: Money = Money::from_minor(i64::MAX);
        assert_eq!(max + Money::from_minor(1), max);
        assert_eq!(-Money::from_minor(i64::MIN), Money::from_minor(i64::MAX));
    }

    #[test]
    fn test_sum() {
        let amounts: Vec<Money> = vec![Money::from_major(1), Money::from_minor(50)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_minor(150));
    }
}
