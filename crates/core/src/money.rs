//! Monetary amounts.
//!
//! Amounts are counted in minor currency units (cents) so comparisons such as
//! "strictly above 100.00" are exact. Negative amounts are unrepresentable.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

const MINOR_PER_MAJOR: u64 = 100;

/// A non-negative amount in minor currency units.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Whole currency units (e.g. `from_major(100)` is 100.00). Saturates on overflow.
    pub const fn from_major(units: u64) -> Self {
        Self(units.saturating_mul(MINOR_PER_MAJOR))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// `None` when `other` exceeds `self`.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_MAJOR, self.0 % MINOR_PER_MAJOR)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses decimal strings such as `"100"`, `"100.5"` and `"100.01"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(DomainError::invalid_amount(format!("'{s}' is negative")));
        }

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if major.is_empty() || !all_digits(major) || !all_digits(minor) {
            return Err(DomainError::invalid_amount(format!("'{s}' is not a decimal amount")));
        }
        if minor.len() > 2 {
            return Err(DomainError::invalid_amount(format!(
                "'{s}' has more than two decimal places"
            )));
        }

        let overflow = || DomainError::invalid_amount(format!("'{s}' is too large"));
        let major: u64 = major.parse().map_err(|_| overflow())?;
        let minor: u64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<u64>().map_err(|_| overflow())? * 10,
            _ => minor.parse().map_err(|_| overflow())?,
        };

        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(minor))
            .map(Money)
            .ok_or_else(overflow)
    }
}
