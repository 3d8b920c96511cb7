use serde::{Deserialize, Serialize};

use orderflow_core::{DomainError, DomainResult, Money, ValueObject};

/// Whole-number percentage, 0 to 100.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    pub fn new(value: u8) -> DomainResult<Self> {
        if value > 100 {
            return Err(DomainError::validation(format!(
                "percentage {value} exceeds 100"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `base` reduced by this percentage, rounded half-up to the cent.
    pub fn take_off(self, base: Money) -> Money {
        let keep = u128::from(100 - self.0);
        let cents = (u128::from(base.cents()) * keep + 50) / 100;
        // keep <= 100, so the result never exceeds base
        Money::from_cents(cents as u64)
    }
}

impl ValueObject for Percent {}

impl TryFrom<u8> for Percent {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

/// Turns a base price and a customer profile into a final price.
pub trait DiscountPolicy {
    fn discount(&self, age: u32, student: bool) -> DomainResult<Percent>;

    fn final_price(&self, base: Money, age: u32, student: bool) -> DomainResult<Money> {
        Ok(self.discount(age, student)?.take_off(base))
    }
}

/// Flat rules: minors pay half, adult students get 10% off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardDiscounts;

impl DiscountPolicy for StandardDiscounts {
    fn discount(&self, age: u32, student: bool) -> DomainResult<Percent> {
        let pct = if age < 18 {
            50
        } else if student {
            10
        } else {
            0
        };
        Percent::new(pct)
    }
}

/// Tiered rules; the largest applicable discount wins.
///
/// | who | discount |
/// |---|---|
/// | under 10 | 100% |
/// | 10 to 17 | 50% |
/// | over 65 | 30% |
/// | student under 30 | 20% |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestDiscount {
    pub max_age: u32,
}

impl Default for BestDiscount {
    fn default() -> Self {
        Self { max_age: 130 }
    }
}

impl DiscountPolicy for BestDiscount {
    fn discount(&self, age: u32, student: bool) -> DomainResult<Percent> {
        if age > self.max_age {
            return Err(DomainError::validation(format!(
                "customer age {age} is above {}",
                self.max_age
            )));
        }

        let pct = match age {
            0..=9 => 100,
            10..=17 => 50,
            _ => {
                let senior = if age > 65 { 30 } else { 0 };
                let student = if student && age < 30 { 20 } else { 0 };
                senior.max(student)
            }
        };
        Percent::new(pct)
    }
}
