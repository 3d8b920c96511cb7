//! Customer price calculators.
//!
//! Pure functions from a base price and a customer profile to a final price. The
//! fulfillment pipeline never calls these; totals reach it already computed.

pub mod discount;

pub use discount::{BestDiscount, DiscountPolicy, Percent, StandardDiscounts};
