//! Orders domain module.
//!
//! The immutable order shape handed to fulfillment: who is buying, which skus in
//! which quantities, and the caller-supplied total. Construction validates; nothing
//! here mutates after that.

pub mod order;

pub use order::{Customer, LineItem, Order};
