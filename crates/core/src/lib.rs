//! `orderflow-core`: shared domain building blocks.
//!
//! Identifiers, money, and the domain error model. No IO, no collaborators.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, Sku};
pub use money::Money;
pub use value_object::ValueObject;
