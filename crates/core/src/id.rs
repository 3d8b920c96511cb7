//! Strongly-typed identifiers used across the domain.
//!
//! Order ids and skus are opaque strings supplied by callers. Both reject blank
//! input on construction and on deserialization.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an order (opaque, unique per order).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

/// Stock-keeping unit identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

macro_rules! impl_string_newtype {
    ($t:ident, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, " must not be blank")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $t {
            type Error = DomainError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_newtype!(OrderId, "OrderId");
impl_string_newtype!(Sku, "Sku");

impl OrderId {
    /// Generate a fresh order id.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing ids explicitly in tests for
    /// determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(matches!(Sku::new("   "), Err(DomainError::InvalidId(_))));
        assert!(matches!(OrderId::new(""), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn ids_display_their_raw_value() {
        let sku: Sku = "SKU-1".parse().unwrap();
        assert_eq!(sku.to_string(), "SKU-1");
        assert_eq!(sku.as_str(), "SKU-1");
    }

    #[test]
    fn generated_order_ids_are_distinct() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Sku = serde_json::from_str("\"SKU-9\"").unwrap();
        assert_eq!(ok.as_str(), "SKU-9");
        assert!(serde_json::from_str::<Sku>("\"\"").is_err());
    }
}
