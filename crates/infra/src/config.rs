//! Configuration loading.
//!
//! Reads the fulfillment policy from environment variables. Unset variables keep
//! the default; unparseable ones are logged and also keep the default.

use serde::Deserialize;

use orderflow_core::Money;
use orderflow_fulfillment::FulfillmentPolicy;

pub const VIP_PREAUTH_AMOUNT_VAR: &str = "ORDERFLOW_VIP_PREAUTH_AMOUNT";
pub const PRIORITY_THRESHOLD_VAR: &str = "ORDERFLOW_PRIORITY_THRESHOLD";

/// Fulfillment settings.
///
/// Amounts are decimal strings in the environment (`"100.00"`) and minor units
/// when deserialized from structured config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FulfillmentConfig {
    pub policy: FulfillmentPolicy,
}

impl FulfillmentConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FulfillmentConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = FulfillmentPolicy::default();
        let policy = FulfillmentPolicy {
            vip_preauth_amount: money_var(
                &lookup,
                VIP_PREAUTH_AMOUNT_VAR,
                defaults.vip_preauth_amount,
            ),
            priority_threshold: money_var(
                &lookup,
                PRIORITY_THRESHOLD_VAR,
                defaults.priority_threshold,
            ),
        };
        Self { policy }
    }
}

fn money_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Money) -> Money {
    match lookup(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            tracing::warn!("{key} is not a valid amount ({err}); using default {default}");
            default
        }),
    }
}
