//! Business rules applied by the pipeline.

use serde::{Deserialize, Serialize};

use orderflow_core::Money;
use orderflow_orders::Order;

/// Amount authorized for VIP customers instead of the order total.
pub const DEFAULT_VIP_PREAUTH_AMOUNT: Money = Money::from_major(1);

/// Orders strictly above this total ship with priority.
pub const DEFAULT_PRIORITY_THRESHOLD: Money = Money::from_major(100);

/// Amount and shipping rules.
///
/// The VIP pre-authorization is a fixed probe amount, independent of the order
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentPolicy {
    pub vip_preauth_amount: Money,
    pub priority_threshold: Money,
}

impl Default for FulfillmentPolicy {
    fn default() -> Self {
        Self {
            vip_preauth_amount: DEFAULT_VIP_PREAUTH_AMOUNT,
            priority_threshold: DEFAULT_PRIORITY_THRESHOLD,
        }
    }
}

impl FulfillmentPolicy {
    /// What to ask the payment authorizer for.
    pub fn authorization_amount(&self, order: &Order) -> Money {
        if order.customer().is_vip() {
            self.vip_preauth_amount
        } else {
            order.total()
        }
    }

    /// VIP, or total strictly above the threshold. A total equal to the threshold
    /// ships standard.
    pub fn is_priority(&self, order: &Order) -> bool {
        order.customer().is_vip() || order.total() > self.priority_threshold
    }
}
