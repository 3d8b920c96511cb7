//! Order outcomes returned by the pipeline.

use serde::{Deserialize, Serialize};

use crate::stage::FulfillmentStage;

/// Successful end states of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderOutcome {
    /// Stock reserved and shipment scheduled.
    #[serde(rename = "ORDER_CONFIRMED")]
    Confirmed,
    /// Payment authorization returned a decline. Nothing was reserved or shipped.
    #[serde(rename = "PAYMENT_DECLINED")]
    PaymentDeclined,
}

impl OrderOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderOutcome::Confirmed => "ORDER_CONFIRMED",
            OrderOutcome::PaymentDeclined => "PAYMENT_DECLINED",
        }
    }

    pub fn terminal_stage(self) -> FulfillmentStage {
        match self {
            OrderOutcome::Confirmed => FulfillmentStage::Confirmed,
            OrderOutcome::PaymentDeclined => FulfillmentStage::PaymentDeclined,
        }
    }
}

impl core::fmt::Display for OrderOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
