//! Pipeline stages, used to label log records and terminal states.

use serde::{Deserialize, Serialize};

/// Where an order is in the fulfillment pipeline.
///
/// ```text
/// Start → CheckingStock ─┬─→ StockUnavailable
///                        └─→ AuthorizingPayment ─┬─→ PaymentDeclined
///                                                └─→ ReservingStock ─┬─→ ReservationFailed
///                                                                    └─→ SchedulingShipment → Confirmed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStage {
    Start,
    CheckingStock,
    StockUnavailable,
    AuthorizingPayment,
    PaymentDeclined,
    ReservingStock,
    ReservationFailed,
    SchedulingShipment,
    Confirmed,
}

impl FulfillmentStage {
    pub fn as_str(self) -> &'static str {
        match self {
            FulfillmentStage::Start => "start",
            FulfillmentStage::CheckingStock => "checking_stock",
            FulfillmentStage::StockUnavailable => "stock_unavailable",
            FulfillmentStage::AuthorizingPayment => "authorizing_payment",
            FulfillmentStage::PaymentDeclined => "payment_declined",
            FulfillmentStage::ReservingStock => "reserving_stock",
            FulfillmentStage::ReservationFailed => "reservation_failed",
            FulfillmentStage::SchedulingShipment => "scheduling_shipment",
            FulfillmentStage::Confirmed => "confirmed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FulfillmentStage::StockUnavailable
                | FulfillmentStage::PaymentDeclined
                | FulfillmentStage::ReservationFailed
                | FulfillmentStage::Confirmed
        )
    }

    /// The stage that follows this one when its step succeeds.
    pub fn next(self) -> Option<FulfillmentStage> {
        match self {
            FulfillmentStage::Start => Some(FulfillmentStage::CheckingStock),
            FulfillmentStage::CheckingStock => Some(FulfillmentStage::AuthorizingPayment),
            FulfillmentStage::AuthorizingPayment => Some(FulfillmentStage::ReservingStock),
            FulfillmentStage::ReservingStock => Some(FulfillmentStage::SchedulingShipment),
            FulfillmentStage::SchedulingShipment => Some(FulfillmentStage::Confirmed),
            _ => None,
        }
    }
}

impl core::fmt::Display for FulfillmentStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_walks_to_confirmed() {
        let mut stage = FulfillmentStage::Start;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            visited.push(stage);
        }

        assert_eq!(
            visited,
            vec![
                FulfillmentStage::Start,
                FulfillmentStage::CheckingStock,
                FulfillmentStage::AuthorizingPayment,
                FulfillmentStage::ReservingStock,
                FulfillmentStage::SchedulingShipment,
                FulfillmentStage::Confirmed,
            ]
        );
        assert!(stage.is_terminal());
    }

    #[test]
    fn failure_states_are_terminal() {
        for stage in [
            FulfillmentStage::StockUnavailable,
            FulfillmentStage::PaymentDeclined,
            FulfillmentStage::ReservationFailed,
        ] {
            assert!(stage.is_terminal());
            assert_eq!(stage.next(), None);
        }
    }
}
