//! The fulfillment pipeline.

use orderflow_orders::Order;

use crate::error::FulfillmentError;
use crate::outcome::OrderOutcome;
use crate::policy::FulfillmentPolicy;
use crate::ports::{CollaboratorError, PaymentAuthorizer, ShipmentScheduler, StockChecker};
use crate::stage::FulfillmentStage;

/// Runs orders through stock check, payment, reservation and shipping.
///
/// Holds only its collaborators and an immutable policy, so one processor can serve
/// any number of orders, from any number of threads when the collaborators allow
/// it. Collaborators can be owned values, `&T` or `Arc<T>`.
///
/// Nothing guards against the same order being submitted twice concurrently;
/// callers needing exactly-once must serialize submissions per order id.
#[derive(Debug, Clone)]
pub struct OrderProcessor<S, P, D> {
    stock: S,
    payments: P,
    shipping: D,
    policy: FulfillmentPolicy,
}

impl<S, P, D> OrderProcessor<S, P, D> {
    pub fn new(stock: S, payments: P, shipping: D) -> Self {
        Self::with_policy(stock, payments, shipping, FulfillmentPolicy::default())
    }

    pub fn with_policy(stock: S, payments: P, shipping: D, policy: FulfillmentPolicy) -> Self {
        Self {
            stock,
            payments,
            shipping,
            policy,
        }
    }

    pub fn policy(&self) -> &FulfillmentPolicy {
        &self.policy
    }
}

impl<S, P, D> OrderProcessor<S, P, D>
where
    S: StockChecker,
    P: PaymentAuthorizer,
    D: ShipmentScheduler,
{
    /// Process one order end to end.
    ///
    /// - `Ok(Confirmed)`: stock reserved and shipment scheduled.
    /// - `Ok(PaymentDeclined)`: authorization declined; nothing reserved or shipped.
    /// - `Err(StockUnavailable)`: a line failed its stock check; later lines were
    ///   not checked and no other collaborator was called.
    /// - `Err(Collaborator)`: a collaborator failed; its error is returned untouched
    ///   and every later step is skipped.
    pub fn process_order(&self, order: &Order) -> Result<OrderOutcome, FulfillmentError> {
        let order_id = order.id();

        // 1) Stock checks, in line order
        tracing::debug!(%order_id, stage = %FulfillmentStage::CheckingStock, "checking stock");
        for item in order.items() {
            let available = self
                .stock
                .check_stock(item.sku(), item.quantity())
                .map_err(|err| collaborator_failed(order, FulfillmentStage::CheckingStock, err))?;

            if !available {
                tracing::warn!(
                    %order_id,
                    sku = %item.sku(),
                    quantity = item.quantity(),
                    stage = %FulfillmentStage::StockUnavailable,
                    "product not available"
                );
                return Err(FulfillmentError::stock_unavailable(item.sku().clone()));
            }
        }

        // 2) Payment authorization
        let amount = self.policy.authorization_amount(order);
        tracing::debug!(
            %order_id,
            %amount,
            vip = order.customer().is_vip(),
            stage = %FulfillmentStage::AuthorizingPayment,
            "authorizing payment"
        );
        let authorized = self
            .payments
            .authorize(amount, order.customer().email())
            .map_err(|err| collaborator_failed(order, FulfillmentStage::AuthorizingPayment, err))?;

        if !authorized {
            tracing::info!(
                %order_id,
                %amount,
                stage = %FulfillmentStage::PaymentDeclined,
                "payment declined"
            );
            return Ok(OrderOutcome::PaymentDeclined);
        }

        // 3) Reservation (whole list, single call)
        tracing::debug!(
            %order_id,
            lines = order.items().len(),
            stage = %FulfillmentStage::ReservingStock,
            "reserving stock"
        );
        self.stock
            .reserve_stock(order.items())
            .map_err(|err| collaborator_failed(order, FulfillmentStage::ReservationFailed, err))?;

        // 4) Shipment
        let priority = self.policy.is_priority(order);
        tracing::debug!(
            %order_id,
            priority,
            stage = %FulfillmentStage::SchedulingShipment,
            "scheduling shipment"
        );
        self.shipping
            .schedule_delivery(order_id, priority)
            .map_err(|err| collaborator_failed(order, FulfillmentStage::SchedulingShipment, err))?;

        tracing::info!(
            %order_id,
            priority,
            stage = %FulfillmentStage::Confirmed,
            "order confirmed"
        );
        Ok(OrderOutcome::Confirmed)
    }
}

fn collaborator_failed(
    order: &Order,
    stage: FulfillmentStage,
    err: CollaboratorError,
) -> FulfillmentError {
    tracing::error!(order_id = %order.id(), %stage, error = %err, "collaborator failed");
    FulfillmentError::Collaborator(err)
}
