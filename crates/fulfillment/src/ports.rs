//! Collaborator ports consumed by the fulfillment pipeline.
//!
//! Each port is a leaf capability. Implementations may sit on a database, a
//! payment gateway or a message queue; the pipeline only sees these calls. Calls
//! are synchronous from the caller's point of view, and any timeout is the
//! implementation's business (report it as [`CollaboratorError::Timeout`]).

use std::sync::Arc;

use thiserror::Error;

use orderflow_core::{Money, OrderId, Sku};
use orderflow_orders::LineItem;

/// Failure raised by a collaborator.
///
/// The pipeline never inspects or rewrites these; they reach the caller as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// Backend could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the request (e.g. a reservation it cannot honour).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Backend did not answer within its own deadline.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Anything else (poisoned state, corrupt data, bugs).
    #[error("internal error: {0}")]
    Internal(String),
}

impl CollaboratorError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Inventory capability.
pub trait StockChecker {
    /// Whether `quantity` units of `sku` are available. Must not change stock.
    fn check_stock(&self, sku: &Sku, quantity: u32) -> Result<bool, CollaboratorError>;

    /// Commit stock for the whole item list in one call.
    ///
    /// The pipeline treats this as all-or-nothing and never compensates.
    fn reserve_stock(&self, items: &[LineItem]) -> Result<(), CollaboratorError>;
}

/// Payment capability.
pub trait PaymentAuthorizer {
    /// Authorize (charge or hold) `amount` for the customer identified by `email`.
    ///
    /// `Ok(false)` is a decline, not an error.
    fn authorize(&self, amount: Money, email: &str) -> Result<bool, CollaboratorError>;
}

/// Shipping capability.
pub trait ShipmentScheduler {
    /// Book delivery for a confirmed order, expedited when `priority` is set.
    fn schedule_delivery(
        &self,
        order_id: &OrderId,
        priority: bool,
    ) -> Result<(), CollaboratorError>;
}

impl<T> StockChecker for &T
where
    T: StockChecker + ?Sized,
{
    fn check_stock(&self, sku: &Sku, quantity: u32) -> Result<bool, CollaboratorError> {
        (**self).check_stock(sku, quantity)
    }

    fn reserve_stock(&self, items: &[LineItem]) -> Result<(), CollaboratorError> {
        (**self).reserve_stock(items)
    }
}

impl<T> StockChecker for Arc<T>
where
    T: StockChecker + ?Sized,
{
    fn check_stock(&self, sku: &Sku, quantity: u32) -> Result<bool, CollaboratorError> {
        (**self).check_stock(sku, quantity)
    }

    fn reserve_stock(&self, items: &[LineItem]) -> Result<(), CollaboratorError> {
        (**self).reserve_stock(items)
    }
}

impl<T> PaymentAuthorizer for &T
where
    T: PaymentAuthorizer + ?Sized,
{
    fn authorize(&self, amount: Money, email: &str) -> Result<bool, CollaboratorError> {
        (**self).authorize(amount, email)
    }
}

impl<T> PaymentAuthorizer for Arc<T>
where
    T: PaymentAuthorizer + ?Sized,
{
    fn authorize(&self, amount: Money, email: &str) -> Result<bool, CollaboratorError> {
        (**self).authorize(amount, email)
    }
}

impl<T> ShipmentScheduler for &T
where
    T: ShipmentScheduler + ?Sized,
{
    fn schedule_delivery(
        &self,
        order_id: &OrderId,
        priority: bool,
    ) -> Result<(), CollaboratorError> {
        (**self).schedule_delivery(order_id, priority)
    }
}

impl<T> ShipmentScheduler for Arc<T>
where
    T: ShipmentScheduler + ?Sized,
{
    fn schedule_delivery(
        &self,
        order_id: &OrderId,
        priority: bool,
    ) -> Result<(), CollaboratorError> {
        (**self).schedule_delivery(order_id, priority)
    }
}
