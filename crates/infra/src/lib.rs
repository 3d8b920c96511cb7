//! Infrastructure layer: in-process collaborator implementations and configuration.
//!
//! Each adapter implements one fulfillment port over thread-safe in-memory state.
//! They are the production wiring for single-process deployments and the backends
//! used by the end-to-end tests.

pub mod config;
pub mod payments;
pub mod shipments;
pub mod stock_ledger;

mod integration_tests;

pub use config::FulfillmentConfig;
pub use payments::{Authorization, CreditLimitAuthorizer};
pub use shipments::{InMemoryShipmentBook, ServiceLevel, ShipmentRequest};
pub use stock_ledger::{InMemoryStockLedger, StockLevel};
