//! Order fulfillment workflow.
//!
//! `OrderProcessor` runs one order through a fixed pipeline:
//!
//! ```text
//! check stock (per line, in order)
//!   ↓
//! authorize payment (pre-authorization for VIPs)
//!   ↓
//! reserve stock (whole line list, one call)
//!   ↓
//! schedule shipment (priority for VIPs and large orders)
//! ```
//!
//! The pipeline stops at the first failure. Inventory, payment and shipping are
//! reached only through the port traits in [`ports`].

pub mod error;
pub mod outcome;
pub mod policy;
pub mod ports;
pub mod processor;
pub mod stage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::FulfillmentError;
pub use outcome::OrderOutcome;
pub use policy::{DEFAULT_PRIORITY_THRESHOLD, DEFAULT_VIP_PREAUTH_AMOUNT, FulfillmentPolicy};
pub use ports::{CollaboratorError, PaymentAuthorizer, ShipmentScheduler, StockChecker};
pub use processor::OrderProcessor;
pub use stage::FulfillmentStage;
