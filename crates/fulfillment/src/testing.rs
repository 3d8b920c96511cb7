//! Recording collaborator doubles.
//!
//! All doubles built from the same [`CallJournal`] append to one ordered log, so a
//! test can assert the exact sequence of collaborator calls across ports.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use orderflow_core::{Money, OrderId, Sku};
use orderflow_orders::LineItem;

use crate::ports::{CollaboratorError, PaymentAuthorizer, ShipmentScheduler, StockChecker};

/// One collaborator call, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CheckStock { sku: Sku, quantity: u32 },
    Authorize { amount: Money, email: String },
    ReserveStock { items: Vec<LineItem> },
    ScheduleDelivery { order_id: OrderId, priority: bool },
}

/// Shared, ordered record of collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn stock_checks(&self) -> Vec<(Sku, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CheckStock { sku, quantity } => Some((sku, quantity)),
                _ => None,
            })
            .collect()
    }

    pub fn authorizations(&self) -> Vec<(Money, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Authorize { amount, email } => Some((amount, email)),
                _ => None,
            })
            .collect()
    }

    pub fn reservations(&self) -> Vec<Vec<LineItem>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ReserveStock { items } => Some(items),
                _ => None,
            })
            .collect()
    }

    pub fn deliveries(&self) -> Vec<(OrderId, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ScheduleDelivery { order_id, priority } => Some((order_id, priority)),
                _ => None,
            })
            .collect()
    }
}

/// Stock double: every sku is available unless marked otherwise.
#[derive(Debug, Clone)]
pub struct ScriptedStock {
    journal: CallJournal,
    unavailable: HashSet<Sku>,
    check_failure: Option<CollaboratorError>,
    reserve_failure: Option<CollaboratorError>,
}

impl ScriptedStock {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            unavailable: HashSet::new(),
            check_failure: None,
            reserve_failure: None,
        }
    }

    pub fn with_unavailable(mut self, sku: Sku) -> Self {
        self.unavailable.insert(sku);
        self
    }

    pub fn failing_checks(mut self, err: CollaboratorError) -> Self {
        self.check_failure = Some(err);
        self
    }

    pub fn failing_reservation(mut self, err: CollaboratorError) -> Self {
        self.reserve_failure = Some(err);
        self
    }
}

impl StockChecker for ScriptedStock {
    fn check_stock(&self, sku: &Sku, quantity: u32) -> Result<bool, CollaboratorError> {
        self.journal.record(Call::CheckStock {
            sku: sku.clone(),
            quantity,
        });
        if let Some(err) = &self.check_failure {
            return Err(err.clone());
        }
        Ok(!self.unavailable.contains(sku))
    }

    fn reserve_stock(&self, items: &[LineItem]) -> Result<(), CollaboratorError> {
        self.journal.record(Call::ReserveStock {
            items: items.to_vec(),
        });
        match &self.reserve_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Payment double with a fixed answer.
#[derive(Debug, Clone)]
pub struct ScriptedPayments {
    journal: CallJournal,
    answer: Result<bool, CollaboratorError>,
}

impl ScriptedPayments {
    pub fn approving(journal: CallJournal) -> Self {
        Self {
            journal,
            answer: Ok(true),
        }
    }

    pub fn declining(journal: CallJournal) -> Self {
        Self {
            journal,
            answer: Ok(false),
        }
    }

    pub fn failing(journal: CallJournal, err: CollaboratorError) -> Self {
        Self {
            journal,
            answer: Err(err),
        }
    }
}

impl PaymentAuthorizer for ScriptedPayments {
    fn authorize(&self, amount: Money, email: &str) -> Result<bool, CollaboratorError> {
        self.journal.record(Call::Authorize {
            amount,
            email: email.to_string(),
        });
        self.answer.clone()
    }
}

/// Shipping double: records the request, optionally fails.
#[derive(Debug, Clone)]
pub struct RecordingShipments {
    journal: CallJournal,
    failure: Option<CollaboratorError>,
}

impl RecordingShipments {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            failure: None,
        }
    }

    pub fn failing(journal: CallJournal, err: CollaboratorError) -> Self {
        Self {
            journal,
            failure: Some(err),
        }
    }
}

impl ShipmentScheduler for RecordingShipments {
    fn schedule_delivery(
        &self,
        order_id: &OrderId,
        priority: bool,
    ) -> Result<(), CollaboratorError> {
        self.journal.record(Call::ScheduleDelivery {
            order_id: order_id.clone(),
            priority,
        });
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
