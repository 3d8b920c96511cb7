use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orderflow_core::OrderId;
use orderflow_fulfillment::{CollaboratorError, ShipmentScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLevel {
    Standard,
    Priority,
}

impl ServiceLevel {
    pub fn from_priority(priority: bool) -> Self {
        if priority {
            ServiceLevel::Priority
        } else {
            ServiceLevel::Standard
        }
    }
}

/// A booked delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub shipment_id: Uuid,
    pub order_id: OrderId,
    pub service_level: ServiceLevel,
    pub requested_at: DateTime<Utc>,
}

/// In-memory shipment book. One shipment per order.
#[derive(Debug, Default)]
pub struct InMemoryShipmentBook {
    shipments: RwLock<HashMap<OrderId, ShipmentRequest>>,
}

impl InMemoryShipmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, order_id: &OrderId) -> Result<Option<ShipmentRequest>, CollaboratorError> {
        let shipments = self
            .shipments
            .read()
            .map_err(|_| CollaboratorError::internal("shipment book lock poisoned"))?;
        Ok(shipments.get(order_id).cloned())
    }

    pub fn len(&self) -> Result<usize, CollaboratorError> {
        let shipments = self
            .shipments
            .read()
            .map_err(|_| CollaboratorError::internal("shipment book lock poisoned"))?;
        Ok(shipments.len())
    }

    pub fn is_empty(&self) -> Result<bool, CollaboratorError> {
        Ok(self.len()? == 0)
    }
}

impl ShipmentScheduler for InMemoryShipmentBook {
    fn schedule_delivery(
        &self,
        order_id: &OrderId,
        priority: bool,
    ) -> Result<(), CollaboratorError> {
        let mut shipments = self
            .shipments
            .write()
            .map_err(|_| CollaboratorError::internal("shipment book lock poisoned"))?;

        if shipments.contains_key(order_id) {
            return Err(CollaboratorError::rejected(format!(
                "shipment already scheduled for order {order_id}"
            )));
        }

        let request = ShipmentRequest {
            shipment_id: Uuid::now_v7(),
            order_id: order_id.clone(),
            service_level: ServiceLevel::from_priority(priority),
            requested_at: Utc::now(),
        };
        tracing::info!(
            %order_id,
            shipment_id = %request.shipment_id,
            service_level = ?request.service_level,
            "shipment scheduled"
        );
        shipments.insert(order_id.clone(), request);
        Ok(())
    }
}
