use serde::{Deserialize, Serialize};

use orderflow_core::{DomainError, DomainResult, Entity, Money, OrderId, Sku, ValueObject};

/// The buyer as seen by fulfillment.
///
/// The email is the correlation key handed to payment authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CustomerRecord")]
pub struct Customer {
    email: String,
    vip: bool,
}

impl Customer {
    pub fn new(email: impl Into<String>, vip: bool) -> DomainResult<Self> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(DomainError::validation("customer email must not be blank"));
        }
        Ok(Self { email, vip })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_vip(&self) -> bool {
        self.vip
    }
}

impl ValueObject for Customer {}

#[derive(Deserialize)]
struct CustomerRecord {
    email: String,
    vip: bool,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = DomainError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        Customer::new(record.email, record.vip)
    }
}

/// Order line: sku and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord")]
pub struct LineItem {
    sku: Sku,
    quantity: u32,
}

impl LineItem {
    pub fn new(sku: Sku, quantity: u32) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation(format!(
                "quantity for {sku} must be positive"
            )));
        }
        Ok(Self { sku, quantity })
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl ValueObject for LineItem {}

#[derive(Deserialize)]
struct LineItemRecord {
    sku: Sku,
    quantity: u32,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = DomainError;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        LineItem::new(record.sku, record.quantity)
    }
}

/// An order submitted for fulfillment.
///
/// Items keep the order the caller gave them in, duplicates included. The total is
/// taken as given; it is not recomputed from the lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: Customer,
    items: Vec<LineItem>,
    total: Money,
}

impl Order {
    pub fn new(id: OrderId, customer: Customer, items: Vec<LineItem>, total: Money) -> Self {
        Self {
            id,
            customer,
            items,
            total,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
