use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use orderflow_core::Sku;
use orderflow_fulfillment::{CollaboratorError, StockChecker};
use orderflow_orders::LineItem;

/// Quantities held for one sku.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub on_hand: u64,
    pub reserved: u64,
}

/// In-memory inventory.
///
/// Reservations move quantity from `on_hand` to `reserved`. A reservation request is
/// validated as a whole before anything changes, so it either applies completely
/// or not at all.
#[derive(Debug, Default)]
pub struct InMemoryStockLedger {
    levels: RwLock<HashMap<Sku, StockLevel>>,
}

impl InMemoryStockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ledger from `(sku, on_hand)` pairs.
    pub fn with_stock(stock: impl IntoIterator<Item = (Sku, u64)>) -> Self {
        let levels = stock
            .into_iter()
            .map(|(sku, on_hand)| (sku, StockLevel { on_hand, reserved: 0 }))
            .collect();
        Self {
            levels: RwLock::new(levels),
        }
    }

    /// Add `quantity` units to the sku's on-hand count.
    ///
    /// Rejected when the sku's total units (on hand plus reserved) would overflow.
    pub fn restock(&self, sku: Sku, quantity: u64) -> Result<StockLevel, CollaboratorError> {
        let mut levels = self
            .levels
            .write()
            .map_err(|_| CollaboratorError::internal("stock ledger lock poisoned"))?;
        let current = levels.get(&sku).copied().unwrap_or_default();
        let fits = current
            .on_hand
            .checked_add(current.reserved)
            .and_then(|total| total.checked_add(quantity))
            .is_some();
        if !fits {
            return Err(CollaboratorError::rejected(format!(
                "restocking {quantity} units of {sku} overflows the ledger"
            )));
        }

        let level = levels.entry(sku).or_default();
        level.on_hand += quantity;
        Ok(*level)
    }

    pub fn level(&self, sku: &Sku) -> Result<StockLevel, CollaboratorError> {
        let levels = self
            .levels
            .read()
            .map_err(|_| CollaboratorError::internal("stock ledger lock poisoned"))?;
        Ok(levels.get(sku).copied().unwrap_or_default())
    }

    pub fn on_hand(&self, sku: &Sku) -> Result<u64, CollaboratorError> {
        Ok(self.level(sku)?.on_hand)
    }

    pub fn reserved(&self, sku: &Sku) -> Result<u64, CollaboratorError> {
        Ok(self.level(sku)?.reserved)
    }
}

impl StockChecker for InMemoryStockLedger {
    fn check_stock(&self, sku: &Sku, quantity: u32) -> Result<bool, CollaboratorError> {
        let on_hand = self.on_hand(sku)?;
        tracing::debug!(%sku, quantity, on_hand, "stock check");
        Ok(on_hand >= u64::from(quantity))
    }

    fn reserve_stock(&self, items: &[LineItem]) -> Result<(), CollaboratorError> {
        // Duplicate lines for one sku draw from the same pool.
        let mut requested: HashMap<&Sku, u64> = HashMap::new();
        for item in items {
            *requested.entry(item.sku()).or_default() += u64::from(item.quantity());
        }

        let mut levels = self
            .levels
            .write()
            .map_err(|_| CollaboratorError::internal("stock ledger lock poisoned"))?;

        let mut updates = Vec::with_capacity(requested.len());
        for (sku, quantity) in requested {
            let level = levels.get(sku).copied().unwrap_or_default();
            if level.on_hand < quantity {
                tracing::warn!(
                    %sku,
                    requested = quantity,
                    on_hand = level.on_hand,
                    "reservation rejected"
                );
                return Err(CollaboratorError::rejected(format!(
                    "insufficient stock for {sku}: requested {quantity}, on hand {}",
                    level.on_hand
                )));
            }
            let Some(reserved) = level.reserved.checked_add(quantity) else {
                return Err(CollaboratorError::rejected(format!(
                    "reserving {quantity} units of {sku} overflows the ledger"
                )));
            };
            updates.push((
                sku.clone(),
                StockLevel {
                    on_hand: level.on_hand - quantity,
                    reserved,
                },
            ));
        }

        levels.extend(updates);

        tracing::info!(lines = items.len(), "stock reserved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(value: &str) -> Sku {
        Sku::new(value).unwrap()
    }

    fn item(code: &str, quantity: u32) -> LineItem {
        LineItem::new(sku(code), quantity).unwrap()
    }

    #[test]
    fn check_compares_against_on_hand() {
        let ledger = InMemoryStockLedger::with_stock([(sku("SKU-1"), 5)]);

        assert!(ledger.check_stock(&sku("SKU-1"), 5).unwrap());
        assert!(!ledger.check_stock(&sku("SKU-1"), 6).unwrap());
        assert!(!ledger.check_stock(&sku("UNKNOWN"), 1).unwrap());
    }

    #[test]
    fn reservation_moves_stock_to_reserved() {
        let ledger = InMemoryStockLedger::with_stock([(sku("SKU-1"), 5), (sku("SKU-2"), 2)]);

        ledger
            .reserve_stock(&[item("SKU-1", 3), item("SKU-2", 2)])
            .unwrap();

        assert_eq!(
            ledger.level(&sku("SKU-1")).unwrap(),
            StockLevel {
                on_hand: 2,
                reserved: 3
            }
        );
        assert_eq!(ledger.on_hand(&sku("SKU-2")).unwrap(), 0);
    }

    #[test]
    fn reservation_is_all_or_nothing() {
        let ledger = InMemoryStockLedger::with_stock([(sku("SKU-1"), 5), (sku("SKU-2"), 1)]);

        let err = ledger
            .reserve_stock(&[item("SKU-1", 3), item("SKU-2", 2)])
            .unwrap_err();

        match err {
            CollaboratorError::Rejected(msg) if msg.contains("SKU-2") => {}
            _ => panic!("Expected Rejected naming SKU-2"),
        }
        assert_eq!(ledger.on_hand(&sku("SKU-1")).unwrap(), 5);
        assert_eq!(ledger.reserved(&sku("SKU-1")).unwrap(), 0);
    }

    #[test]
    fn duplicate_lines_are_summed() {
        let ledger = InMemoryStockLedger::with_stock([(sku("SKU-1"), 3)]);

        // Each line passes on its own; together they exceed stock.
        assert!(ledger.check_stock(&sku("SKU-1"), 2).unwrap());
        assert!(
            ledger
                .reserve_stock(&[item("SKU-1", 2), item("SKU-1", 2)])
                .is_err()
        );
    }

    #[test]
    fn restock_overflow_is_rejected_without_losing_units() {
        let ledger = InMemoryStockLedger::with_stock([(sku("SKU-1"), u64::MAX)]);
        ledger.reserve_stock(&[item("SKU-1", 5)]).unwrap();

        // Reserved units count toward the limit: on hand + reserved is already MAX.
        let err = ledger.restock(sku("SKU-1"), 1).unwrap_err();

        assert!(matches!(err, CollaboratorError::Rejected(_)));
        assert_eq!(
            ledger.level(&sku("SKU-1")).unwrap(),
            StockLevel {
                on_hand: u64::MAX - 5,
                reserved: 5
            }
        );
    }

    #[test]
    fn restock_accumulates() {
        let ledger = InMemoryStockLedger::new();
        ledger.restock(sku("SKU-1"), 2).unwrap();
        let level = ledger.restock(sku("SKU-1"), 3).unwrap();
        assert_eq!(level.on_hand, 5);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reservations_conserve_units(
                stock in prop::collection::vec(0u64..20, 3),
                lines in prop::collection::vec((0usize..3, 1u32..8), 0..6),
            ) {
                let skus = [sku("A"), sku("B"), sku("C")];
                let ledger = InMemoryStockLedger::with_stock(
                    skus.iter().cloned().zip(stock.iter().copied()),
                );
                let items: Vec<LineItem> = lines
                    .iter()
                    .map(|(i, q)| LineItem::new(skus[*i].clone(), *q).unwrap())
                    .collect();

                let result = ledger.reserve_stock(&items);

                for (s, initial) in skus.iter().zip(&stock) {
                    let level = ledger.level(s).unwrap();
                    prop_assert_eq!(level.on_hand + level.reserved, *initial);
                    if result.is_err() {
                        prop_assert_eq!(level.reserved, 0);
                    }
                }
            }
        }
    }
}
