//! End-to-end tests: orders through the processor against the in-memory adapters.
//!
//! Verifies:
//! - Confirmed orders reserve stock, hold credit and book one shipment
//! - Declines and stock failures leave inventory and shipments untouched
//! - Adapter failures reach the caller unchanged

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use orderflow_core::{Money, OrderId, Sku};
    use orderflow_fulfillment::{
        CollaboratorError, FulfillmentError, OrderOutcome, OrderProcessor,
    };
    use orderflow_orders::{Customer, LineItem, Order};

    use crate::config::{FulfillmentConfig, PRIORITY_THRESHOLD_VAR};
    use crate::payments::CreditLimitAuthorizer;
    use crate::shipments::{InMemoryShipmentBook, ServiceLevel};
    use crate::stock_ledger::InMemoryStockLedger;

    const VIP_EMAIL: &str = "vip@example.com";
    const REGULAR_EMAIL: &str = "reg@example.com";

    struct Backends {
        stock: Arc<InMemoryStockLedger>,
        payments: Arc<CreditLimitAuthorizer>,
        shipments: Arc<InMemoryShipmentBook>,
    }

    type Processor = OrderProcessor<
        Arc<InMemoryStockLedger>,
        Arc<CreditLimitAuthorizer>,
        Arc<InMemoryShipmentBook>,
    >;

    fn sku(value: &str) -> Sku {
        Sku::new(value).unwrap()
    }

    fn item(code: &str, quantity: u32) -> LineItem {
        LineItem::new(sku(code), quantity).unwrap()
    }

    fn backends() -> anyhow::Result<Backends> {
        orderflow_observability::init();

        let stock = InMemoryStockLedger::with_stock([
            (sku("SKU-1"), 10),
            (sku("SKU-2"), 4),
            (sku("SKU-3"), 1),
        ]);
        let payments = CreditLimitAuthorizer::new();
        payments.set_limit(VIP_EMAIL, Money::from_major(5))?;
        payments.set_limit(REGULAR_EMAIL, Money::from_major(500))?;

        Ok(Backends {
            stock: Arc::new(stock),
            payments: Arc::new(payments),
            shipments: Arc::new(InMemoryShipmentBook::new()),
        })
    }

    fn processor(b: &Backends) -> Processor {
        OrderProcessor::new(
            Arc::clone(&b.stock),
            Arc::clone(&b.payments),
            Arc::clone(&b.shipments),
        )
    }

    fn new_order(id: &str, email: &str, vip: bool, total: Money, items: Vec<LineItem>) -> Order {
        Order::new(
            OrderId::new(id).unwrap(),
            Customer::new(email, vip).unwrap(),
            items,
            total,
        )
    }

    #[test]
    fn vip_order_holds_preauth_and_books_priority_shipment() -> anyhow::Result<()> {
        let b = backends()?;
        let order = new_order(
            "ord-vip",
            VIP_EMAIL,
            true,
            Money::from_major(50),
            vec![item("SKU-1", 2), item("SKU-2", 1)],
        );

        let outcome = processor(&b).process_order(&order)?;

        assert_eq!(outcome, OrderOutcome::Confirmed);
        assert_eq!(b.stock.reserved(&sku("SKU-1"))?, 2);
        assert_eq!(b.stock.on_hand(&sku("SKU-2"))?, 3);
        assert_eq!(b.payments.available(VIP_EMAIL)?, Some(Money::from_major(4)));
        let shipment = b.shipments.get(order.id())?.expect("shipment booked");
        assert_eq!(shipment.service_level, ServiceLevel::Priority);
        Ok(())
    }

    #[test]
    fn regular_order_at_threshold_books_standard_shipment() -> anyhow::Result<()> {
        let b = backends()?;
        let order = new_order(
            "ord-100",
            REGULAR_EMAIL,
            false,
            Money::from_major(100),
            vec![item("SKU-1", 1)],
        );

        processor(&b).process_order(&order)?;

        assert_eq!(
            b.payments.available(REGULAR_EMAIL)?,
            Some(Money::from_major(400))
        );
        let shipment = b.shipments.get(order.id())?.expect("shipment booked");
        assert_eq!(shipment.service_level, ServiceLevel::Standard);
        Ok(())
    }

    #[test]
    fn over_limit_is_declined_without_reserving() -> anyhow::Result<()> {
        let b = backends()?;
        let order = new_order(
            "ord-big",
            REGULAR_EMAIL,
            false,
            Money::from_major(501),
            vec![item("SKU-1", 1)],
        );

        let outcome = processor(&b).process_order(&order)?;

        assert_eq!(outcome, OrderOutcome::PaymentDeclined);
        assert_eq!(b.stock.reserved(&sku("SKU-1"))?, 0);
        assert!(b.shipments.is_empty()?);
        Ok(())
    }

    #[test]
    fn unknown_sku_fails_before_payment() -> anyhow::Result<()> {
        let b = backends()?;
        let order = new_order(
            "ord-missing",
            REGULAR_EMAIL,
            false,
            Money::from_major(10),
            vec![item("MISSING-SKU", 3), item("SKU-1", 1)],
        );

        let err = processor(&b).process_order(&order).unwrap_err();

        assert_eq!(err.unavailable_sku(), Some(&sku("MISSING-SKU")));
        assert_eq!(b.payments.authorizations()?.len(), 0);
        assert!(b.shipments.is_empty()?);
        Ok(())
    }

    #[test]
    fn reservation_rejection_reaches_caller_and_skips_shipping() -> anyhow::Result<()> {
        let b = backends()?;
        // Each line passes its own check; together they exceed the single SKU-3 unit.
        let order = new_order(
            "ord-dup",
            REGULAR_EMAIL,
            false,
            Money::from_major(20),
            vec![item("SKU-3", 1), item("SKU-3", 1)],
        );

        let err = processor(&b).process_order(&order).unwrap_err();

        match err {
            FulfillmentError::Collaborator(CollaboratorError::Rejected(msg)) => {
                assert!(msg.contains("SKU-3"));
            }
            other => panic!("Expected reservation rejection, got {other:?}"),
        }
        assert_eq!(b.stock.on_hand(&sku("SKU-3"))?, 1);
        assert!(b.shipments.is_empty()?);
        Ok(())
    }

    #[test]
    fn resubmitted_order_fails_at_shipping() -> anyhow::Result<()> {
        let b = backends()?;
        let processor = processor(&b);
        let order = new_order(
            "ord-twice",
            REGULAR_EMAIL,
            false,
            Money::from_major(10),
            vec![item("SKU-1", 1)],
        );

        assert_eq!(processor.process_order(&order)?, OrderOutcome::Confirmed);
        let err = processor.process_order(&order).unwrap_err();

        assert!(matches!(
            err.collaborator(),
            Some(CollaboratorError::Rejected(_))
        ));
        // No idempotency: the second run reserved again before shipping refused it.
        assert_eq!(b.stock.reserved(&sku("SKU-1"))?, 2);
        assert_eq!(b.shipments.len()?, 1);
        Ok(())
    }

    #[test]
    fn configured_threshold_changes_service_level() -> anyhow::Result<()> {
        let b = backends()?;
        let config = FulfillmentConfig::from_lookup(|key| {
            (key == PRIORITY_THRESHOLD_VAR).then(|| "25.00".to_string())
        });
        let processor = OrderProcessor::with_policy(
            Arc::clone(&b.stock),
            Arc::clone(&b.payments),
            Arc::clone(&b.shipments),
            config.policy,
        );
        let order = new_order(
            "ord-cfg",
            REGULAR_EMAIL,
            false,
            Money::from_cents(2_501),
            vec![item("SKU-1", 1)],
        );

        processor.process_order(&order)?;

        let shipment = b.shipments.get(order.id())?.expect("shipment booked");
        assert_eq!(shipment.service_level, ServiceLevel::Priority);
        Ok(())
    }

    #[test]
    fn concurrent_orders_share_backends() -> anyhow::Result<()> {
        let b = backends()?;
        let processor = processor(&b);

        std::thread::scope(|scope| {
            for n in 0..4 {
                let processor = &processor;
                scope.spawn(move || {
                    let order = new_order(
                        &format!("ord-par-{n}"),
                        REGULAR_EMAIL,
                        false,
                        Money::from_major(10),
                        vec![item("SKU-2", 1)],
                    );
                    assert_eq!(
                        processor.process_order(&order).unwrap(),
                        OrderOutcome::Confirmed
                    );
                });
            }
        });

        assert_eq!(b.stock.on_hand(&sku("SKU-2"))?, 0);
        assert_eq!(b.shipments.len()?, 4);
        Ok(())
    }
}
