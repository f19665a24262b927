//! The outcome of a successful order placement.

use common::OrderId;
use money::Money;
use serde::{Deserialize, Serialize};

use super::{Address, OrderItem};
use crate::error::DomainError;

/// Adds the shipping cost and every item's line total in `currency_code`.
///
/// Every term must be in `currency_code`; a mismatch surfaces as
/// [`DomainError::Money`].
pub fn order_total(
    currency_code: &str,
    shipping_cost: &Money,
    items: &[OrderItem],
) -> Result<Money, DomainError> {
    let mut total = Money::zero(currency_code).sum(shipping_cost)?;
    for item in items {
        total = total.sum(&item.line_total()?)?;
    }
    Ok(total)
}

/// A placed order. Built once when the checkout completes and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    order_id: OrderId,
    shipping_tracking_id: String,
    shipping_cost: Money,
    shipping_address: Address,
    items: Vec<OrderItem>,
}

impl OrderResult {
    /// Creates an order result.
    pub fn new(
        order_id: OrderId,
        shipping_tracking_id: impl Into<String>,
        shipping_cost: Money,
        shipping_address: Address,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            order_id,
            shipping_tracking_id: shipping_tracking_id.into(),
            shipping_cost,
            shipping_address,
            items,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn shipping_tracking_id(&self) -> &str {
        &self.shipping_tracking_id
    }

    /// Shipping cost in the order currency.
    pub fn shipping_cost(&self) -> &Money {
        &self.shipping_cost
    }

    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    /// Priced items, in cart order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the amount paid: shipping plus all line totals.
    pub fn total_paid(&self) -> Result<Money, DomainError> {
        order_total(self.shipping_cost.currency_code(), &self.shipping_cost, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::CartItem;

    fn usd(units: i64, nanos: i32) -> Money {
        Money::new("USD", units, nanos)
    }

    #[test]
    fn test_order_total() {
        let items = vec![
            OrderItem::new(CartItem::new("A", 2), usd(10, 0)),
            OrderItem::new(CartItem::new("B", 1), usd(0, 500_000_000)),
        ];
        let total = order_total("USD", &usd(8, 990_000_000), &items).unwrap();
        assert_eq!(total, usd(29, 490_000_000));
    }

    #[test]
    fn test_order_total_of_empty_order_is_shipping() {
        assert_eq!(
            order_total("USD", &usd(8, 990_000_000), &[]).unwrap(),
            usd(8, 990_000_000)
        );
    }

    #[test]
    fn test_order_total_rejects_mixed_currencies() {
        let items = vec![OrderItem::new(
            CartItem::new("A", 1),
            Money::new("EUR", 10, 0),
        )];
        let err = order_total("USD", &usd(8, 990_000_000), &items).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Money(money::MoneyError::MismatchingCurrency { .. })
        ));
    }

    #[test]
    fn test_result_accessors_and_total_paid() {
        let order_id = OrderId::new();
        let result = OrderResult::new(
            order_id,
            "AB-12345-6789",
            usd(8, 990_000_000),
            Address::default(),
            vec![OrderItem::new(CartItem::new("A", 2), usd(10, 0))],
        );

        assert_eq!(result.order_id(), order_id);
        assert_eq!(result.shipping_tracking_id(), "AB-12345-6789");
        assert_eq!(result.items().len(), 1);
        assert_eq!(result.total_paid().unwrap(), usd(28, 990_000_000));
    }

    #[test]
    fn test_result_serialization() {
        let result = OrderResult::new(
            OrderId::new(),
            "AB-1",
            usd(1, 0),
            Address::default(),
            vec![],
        );
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: OrderResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
