//! Value objects for order placement.

use money::Money;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Product identifier (catalog SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A product line in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product identifier.
    pub product_id: ProductId,

    /// Quantity in the cart. Must be greater than zero.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart item.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Checks the quantity invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity == 0 {
            return Err(DomainError::InvalidQuantity {
                product_id: self.product_id.clone(),
                quantity: self.quantity,
            });
        }
        Ok(())
    }
}

/// A cart item priced in the user's currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The cart line this item was priced from.
    pub item: CartItem,

    /// Unit price, already converted to the order currency.
    pub cost: Money,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(item: CartItem, cost: Money) -> Self {
        Self { item, cost }
    }

    /// Returns unit cost multiplied by quantity.
    pub fn line_total(&self) -> Result<Money, DomainError> {
        Ok(self.cost.multiply_slow(self.item.quantity)?)
    }
}

/// Shipping address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: i32,
}

impl Address {
    /// Returns `"street, city, state"`, the part shipping labels are keyed on.
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.street_address, self.city, self.state)
    }
}

/// Payment card details supplied with an order.
///
/// The `Debug` impl masks the number and CVV so the card can appear in
/// tracing fields without leaking.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardInfo {
    pub number: String,
    pub cvv: i32,
    pub expiration_month: i32,
    pub expiration_year: i32,
}

impl CreditCardInfo {
    /// Creates new card details.
    pub fn new(
        number: impl Into<String>,
        cvv: i32,
        expiration_month: i32,
        expiration_year: i32,
    ) -> Self {
        Self {
            number: number.into(),
            cvv,
            expiration_month,
            expiration_year,
        }
    }

    /// Returns the card number without separator hyphens.
    pub fn digits(&self) -> String {
        self.number.replace('-', "")
    }

    /// Returns the last four digits, or fewer for short numbers.
    pub fn last_four(&self) -> String {
        let digits = self.digits();
        let start = digits.len().saturating_sub(4);
        digits.get(start..).unwrap_or_default().to_string()
    }
}

impl std::fmt::Debug for CreditCardInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCardInfo")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("cvv", &"***")
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_string_conversion() {
        let id = ProductId::new("OLJCESPC7Z");
        assert_eq!(id.as_str(), "OLJCESPC7Z");

        let id2: ProductId = "66VCHSJNUP".into();
        assert_eq!(id2.as_str(), "66VCHSJNUP");
    }

    #[test]
    fn test_cart_item_rejects_zero_quantity() {
        assert!(CartItem::new("SKU-001", 1).validate().is_ok());

        let err = CartItem::new("SKU-001", 0).validate().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidQuantity {
                product_id: ProductId::new("SKU-001"),
                quantity: 0
            }
        );
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem::new(CartItem::new("SKU-001", 3), Money::new("EUR", 19, 990_000_000));
        assert_eq!(item.line_total().unwrap(), Money::new("EUR", 59, 970_000_000));
    }

    #[test]
    fn test_address_label() {
        let address = Address {
            street_address: "1600 Amphitheatre Parkway".to_string(),
            city: "Mountain View".to_string(),
            state: "CA".to_string(),
            country: "United States".to_string(),
            zip_code: 94043,
        };
        assert_eq!(address.label(), "1600 Amphitheatre Parkway, Mountain View, CA");
    }

    #[test]
    fn test_card_digits_and_last_four() {
        let card = CreditCardInfo::new("4432-8015-6152-0454", 672, 1, 2039);
        assert_eq!(card.digits(), "4432801561520454");
        assert_eq!(card.last_four(), "0454");

        let short = CreditCardInfo::new("12", 123, 1, 2039);
        assert_eq!(short.last_four(), "12");
    }

    #[test]
    fn test_card_debug_masks_sensitive_fields() {
        let card = CreditCardInfo::new("4432-8015-6152-0454", 672, 1, 2039);
        let debug = format!("{card:?}");
        assert!(debug.contains("****0454"));
        assert!(!debug.contains("4432"));
        assert!(!debug.contains("672"));
    }

    #[test]
    fn test_cart_item_serialization() {
        let item = CartItem::new("SKU-001", 2);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"product_id":"SKU-001","quantity":2}"#);
        let deserialized: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
