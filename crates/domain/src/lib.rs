//! Domain layer for the checkout system.
//!
//! This crate holds the value objects that flow through a single order
//! placement:
//! - Cart and order items, and the order total they add up to
//! - Shipping address and credit card details
//! - Catalog products
//! - The place-order request and the immutable order result

pub mod error;
pub mod order;
pub mod product;

pub use error::DomainError;
pub use order::{
    Address, CartItem, CreditCardInfo, OrderItem, OrderResult, PlaceOrderRequest, ProductId,
    order_total,
};
pub use product::Product;
