//! Checkout step names.
//!
//! Used as the `step` field in logs and metric labels, and reported by
//! [`CheckoutError::step`](crate::CheckoutError::step).

/// The workflow identifier for order placement.
pub const CHECKOUT_FLOW: &str = "PlaceOrder";

/// Step name: Reject malformed requests before any collaborator call.
pub const STEP_VALIDATE_REQUEST: &str = "validate_request";

/// Step name: Read the user's cart.
pub const STEP_FETCH_CART: &str = "fetch_cart";

/// Step name: Look up and localize each item price.
pub const STEP_PRICE_ITEMS: &str = "price_items";

/// Step name: Quote and localize shipping.
pub const STEP_QUOTE_SHIPPING: &str = "quote_shipping";

/// Step name: Add shipping and line totals.
pub const STEP_COMPUTE_TOTAL: &str = "compute_total";

/// Step name: Charge the card.
pub const STEP_CHARGE_PAYMENT: &str = "charge_payment";

/// Step name: Ship the order.
pub const STEP_SHIP_ORDER: &str = "ship_order";

/// Step name: Clear the cart (best-effort).
pub const STEP_EMPTY_CART: &str = "empty_cart";

/// Step name: Send the confirmation email (best-effort).
pub const STEP_SEND_CONFIRMATION: &str = "send_confirmation";
