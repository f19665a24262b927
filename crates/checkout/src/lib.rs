//! Order placement for the storefront checkout.
//!
//! [`CheckoutOrchestrator`] turns a user's cart into a paid, shipped order by
//! coordinating six collaborators:
//! 1. Fetch the cart
//! 2. Price every item in the user's currency (concurrently)
//! 3. Quote shipping and localize the quote
//! 4. Compute the total and charge the card
//! 5. Ship the order
//! 6. Clear the cart and send a confirmation (best-effort)
//!
//! Any failure up to shipping aborts the order with a [`CheckoutError`]. A
//! charge is never refunded when shipping fails afterwards.

pub mod error;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod steps;

pub use error::{CheckoutError, Collaborator};
pub use orchestrator::CheckoutOrchestrator;
pub use services::{
    CardError, CardNetwork, CartService, CatalogService, ChargeResult, CurrencyService,
    CurrencyTable, EmailService, InMemoryCartService, InMemoryCatalogService,
    InMemoryCurrencyService, InMemoryEmailService, InMemoryPaymentService,
    InMemoryShippingService, PaymentService, SentConfirmation, ServiceError, ShipmentResult,
    ShippingService,
};
pub use state::CheckoutState;
