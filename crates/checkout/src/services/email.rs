//! Email service trait and in-memory implementation.

use std::fmt::{self, Write};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::OrderResult;
use money::Money;

use super::{ServiceError, read, write};

/// Trait for sending order notifications.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends the order confirmation to `email`.
    async fn send_order_confirmation(
        &self,
        email: &str,
        order: &OrderResult,
    ) -> Result<(), ServiceError>;
}

/// Renders the plain-text confirmation body for an order.
pub fn render_confirmation(order: &OrderResult) -> Result<String, ServiceError> {
    let total = order.total_paid()?;
    let mut body = String::new();
    write_confirmation(&mut body, order, &total)
        .map_err(|e| ServiceError::InvalidData(e.to_string()))?;
    Ok(body)
}

fn write_confirmation(out: &mut impl Write, order: &OrderResult, total: &Money) -> fmt::Result {
    let address = order.shipping_address();

    writeln!(out, "Your order is complete!")?;
    writeln!(out)?;
    writeln!(out, "Order ID: {}", order.order_id())?;
    writeln!(out, "Tracking ID: {}", order.shipping_tracking_id())?;
    writeln!(
        out,
        "Shipping to: {}, {} {}",
        address.label(),
        address.zip_code,
        address.country
    )?;
    writeln!(out)?;
    for item in order.items() {
        writeln!(
            out,
            "  {} x{} @ {}",
            item.item.product_id, item.item.quantity, item.cost
        )?;
    }
    writeln!(out, "Shipping: {}", order.shipping_cost())?;
    writeln!(out, "Total paid: {total}")
}

/// Masks the mailbox part of an address for logging: `someone@example.com`
/// becomes `s***@example.com`.
pub fn redact_address(email: &str) -> String {
    match email.split_once('@') {
        Some((mailbox, domain)) => match mailbox.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

/// A confirmation the in-memory service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentConfirmation {
    pub email: String,
    pub order_id: OrderId,
    pub body: String,
}

#[derive(Debug, Default)]
struct InMemoryEmailState {
    sent: Vec<SentConfirmation>,
    send_calls: usize,
    fail_on_send: bool,
}

/// In-memory mailer that records confirmations instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmailService {
    state: Arc<RwLock<InMemoryEmailState>>,
}

impl InMemoryEmailService {
    /// Creates a new in-memory email service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on send calls.
    pub fn set_fail_on_send(&self, fail: bool) {
        write(&self.state).fail_on_send = fail;
    }

    /// Returns every confirmation sent so far.
    pub fn sent(&self) -> Vec<SentConfirmation> {
        read(&self.state).sent.clone()
    }

    /// Returns how many sends were attempted.
    pub fn send_calls(&self) -> usize {
        read(&self.state).send_calls
    }
}

#[async_trait]
impl EmailService for InMemoryEmailService {
    async fn send_order_confirmation(
        &self,
        email: &str,
        order: &OrderResult,
    ) -> Result<(), ServiceError> {
        let mut state = write(&self.state);
        state.send_calls += 1;

        if state.fail_on_send {
            return Err(ServiceError::Unavailable("Mail relay unavailable".to_string()));
        }

        let body = render_confirmation(order)?;
        tracing::debug!(recipient = %redact_address(email), order_id = %order.order_id(), "order confirmation rendered");
        state.sent.push(SentConfirmation {
            email: email.to_string(),
            order_id: order.order_id(),
            body,
        });
        Ok(())
    }
}
