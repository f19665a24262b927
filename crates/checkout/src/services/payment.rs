//! Payment service trait, card validation, and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use domain::CreditCardInfo;
use money::Money;
use thiserror::Error;
use uuid::Uuid;

use super::{ServiceError, read, write};

/// Reasons a card is refused before any money moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    /// Malformed number, CVV out of range, or impossible expiry month.
    #[error("Invalid credit card")]
    InvalidCard,

    /// The card network is not one we accept.
    #[error("Credit card not accepted; only VISA or MasterCard are accepted")]
    UnacceptedCard,

    /// The card lapsed before today.
    #[error("Credit card expired")]
    ExpiredCard,
}

/// Accepted card networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardNetwork {
    Visa,
    MasterCard,
}

impl CardNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::MasterCard => "MasterCard",
        }
    }
}

impl std::fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a card as of `today`.
///
/// The number, hyphens stripped, must be at least four digits and start with
/// `4` (Visa) or `5` (MasterCard). The CVV must be within `100..=9999`. A card
/// lapses on the last day of the month before its printed expiration month,
/// so it is already refused during that month.
pub fn validate_card(card: &CreditCardInfo, today: NaiveDate) -> Result<CardNetwork, CardError> {
    let digits = card.digits();
    if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CardError::InvalidCard);
    }

    let network = match digits.as_bytes()[0] {
        b'4' => CardNetwork::Visa,
        b'5' => CardNetwork::MasterCard,
        _ => return Err(CardError::UnacceptedCard),
    };

    if !(100..=9999).contains(&card.cvv) {
        return Err(CardError::InvalidCard);
    }
    if !(1..=12).contains(&card.expiration_month) {
        return Err(CardError::InvalidCard);
    }

    let lapses_on = u32::try_from(card.expiration_month)
        .ok()
        .and_then(|month| NaiveDate::from_ymd_opt(card.expiration_year, month, 1))
        .and_then(|first| first.pred_opt())
        .ok_or(CardError::InvalidCard)?;
    if lapses_on <= today {
        return Err(CardError::ExpiredCard);
    }

    Ok(network)
}

/// Result of a successful charge.
#[derive(Debug, Clone)]
pub struct ChargeResult {
    /// The transaction id assigned by the payment processor.
    pub transaction_id: String,
}

/// Trait for payment processing.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Charges `amount` to the card.
    async fn charge(
        &self,
        amount: &Money,
        card: &CreditCardInfo,
    ) -> Result<ChargeResult, ServiceError>;
}

#[derive(Debug, Clone)]
struct Charge {
    amount: Money,
    network: CardNetwork,
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    charges: HashMap<String, Charge>,
    charge_calls: usize,
    fail_on_charge: bool,
    today: Option<NaiveDate>,
}

/// In-memory payment processor applying the card rules above.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentService {
    /// Creates a new in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the date card expiry is checked against.
    pub fn set_today(&self, today: NaiveDate) {
        write(&self.state).today = Some(today);
    }

    /// Configures the service to fail on charge calls regardless of the card.
    pub fn set_fail_on_charge(&self, fail: bool) {
        write(&self.state).fail_on_charge = fail;
    }

    /// Returns the number of successful charges.
    pub fn payment_count(&self) -> usize {
        read(&self.state).charges.len()
    }

    /// Returns how many times charge was called.
    pub fn charge_calls(&self) -> usize {
        read(&self.state).charge_calls
    }

    /// Returns the amount charged under a transaction id.
    pub fn charged_amount(&self, transaction_id: &str) -> Option<Money> {
        read(&self.state)
            .charges
            .get(transaction_id)
            .map(|charge| charge.amount.clone())
    }

    /// Returns every amount charged so far, in no particular order.
    pub fn charged_amounts(&self) -> Vec<Money> {
        read(&self.state)
            .charges
            .values()
            .map(|charge| charge.amount.clone())
            .collect()
    }

    /// Returns the network a transaction was charged on.
    pub fn charged_network(&self, transaction_id: &str) -> Option<CardNetwork> {
        read(&self.state)
            .charges
            .get(transaction_id)
            .map(|charge| charge.network)
    }
}

#[async_trait]
impl PaymentService for InMemoryPaymentService {
    async fn charge(
        &self,
        amount: &Money,
        card: &CreditCardInfo,
    ) -> Result<ChargeResult, ServiceError> {
        let mut state = write(&self.state);
        state.charge_calls += 1;

        if state.fail_on_charge {
            return Err(ServiceError::Unavailable("Payment declined".to_string()));
        }

        let today = state.today.unwrap_or_else(|| Utc::now().date_naive());
        let network = validate_card(card, today).inspect_err(|e| {
            tracing::warn!(last_four = %card.last_four(), error = %e, "card rejected");
        })?;

        let transaction_id = Uuid::new_v4().to_string();
        state.charges.insert(
            transaction_id.clone(),
            Charge {
                amount: amount.clone(),
                network,
            },
        );

        tracing::info!(
            %network,
            last_four = %card.last_four(),
            %amount,
            %transaction_id,
            "transaction processed"
        );
        Ok(ChargeResult { transaction_id })
    }
}
