//! The place-order request.

use common::UserId;
use serde::{Deserialize, Serialize};

use super::{Address, CreditCardInfo};
use crate::error::DomainError;

/// Everything the caller supplies to place one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Owner of the cart being checked out.
    pub user_id: UserId,

    /// ISO code prices and totals are localized to.
    pub user_currency: String,

    pub address: Address,

    /// Where the order confirmation is sent.
    pub email: String,

    pub credit_card: CreditCardInfo,
}

impl PlaceOrderRequest {
    /// Rejects requests that cannot be served before any collaborator is
    /// contacted.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.is_empty() {
            return Err(DomainError::MissingField("user_id"));
        }
        if self.user_currency.trim().is_empty() {
            return Err(DomainError::MissingField("user_currency"));
        }
        Ok(())
    }
}
