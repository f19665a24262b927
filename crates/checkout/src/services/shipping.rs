//! Shipping service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Address, CartItem};
use money::Money;
use rand::Rng;

use super::{ServiceError, read, write};

/// Default flat shipping rate in USD.
pub const DEFAULT_FLAT_RATE_USD: f64 = 8.99;

/// Result of a successful shipment.
#[derive(Debug, Clone)]
pub struct ShipmentResult {
    /// The tracking id assigned by the shipping service.
    pub tracking_id: String,
}

/// Trait for shipping operations.
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Quotes the cost of shipping `items` to `address`, in USD.
    async fn get_quote(&self, address: &Address, items: &[CartItem])
    -> Result<Money, ServiceError>;

    /// Ships `items` to `address`.
    async fn ship_order(
        &self,
        address: &Address,
        items: &[CartItem],
    ) -> Result<ShipmentResult, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryShippingState {
    shipments: HashMap<String, (Address, Vec<CartItem>)>,
    quotes: usize,
    ship_calls: usize,
    fail_on_quote: bool,
    fail_on_ship: bool,
}

/// In-memory shipping service charging a flat USD rate per order.
#[derive(Debug, Clone)]
pub struct InMemoryShippingService {
    rate: Money,
    state: Arc<RwLock<InMemoryShippingState>>,
}

impl Default for InMemoryShippingService {
    fn default() -> Self {
        Self::with_flat_rate(DEFAULT_FLAT_RATE_USD)
    }
}

impl InMemoryShippingService {
    /// Creates a shipping service with the default flat rate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shipping service quoting `rate_usd` for every order.
    pub fn with_flat_rate(rate_usd: f64) -> Self {
        Self {
            rate: Money::with_carry("USD", rate_usd, 0.0),
            state: Arc::default(),
        }
    }

    /// Configures the service to fail on get_quote calls.
    pub fn set_fail_on_quote(&self, fail: bool) {
        write(&self.state).fail_on_quote = fail;
    }

    /// Configures the service to fail on ship_order calls.
    pub fn set_fail_on_ship(&self, fail: bool) {
        write(&self.state).fail_on_ship = fail;
    }

    /// Returns the number of shipments made.
    pub fn shipment_count(&self) -> usize {
        read(&self.state).shipments.len()
    }

    /// Returns true if a shipment exists with the given tracking id.
    pub fn has_shipment(&self, tracking_id: &str) -> bool {
        read(&self.state).shipments.contains_key(tracking_id)
    }

    /// Returns how many quotes were requested.
    pub fn quote_calls(&self) -> usize {
        read(&self.state).quotes
    }

    /// Returns how many times ship_order was called, successful or not.
    pub fn ship_calls(&self) -> usize {
        read(&self.state).ship_calls
    }
}

/// Builds a tracking id like `QZ-37123-181234567`.
///
/// The numeric groups embed the length of the address label (and half of
/// it) followed by random digits.
fn create_tracking_id(salt: &str) -> String {
    let mut rng = rand::rng();
    let letters: String = (0..2)
        .map(|_| char::from(b'A' + rng.random_range(0..26u8)))
        .collect();
    let short: String = (0..3)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    let long: String = (0..7)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();

    format!("{letters}-{}{short}-{}{long}", salt.len(), salt.len() / 2)
}

#[async_trait]
impl ShippingService for InMemoryShippingService {
    async fn get_quote(
        &self,
        address: &Address,
        items: &[CartItem],
    ) -> Result<Money, ServiceError> {
        let mut state = write(&self.state);
        state.quotes += 1;

        if state.fail_on_quote {
            return Err(ServiceError::Unavailable(
                "Shipping quotes unavailable".to_string(),
            ));
        }

        tracing::debug!(
            city = %address.city,
            items = items.len(),
            quote = %self.rate,
            "quoted shipping"
        );
        Ok(self.rate.clone())
    }

    async fn ship_order(
        &self,
        address: &Address,
        items: &[CartItem],
    ) -> Result<ShipmentResult, ServiceError> {
        let mut state = write(&self.state);
        state.ship_calls += 1;

        if state.fail_on_ship {
            return Err(ServiceError::Unavailable("Carrier unavailable".to_string()));
        }

        let tracking_id = create_tracking_id(&address.label());
        state
            .shipments
            .insert(tracking_id.clone(), (address.clone(), items.to_vec()));

        tracing::info!(%tracking_id, items = items.len(), "order shipped");
        Ok(ShipmentResult { tracking_id })
    }
}
