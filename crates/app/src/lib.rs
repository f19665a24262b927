//! Command-line checkout runner.
//!
//! Wires the in-memory collaborators from JSON data files and places one
//! order described by a scenario file, with structured logging (tracing)
//! and Prometheus metrics.

pub mod config;
pub mod error;

use std::path::Path;

use checkout::{
    CheckoutOrchestrator, CurrencyTable, InMemoryCartService, InMemoryCatalogService,
    InMemoryCurrencyService, InMemoryEmailService, InMemoryPaymentService,
    InMemoryShippingService,
};
use common::UserId;
use domain::{CartItem, OrderResult, PlaceOrderRequest};
use serde::Deserialize;

pub use config::{Config, LogFormat};
pub use error::AppError;

/// Orchestrator over the in-memory collaborators.
pub type Orchestrator = CheckoutOrchestrator<
    InMemoryCartService,
    InMemoryCatalogService,
    InMemoryCurrencyService,
    InMemoryShippingService,
    InMemoryPaymentService,
    InMemoryEmailService,
>;

/// One order to place: the cart contents to seed and the request.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub cart: Vec<CartItem>,
    pub request: PlaceOrderRequest,
}

fn read_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the exchange-rate table.
pub fn load_currency_table(path: &Path) -> Result<CurrencyTable, AppError> {
    CurrencyTable::from_json(&read_file(path)?).map_err(|source| AppError::Data {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the product catalog.
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalogService, AppError> {
    InMemoryCatalogService::from_json(&read_file(path)?).map_err(|source| AppError::Data {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a scenario file.
pub fn load_scenario(path: &Path) -> Result<Scenario, AppError> {
    serde_json::from_str(&read_file(path)?).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The wired collaborators plus handles the runner inspects afterwards.
pub struct App {
    orchestrator: Orchestrator,
    cart: InMemoryCartService,
    email: InMemoryEmailService,
}

impl App {
    /// Builds the collaborators from the configured data files.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let table = load_currency_table(&config.currency_data)?;
        let catalog = load_catalog(&config.catalog_data)?;
        tracing::info!(
            currencies = table.supported_currencies().len(),
            products = catalog.list_products().len(),
            shipping_rate_usd = config.shipping_rate_usd,
            "collaborators loaded"
        );

        Ok(Self::new(
            catalog,
            table,
            InMemoryShippingService::with_flat_rate(config.shipping_rate_usd),
        ))
    }

    /// Wires the collaborators around an existing catalog and rate table.
    pub fn new(
        catalog: InMemoryCatalogService,
        table: CurrencyTable,
        shipping: InMemoryShippingService,
    ) -> Self {
        let cart = InMemoryCartService::new();
        let email = InMemoryEmailService::new();
        let orchestrator = CheckoutOrchestrator::new(
            cart.clone(),
            catalog,
            InMemoryCurrencyService::new(table),
            shipping,
            InMemoryPaymentService::new(),
            email.clone(),
        );

        Self {
            orchestrator,
            cart,
            email,
        }
    }

    /// Puts items into a user's cart.
    pub fn seed_cart(&self, user_id: &UserId, items: impl IntoIterator<Item = CartItem>) {
        for item in items {
            self.cart.add_item(user_id, item);
        }
    }

    /// Seeds the scenario's cart and places its order.
    pub async fn run_scenario(&self, scenario: Scenario) -> Result<OrderResult, AppError> {
        self.seed_cart(&scenario.request.user_id, scenario.cart);
        Ok(self.orchestrator.place_order(scenario.request).await?)
    }

    /// Returns the confirmation bodies sent so far.
    pub fn sent_confirmations(&self) -> Vec<String> {
        self.email.sent().into_iter().map(|sent| sent.body).collect()
    }
}
