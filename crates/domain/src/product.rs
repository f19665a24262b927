//! Catalog products.

use money::Money;
use serde::{Deserialize, Serialize};

use crate::order::ProductId;

/// A product as the catalog describes it. Prices are always in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub picture: String,
    pub price_usd: Money,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Product {
    /// Creates a product with just an id, name, and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price_usd: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            picture: String::new(),
            price_usd,
            categories: Vec::new(),
        }
    }
}
