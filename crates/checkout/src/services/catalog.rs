//! Product catalog trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Product, ProductId};
use serde::Deserialize;

use super::{ServiceError, read, write};

/// Trait for product lookups.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns the product with its USD price.
    async fn get_product(&self, product_id: &ProductId) -> Result<Product, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, Product>,
    lookups: usize,
    fail_on_get: bool,
}

/// Read-only in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogService {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogService {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the given products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let service = Self::new();
        for product in products {
            service.add_product(product);
        }
        service
    }

    /// Parses a `{"products": [...]}` document.
    pub fn from_json(data: &str) -> Result<Self, ServiceError> {
        let document: CatalogDocument = serde_json::from_str(data)
            .map_err(|e| ServiceError::InvalidData(format!("catalog document: {e}")))?;
        Ok(Self::with_products(document.products))
    }

    /// Adds or replaces a product.
    pub fn add_product(&self, product: Product) {
        write(&self.state)
            .products
            .insert(product.id.clone(), product);
    }

    /// Returns all products sorted by id.
    pub fn list_products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = read(&self.state).products.values().cloned().collect();
        products.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        products
    }

    /// Configures the service to fail on get_product calls.
    pub fn set_fail_on_get(&self, fail: bool) {
        write(&self.state).fail_on_get = fail;
    }

    /// Returns how many lookups were served or attempted.
    pub fn lookups(&self) -> usize {
        read(&self.state).lookups
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    async fn get_product(&self, product_id: &ProductId) -> Result<Product, ServiceError> {
        let mut state = write(&self.state);
        state.lookups += 1;

        if state.fail_on_get {
            return Err(ServiceError::Unavailable("Catalog unreachable".to_string()));
        }

        state
            .products
            .get(product_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("product {product_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use money::Money;

    #[tokio::test]
    async fn test_get_product() {
        let service = InMemoryCatalogService::with_products([Product::new(
            "OLJCESPC7Z",
            "Sunglasses",
            Money::new("USD", 19, 990_000_000),
        )]);

        let product = service
            .get_product(&ProductId::new("OLJCESPC7Z"))
            .await
            .unwrap();
        assert_eq!(product.name, "Sunglasses");
        assert_eq!(service.lookups(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let service = InMemoryCatalogService::new();
        let err = service
            .get_product(&ProductId::new("MISSING"))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound("product MISSING".to_string()));
    }

    #[tokio::test]
    async fn test_fail_on_get() {
        let service = InMemoryCatalogService::with_products([Product::new(
            "A",
            "Thing",
            Money::from_units("USD", 1),
        )]);
        service.set_fail_on_get(true);
        assert!(matches!(
            service.get_product(&ProductId::new("A")).await,
            Err(ServiceError::Unavailable(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"products": [
            {"id": "B", "name": "Mug", "price_usd": {"currency_code": "USD", "units": 8, "nanos": 990000000}},
            {"id": "A", "name": "Tank Top", "price_usd": {"currency_code": "USD", "units": 18, "nanos": 990000000},
             "categories": ["clothing", "tops"]}
        ]}"#;
        let service = InMemoryCatalogService::from_json(json).unwrap();
        let products = service.list_products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_str(), "A");
        assert_eq!(products[0].categories, vec!["clothing", "tops"]);
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(matches!(
            InMemoryCatalogService::from_json("{\"items\": []}"),
            Err(ServiceError::InvalidData(_))
        ));
    }
}
