//! Cart service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::UserId;
use domain::CartItem;

use super::{ServiceError, read, write};

/// Trait for reading and clearing a user's cart.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Returns the user's cart items in insertion order. An unknown user has
    /// an empty cart.
    async fn get_cart(&self, user_id: &UserId) -> Result<Vec<CartItem>, ServiceError>;

    /// Removes every item from the user's cart.
    async fn empty_cart(&self, user_id: &UserId) -> Result<(), ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    carts: HashMap<UserId, Vec<CartItem>>,
    get_calls: usize,
    empty_calls: usize,
    fail_on_get: bool,
    fail_on_empty: bool,
}

/// In-memory cart store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartService {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartService {
    /// Creates a new in-memory cart service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, merging quantities with an existing line for the same
    /// product. A merged quantity saturates at `u32::MAX`.
    pub fn add_item(&self, user_id: &UserId, item: CartItem) {
        let mut state = write(&self.state);
        let cart = state.carts.entry(user_id.clone()).or_default();
        match cart.iter_mut().find(|line| line.product_id == item.product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => cart.push(item),
        }
    }

    /// Configures the service to fail on get_cart calls.
    pub fn set_fail_on_get(&self, fail: bool) {
        write(&self.state).fail_on_get = fail;
    }

    /// Configures the service to fail on empty_cart calls.
    pub fn set_fail_on_empty(&self, fail: bool) {
        write(&self.state).fail_on_empty = fail;
    }

    /// Returns the current items for a user.
    pub fn items(&self, user_id: &UserId) -> Vec<CartItem> {
        read(&self.state)
            .carts
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns how many times get_cart was called.
    pub fn get_calls(&self) -> usize {
        read(&self.state).get_calls
    }

    /// Returns how many times empty_cart was called.
    pub fn empty_calls(&self) -> usize {
        read(&self.state).empty_calls
    }
}

#[async_trait]
impl CartService for InMemoryCartService {
    async fn get_cart(&self, user_id: &UserId) -> Result<Vec<CartItem>, ServiceError> {
        let mut state = write(&self.state);
        state.get_calls += 1;

        if state.fail_on_get {
            return Err(ServiceError::Unavailable("Cart store unreachable".to_string()));
        }

        Ok(state.carts.get(user_id).cloned().unwrap_or_default())
    }

    async fn empty_cart(&self, user_id: &UserId) -> Result<(), ServiceError> {
        let mut state = write(&self.state);
        state.empty_calls += 1;

        if state.fail_on_empty {
            return Err(ServiceError::Unavailable("Cart store unreachable".to_string()));
        }

        state.carts.remove(user_id);
        Ok(())
    }
}
