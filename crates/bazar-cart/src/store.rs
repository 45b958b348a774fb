//! In-memory cart store keyed by user id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A line item in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    /// Assigned by the store on insert; client-provided values are ignored.
    #[serde(default)]
    pub id: i64,
    pub product_code: String,
    pub product_name: String,
    pub price: f64,
    pub quantity: u32,
}

/// A user's cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub user_id: i64,
    pub items: Vec<CartItem>,
}

/// Thread-safe in-memory cart store. Carts are created lazily on first
/// access, mirroring get-or-create semantics.
#[derive(Clone)]
pub struct CartStore {
    carts: Arc<RwLock<HashMap<i64, Cart>>>,
    next_item_id: Arc<AtomicI64>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: Arc::new(RwLock::new(HashMap::new())),
            next_item_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Fetch the user's cart, creating an empty one if absent.
    pub fn get_or_create(&self, user_id: i64) -> Cart {
        self.carts
            .write()
            .entry(user_id)
            .or_insert_with(|| Cart {
                user_id,
                items: Vec::new(),
            })
            .clone()
    }

    /// Append an item to the user's cart, assigning it a fresh id.
    pub fn add_item(&self, user_id: i64, mut item: CartItem) -> Cart {
        item.id = self.next_item_id.fetch_add(1, Ordering::Relaxed);
        let mut guard = self.carts.write();
        let cart = guard.entry(user_id).or_insert_with(|| Cart {
            user_id,
            items: Vec::new(),
        });
        cart.items.push(item);
        cart.clone()
    }

    /// Remove an item by id. Removing an absent id is a no-op.
    pub fn remove_item(&self, user_id: i64, item_id: i64) -> Cart {
        let mut guard = self.carts.write();
        let cart = guard.entry(user_id).or_insert_with(|| Cart {
            user_id,
            items: Vec::new(),
        });
        cart.items.retain(|item| item.id != item_id);
        cart.clone()
    }

    /// Empty the cart but keep the record.
    pub fn clear(&self, user_id: i64) -> Cart {
        let mut guard = self.carts.write();
        let cart = guard.entry(user_id).or_insert_with(|| Cart {
            user_id,
            items: Vec::new(),
        });
        cart.items.clear();
        cart.clone()
    }

    /// Delete the cart record entirely. Deleting an absent cart is a no-op.
    pub fn delete(&self, user_id: i64) {
        self.carts.write().remove(&user_id);
    }

    /// Whether a cart record exists for the user.
    pub fn contains(&self, user_id: i64) -> bool {
        self.carts.read().contains_key(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str) -> CartItem {
        CartItem {
            id: 0,
            product_code: code.to_string(),
            product_name: format!("Product {code}"),
            price: 9.99,
            quantity: 1,
        }
    }

    #[test]
    fn get_or_create_returns_empty_cart() {
        let store = CartStore::new();
        let cart = store.get_or_create(7);
        assert_eq!(cart.user_id, 7);
        assert!(cart.items.is_empty());
        assert!(store.contains(7));
    }

    #[test]
    fn add_item_assigns_ids() {
        let store = CartStore::new();
        store.add_item(1, item("A"));
        let cart = store.add_item(1, item("B"));
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].id, 1);
        assert_eq!(cart.items[1].id, 2);
    }

    #[test]
    fn carts_are_isolated_per_user() {
        let store = CartStore::new();
        store.add_item(1, item("A"));
        store.add_item(2, item("B"));
        assert_eq!(store.get_or_create(1).items.len(), 1);
        assert_eq!(store.get_or_create(2).items.len(), 1);
        assert_eq!(store.get_or_create(1).items[0].product_code, "A");
    }

    #[test]
    fn remove_item_by_id() {
        let store = CartStore::new();
        store.add_item(1, item("A"));
        let cart = store.add_item(1, item("B"));
        let first_id = cart.items[0].id;

        let cart = store.remove_item(1, first_id);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_code, "B");

        // Unknown id is a no-op.
        let cart = store.remove_item(1, 999);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn clear_keeps_record_delete_removes_it() {
        let store = CartStore::new();
        store.add_item(1, item("A"));

        let cart = store.clear(1);
        assert!(cart.items.is_empty());
        assert!(store.contains(1));

        store.delete(1);
        assert!(!store.contains(1));
    }
}
