//! In-memory product catalog with sequential id generation and search.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use bazar_core::paging::{PageRequest, SortDirection};

/// First value handed out by the product id sequence.
const SEQUENCE_START: i64 = 100001;

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Search filter applied by [`ProductStore::search`].
#[derive(Debug, Default)]
pub struct SearchFilter {
    /// Case-insensitive substring matched against name OR description.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl SearchFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            if !product.name.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}

/// Thread-safe in-memory product store.
#[derive(Clone)]
pub struct ProductStore {
    products: Arc<RwLock<HashMap<String, Product>>>,
    sequence: Arc<AtomicI64>,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            sequence: Arc::new(AtomicI64::new(SEQUENCE_START)),
        }
    }

    /// Next id from the product sequence, formatted `PRD-%06d`.
    pub fn generate_id(&self) -> String {
        let value = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("PRD-{value:06}")
    }

    /// Insert or replace a product (save semantics).
    pub fn save(&self, product: Product) -> Product {
        self.products
            .write()
            .insert(product.id.clone(), product.clone());
        product
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.read().get(id).cloned()
    }

    pub fn list(&self) -> Vec<Product> {
        let mut all: Vec<Product> = self.products.read().values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filter, sort, and page the catalog. Returns the requested page
    /// and the total number of matching elements before paging.
    pub fn search(&self, filter: &SearchFilter, page: &PageRequest) -> (Vec<Product>, usize) {
        let mut matched: Vec<Product> = self
            .products
            .read()
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        match page.sort_by.as_deref() {
            Some("name") => matched.sort_by(|a, b| a.name.cmp(&b.name)),
            Some("price") => matched.sort_by(|a, b| {
                a.price
                    .partial_cmp(&b.price)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            // "id" and unsorted queries both fall back to id order so
            // paging is deterministic across requests.
            _ => matched.sort_by(|a, b| a.id.cmp(&b.id)),
        }
        if page.sort_direction == SortDirection::Desc && page.sort_by.is_some() {
            matched.reverse();
        }

        let total = matched.len();
        let page_items = matched
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();
        (page_items, total)
    }
}
