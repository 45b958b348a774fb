//! # bazar-product — Product Service
//!
//! Catalog CRUD with generated product ids (`PRD-%06d` from an atomic
//! sequence) and a paged search endpoint supporting case-insensitive
//! text matching, inclusive price-range filters, and sorting.

pub mod routes;
pub mod store;

pub use routes::{public_router, router, ProductState};
pub use store::{Product, ProductStore};
