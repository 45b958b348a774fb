//! # bazar-cart — Cart Service
//!
//! Per-user shopping carts. Every endpoint resolves the caller from the
//! `X-User-Id` header the gateway injects after credential validation;
//! the service itself never sees a token.

pub mod routes;
pub mod store;

pub use routes::{router, CartState};
pub use store::{Cart, CartItem, CartStore};
