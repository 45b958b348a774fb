//! # bazar-member — Member Service
//!
//! Registration and login. Login verifies the stored argon2 password
//! hash and issues a bearer token carrying `email` and `userId` claims;
//! the gateway auth gate later validates that token and forwards the
//! `userId` downstream as the identity header.

pub mod password;
pub mod routes;
pub mod store;

pub use routes::{router, MemberState};
pub use store::{Member, MemberStore};
