//! # bazar-core — Shared Service Framework
//!
//! Cross-cutting types used by every bazar service and the gateway:
//!
//! - [`response::ApiResponse`] — the uniform JSON envelope
//!   (`success` / `code` / `message` / `data`) every endpoint returns.
//! - [`error::AppError`] — application error type implementing
//!   `IntoResponse`, mapping domain failures to envelope-wrapped
//!   HTTP responses.
//! - [`paging`] — page/size/sort request fields shared by search
//!   endpoints.
//! - [`extractors`] — JSON body extraction with business-rule
//!   validation, and the [`extractors::UserId`] extractor that reads
//!   the identity header injected by the gateway.

pub mod error;
pub mod extractors;
pub mod paging;
pub mod response;

pub use error::AppError;
pub use response::ApiResponse;

/// Name of the identity header the gateway injects on authenticated
/// requests and downstream services consume.
pub const USER_ID_HEADER: &str = "x-user-id";
