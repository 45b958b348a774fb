//! # Auth Gate
//!
//! Middleware applied to every route the gateway serves. Public paths
//! pass straight through; everything else must carry a bearer token in
//! the `Authorization` header or a `token` cookie. Validated requests
//! are forwarded with the `x-user-id` header set from the token's
//! `userId` claim, so downstream services never parse tokens
//! themselves.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;

use bazar_core::{ApiResponse, USER_ID_HEADER};
use bazar_token::TokenVerifier;

use crate::paths::PublicPathSet;

/// Message on every gate rejection, regardless of the reason.
pub const REJECTION_MESSAGE: &str = "You don't have access to this page";

/// Claim the gate reads the caller identity from.
const USER_ID_CLAIM: &str = "userId";

/// Everything the gate needs, injected as a request extension so the
/// middleware itself stays a plain `from_fn`.
#[derive(Clone)]
pub struct GateContext {
    pub public_paths: Arc<PublicPathSet>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// The gate middleware. Layered over the whole gateway router.
pub async fn auth_gate(mut request: Request, next: Next) -> Response {
    let Some(ctx) = request.extensions().get::<GateContext>().cloned() else {
        // Missing context means the layers are mis-wired; fail closed.
        return unauthorized();
    };

    if ctx.public_paths.matches(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(token) = extract_credential(request.headers()) else {
        return unauthorized();
    };

    if !ctx.verifier.validate(&token) {
        return unauthorized();
    }

    let claims = match ctx.verifier.claims(&token) {
        Ok(claims) => claims,
        Err(_) => return unauthorized(),
    };
    let user_id = match claims.get(USER_ID_CLAIM) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => return unauthorized(),
        Some(other) => other.to_string(),
    };

    // Replace, not append: a client-supplied x-user-id must never
    // survive past the gate.
    match HeaderValue::from_str(&user_id) {
        Ok(value) => {
            request.headers_mut().insert(USER_ID_HEADER, value);
            next.run(request).await
        }
        Err(_) => unauthorized(),
    }
}

/// Pull the bearer token off a request. The `Authorization` header wins
/// over the `token` cookie; a header without the exact `Bearer ` prefix
/// counts as absent rather than malformed.
fn extract_credential(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }
    cookie_value(headers, "token")
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        if let Some((key, value)) = pair.trim().split_once('=') {
            if key == name {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// The uniform 401 envelope. If serialization somehow fails, an empty
/// 401 body still keeps the request out.
fn unauthorized() -> Response {
    let envelope = ApiResponse::<()>::error(401, REJECTION_MESSAGE);
    let bytes = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(_) => return empty_unauthorized(),
    };
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(bytes))
        .unwrap_or_else(|_| empty_unauthorized())
}

fn empty_unauthorized() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response
}
