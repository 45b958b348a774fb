//! # Cart Routes
//!
//! Mounted by the gateway under `/api/cart`. The caller is identified
//! exclusively through the [`UserId`] extractor reading the gateway's
//! `X-User-Id` header; no cart id appears in any URL.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use bazar_core::extractors::{extract_validated_json, UserId, Validate};
use bazar_core::{ApiResponse, AppError};

use crate::store::{Cart, CartItem, CartStore};

/// Shared state for the cart router.
#[derive(Clone, Default)]
pub struct CartState {
    pub store: CartStore,
}

impl Validate for CartItem {
    fn validate(&self) -> Result<(), String> {
        if self.product_code.trim().is_empty() {
            return Err("product_code must not be empty".to_string());
        }
        if self.quantity == 0 {
            return Err("quantity must be at least 1".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// Build the cart router; the gateway nests it under `/api/cart`.
pub fn router() -> Router<CartState> {
    Router::new()
        .route("/", get(get_cart).delete(delete_cart))
        .route("/items", post(add_item))
        .route("/items/:item_id", delete(remove_item))
        .route("/clear", delete(clear_cart))
}

/// GET /api/cart — fetch (or lazily create) the caller's cart.
#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart, envelope-wrapped", body = Cart),
        (status = 401, description = "Missing identity header"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    State(state): State<CartState>,
    UserId(user_id): UserId,
) -> Json<ApiResponse<Cart>> {
    Json(ApiResponse::success(state.store.get_or_create(user_id)))
}

/// POST /api/cart/items — add an item to the caller's cart.
#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = CartItem,
    responses(
        (status = 200, description = "Updated cart, envelope-wrapped", body = Cart),
    ),
    tag = "cart"
)]
pub async fn add_item(
    State(state): State<CartState>,
    UserId(user_id): UserId,
    body: Result<Json<CartItem>, JsonRejection>,
) -> Result<Json<ApiResponse<Cart>>, AppError> {
    let item = extract_validated_json(body)?;
    Ok(Json(ApiResponse::success(state.store.add_item(user_id, item))))
}

/// DELETE /api/cart/items/{item_id} — remove an item by id.
#[utoipa::path(
    delete,
    path = "/api/cart/items/{item_id}",
    params(("item_id" = i64, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Updated cart, envelope-wrapped", body = Cart),
    ),
    tag = "cart"
)]
pub async fn remove_item(
    State(state): State<CartState>,
    UserId(user_id): UserId,
    Path(item_id): Path<i64>,
) -> Json<ApiResponse<Cart>> {
    Json(ApiResponse::success(state.store.remove_item(user_id, item_id)))
}

/// DELETE /api/cart/clear — empty the cart, keep the record.
#[utoipa::path(
    delete,
    path = "/api/cart/clear",
    responses(
        (status = 200, description = "Emptied cart, envelope-wrapped", body = Cart),
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    State(state): State<CartState>,
    UserId(user_id): UserId,
) -> Json<ApiResponse<Cart>> {
    Json(ApiResponse::success(state.store.clear(user_id)))
}

/// DELETE /api/cart — delete the cart record entirely.
#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart deleted; data is null"),
    ),
    tag = "cart"
)]
pub async fn delete_cart(
    State(state): State<CartState>,
    UserId(user_id): UserId,
) -> Json<ApiResponse<()>> {
    state.store.delete(user_id);
    Json(ApiResponse::success_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn test_app() -> Router {
        router().with_state(CartState::default())
    }

    fn request(method: &str, uri: &str, user_id: Option<i64>, body: Option<serde_json::Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header("x-user-id", id.to_string());
        }
        match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_cart_creates_empty_cart() {
        let app = test_app();
        let response = app.oneshot(request("GET", "/", Some(5), None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["user_id"], 5);
        assert_eq!(body["data"]["items"], json!([]));
    }

    #[tokio::test]
    async fn missing_identity_header_is_401() {
        let app = test_app();
        let response = app.oneshot(request("GET", "/", None, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn add_and_remove_item() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/items",
                Some(1),
                Some(json!({
                    "product_code": "PRD-100001",
                    "product_name": "Keyboard",
                    "price": 49.5,
                    "quantity": 2
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let item_id = body["data"]["items"][0]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["items"][0]["quantity"], 2);

        let response = app
            .oneshot(request("DELETE", &format!("/items/{item_id}"), Some(1), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["items"], json!([]));
    }

    #[tokio::test]
    async fn add_item_rejects_zero_quantity() {
        let app = test_app();
        let response = app
            .oneshot(request(
                "POST",
                "/items",
                Some(1),
                Some(json!({
                    "product_code": "PRD-100001",
                    "product_name": "Keyboard",
                    "price": 49.5,
                    "quantity": 0
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn clear_returns_empty_cart_delete_returns_null_data() {
        let state = CartState::default();
        let app = router().with_state(state.clone());

        app.clone()
            .oneshot(request(
                "POST",
                "/items",
                Some(9),
                Some(json!({
                    "product_code": "PRD-100002",
                    "product_name": "Mouse",
                    "price": 19.0,
                    "quantity": 1
                })),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(request("DELETE", "/clear", Some(9), None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["items"], json!([]));
        assert!(state.store.contains(9));

        let response = app
            .oneshot(request("DELETE", "/", Some(9), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], serde_json::Value::Null);
        assert!(!state.store.contains(9));
    }
}
