//! # Product Routes
//!
//! Two routers over the same handlers: the full router (mounted at
//! `/api/products`, behind the gate) adds product creation; the public
//! read-only router is mounted at `/public/products`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use bazar_core::extractors::{extract_validated_json, Validate};
use bazar_core::paging::PageRequest;
use bazar_core::{ApiResponse, AppError};

use crate::store::{Product, ProductStore, SearchFilter};

/// Shared state for the product routers.
#[derive(Clone, Default)]
pub struct ProductState {
    pub store: ProductStore,
}

/// Product creation request. When `id` is absent or empty, one is
/// generated from the catalog sequence.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// Paged search request: text/price filters plus the shared paging fields.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(flatten)]
    pub page: PageRequest,
}

impl Validate for SearchRequest {
    fn validate(&self) -> Result<(), String> {
        if self.page.size == 0 {
            return Err("size must be at least 1".to_string());
        }
        if self.page.size > 100 {
            return Err("size must not exceed 100".to_string());
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err("min_price must not exceed max_price".to_string());
            }
        }
        if let Some(field) = self.page.sort_by.as_deref() {
            if !matches!(field, "name" | "price" | "id") {
                return Err(format!("unsupported sort_by field: {field}"));
            }
        }
        Ok(())
    }
}

/// One page of search results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PagedProductResponse {
    pub products: Vec<Product>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

/// Full router, nested under `/api/products` behind the gate.
pub fn router() -> Router<ProductState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", post(search_products))
        .route("/:id", get(get_product))
}

/// Read-only router, nested under `/public/products` (public path).
pub fn public_router() -> Router<ProductState> {
    Router::new()
        .route("/", get(list_products))
        .route("/search", post(search_products))
        .route("/:id", get(get_product))
}

/// GET /api/products — list the whole catalog in id order.
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, envelope-wrapped", body = Vec<Product>),
    ),
    tag = "product"
)]
pub async fn list_products(State(state): State<ProductState>) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::success(state.store.list()))
}

/// GET /api/products/{id} — fetch one product.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product, envelope-wrapped", body = Product),
        (status = 404, description = "Unknown product id"),
    ),
    tag = "product"
)]
pub async fn get_product(
    State(state): State<ProductState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let product = state
        .store
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(ApiResponse::success(product)))
}

/// POST /api/products — create (or replace) a product.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Saved product, envelope-wrapped", body = Product),
    ),
    tag = "product"
)]
pub async fn create_product(
    State(state): State<ProductState>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let req = extract_validated_json(body)?;

    let id = match req.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => state.store.generate_id(),
    };

    let product = state.store.save(Product {
        id,
        name: req.name,
        description: req.description,
        price: req.price,
        created_at: Utc::now(),
    });
    Ok(Json(ApiResponse::success(product)))
}

/// POST /api/products/search — paged catalog search.
#[utoipa::path(
    post,
    path = "/api/products/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One result page, envelope-wrapped", body = PagedProductResponse),
    ),
    tag = "product"
)]
pub async fn search_products(
    State(state): State<ProductState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PagedProductResponse>>, AppError> {
    let req = extract_validated_json(body)?;

    let filter = SearchFilter {
        search: req.search,
        min_price: req.min_price,
        max_price: req.max_price,
    };
    let (products, total_elements) = state.store.search(&filter, &req.page);

    Ok(Json(ApiResponse::success(PagedProductResponse {
        products,
        current_page: req.page.page,
        page_size: req.page.size,
        total_elements,
        total_pages: req.page.total_pages(total_elements),
    })))
}
