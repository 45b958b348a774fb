//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes of every service crate into a
//! single OpenAPI spec, served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Assembled OpenAPI spec for the whole gateway surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bazar API Gateway",
        version = "0.3.2",
        description = "Member, cart, and product services behind a token-gated API gateway.",
        license(name = "MIT")
    ),
    paths(
        // Member
        bazar_member::routes::register,
        bazar_member::routes::login,
        // Cart
        bazar_cart::routes::get_cart,
        bazar_cart::routes::add_item,
        bazar_cart::routes::remove_item,
        bazar_cart::routes::clear_cart,
        bazar_cart::routes::delete_cart,
        // Product
        bazar_product::routes::list_products,
        bazar_product::routes::get_product,
        bazar_product::routes::create_product,
        bazar_product::routes::search_products,
    ),
    components(schemas(
        // Member DTOs
        bazar_member::routes::RegisterRequest,
        bazar_member::routes::LoginRequest,
        bazar_member::routes::MemberResponse,
        bazar_member::routes::LoginResponse,
        // Cart types
        bazar_cart::store::Cart,
        bazar_cart::store::CartItem,
        // Product types
        bazar_product::store::Product,
        bazar_product::routes::CreateProductRequest,
        bazar_product::routes::SearchRequest,
        bazar_product::routes::PagedProductResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "member", description = "Registration and login"),
        (name = "cart", description = "Per-user shopping cart"),
        (name = "product", description = "Product catalog and search"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme every gated route requires.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
