//! # bazar-gateway — API Gateway
//!
//! Assembles the member, cart, and product services into one axum app
//! and layers the auth gate over the whole surface. The gate is the
//! only component that ever inspects tokens; services downstream trust
//! the `x-user-id` header it injects.

pub mod config;
pub mod gate;
pub mod openapi;
pub mod paths;

use std::sync::Arc;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower_http::trace::TraceLayer;

use bazar_cart::CartState;
use bazar_core::ApiResponse;
use bazar_member::{MemberState, MemberStore};
use bazar_product::ProductState;
use bazar_token::TokenService;

use crate::config::GatewayConfig;
use crate::gate::{auth_gate, GateContext};
use crate::paths::PublicPathSet;

/// Shared state for the assembled gateway.
#[derive(Clone)]
pub struct GatewayState {
    pub member: MemberState,
    pub cart: CartState,
    pub product: ProductState,
    pub tokens: Arc<TokenService>,
    pub public_paths: Arc<PublicPathSet>,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.jwt_secret,
            config.token_ttl_secs,
        ));
        Self {
            member: MemberState {
                store: MemberStore::new(),
                tokens: tokens.clone(),
            },
            cart: CartState::default(),
            product: ProductState::default(),
            tokens,
            public_paths: Arc::new(config.public_paths.clone()),
        }
    }
}

/// Build the gateway router: services nested under their prefixes, the
/// public read-only catalog, health probes, the API document, and the
/// gate layered over everything.
pub fn app(state: GatewayState) -> Router {
    let ctx = GateContext {
        public_paths: state.public_paths.clone(),
        verifier: state.tokens.clone(),
    };

    Router::new()
        .nest(
            "/api/member",
            bazar_member::router().with_state(state.member),
        )
        .nest("/api/cart", bazar_cart::router().with_state(state.cart))
        .nest(
            "/api/products",
            bazar_product::router().with_state(state.product.clone()),
        )
        .nest(
            "/public/products",
            bazar_product::public_router().with_state(state.product),
        )
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(openapi::router())
        .layer(from_fn(auth_gate))
        .layer(Extension(ctx))
        .layer(TraceLayer::new_for_http())
}

/// GET /health/liveness — process is up.
async fn liveness() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("alive"))
}

/// GET /health/readiness — stores are reachable.
async fn readiness() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ready"))
}
