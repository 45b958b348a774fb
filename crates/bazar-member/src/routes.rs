//! # Member Routes
//!
//! `POST /register` and `POST /login`, mounted by the gateway under
//! `/api/member`. Both are public paths at the gate; login is where
//! bearer tokens enter the system.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use bazar_core::extractors::{extract_validated_json, Validate};
use bazar_core::{ApiResponse, AppError};
use bazar_token::TokenService;

use crate::password::{hash_password, verify_password};
use crate::store::{Member, MemberStore};

/// Shared state for the member router.
#[derive(Clone)]
pub struct MemberState {
    pub store: MemberStore,
    pub tokens: Arc<TokenService>,
}

/// Registration request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("email must be a valid address".to_string());
        }
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        Ok(())
    }
}

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("email must not be empty".to_string());
        }
        Ok(())
    }
}

/// Public view of a member; the password hash is never serialized.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            email: m.email,
            created_at: m.created_at,
        }
    }
}

/// Login response: the bearer token plus the member id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
}

/// Build the member router; the gateway nests it under `/api/member`.
pub fn router() -> Router<MemberState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// POST /api/member/register — create a member account.
#[utoipa::path(
    post,
    path = "/api/member/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Member created, envelope wrapping MemberResponse", body = MemberResponse),
        (status = 400, description = "Email already exists"),
    ),
    tag = "member"
)]
pub async fn register(
    State(state): State<MemberState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MemberResponse>>, AppError> {
    let req = extract_validated_json(body)?;

    let hash = hash_password(&req.password).map_err(AppError::Internal)?;
    let member = state
        .store
        .create(&req.email, hash)
        .ok_or_else(|| AppError::BadRequest("Email already exists".to_string()))?;

    tracing::info!(member_id = member.id, "member registered");
    Ok(Json(ApiResponse::success(member.into())))
}

/// POST /api/member/login — verify credentials and issue a token.
///
/// Unknown email and wrong password produce the same 401 so callers
/// cannot probe which emails are registered.
#[utoipa::path(
    post,
    path = "/api/member/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued, envelope wrapping LoginResponse", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "member"
)]
pub async fn login(
    State(state): State<MemberState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let req = extract_validated_json(body)?;

    let member = state
        .store
        .find_by_email(&req.email)
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    if !verify_password(&member.password_hash, &req.password) {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let mut claims = serde_json::Map::new();
    claims.insert("email".to_string(), json!(member.email));
    claims.insert("userId".to_string(), json!(member.id));

    let token = state
        .tokens
        .issue(&member.email, claims)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        user_id: member.id,
    })))
}
