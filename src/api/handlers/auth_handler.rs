//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::UserResponse;
use crate::errors::AppResult;

/// User registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// User full name
    #[schema(example = "John Smith")]
    pub full_name: String,
    /// Phone number with +62 prefix
    #[schema(example = "+628123456789")]
    pub phone_number: String,
    /// User password
    #[schema(example = "5awitPro!")]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Phone number with +62 prefix
    #[schema(example = "+628123456789")]
    pub phone_number: String,
    /// User password
    #[schema(example = "5awitPro!")]
    pub password: String,
}

/// Token response returned after successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Unique user identifier
    pub user_id: Uuid,
    /// Signed access token
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: u64,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Phone number already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_service
        .register(payload.full_name, payload.phone_number, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login with phone number and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials"),
        (status = 404, description = "User not found")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (user, token) = state
        .auth_service
        .login(&payload.phone_number, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        access_token: token.value,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: token.lifetime.as_secs(),
    }))
}
