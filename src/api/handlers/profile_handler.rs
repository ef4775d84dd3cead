//! Profile handlers for the authenticated user.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::ProfileResponse;
use crate::errors::AppResult;

/// Profile update request; absent fields keep their stored values
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// New full name
    #[schema(example = "Jane Smith")]
    pub full_name: Option<String>,
    /// New phone number with +62 prefix
    #[schema(example = "+628123456789")]
    pub phone_number: Option<String>,
}

/// Generic message response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create profile routes (bearer-guarded by the caller)
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).patch(update_profile))
}

/// Fetch the authenticated user's profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile fetched", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_token" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileResponse>> {
    let user = state.auth_service.get_profile(current_user.id).await?;

    Ok(Json(ProfileResponse::from(user)))
}

/// Update the authenticated user's profile (partial update)
#[utoipa::path(
    patch,
    path = "/profile",
    tag = "Profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "Phone number already exists")
    ),
    security(("bearer_token" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .update_profile(current_user.id, payload.full_name, payload.phone_number)
        .await?;

    Ok(Json(MessageResponse {
        message: "Updated successfully",
    }))
}
