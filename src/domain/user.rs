//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity.
///
/// Invariants: the identifier is immutable once assigned, the phone number
/// is unique across all users, and the password hash is never empty once a
/// user exists. The hash is never serialized outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub login_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// User response returned after registration (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    pub user_id: Uuid,
    /// User full name
    pub full_name: String,
    /// User phone number
    pub phone_number: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name,
            phone_number: user.phone_number,
        }
    }
}

/// Profile response for the authenticated user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// User full name
    pub full_name: String,
    /// User phone number
    pub phone_number: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name,
            phone_number: user.phone_number,
        }
    }
}
