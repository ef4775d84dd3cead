//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Contains: the user entity, the password value object, and the
//! pure field validators that gate every mutation.

pub mod password;
pub mod user;
pub mod validation;

pub use password::Password;
pub use user::{ProfileResponse, User, UserResponse};
pub use validation::{validate_full_name, validate_password, validate_phone};
