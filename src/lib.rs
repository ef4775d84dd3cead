//! User Service - account registration, login, and profile management.
//!
//! A user-account service backed by Postgres and guarded by short-lived
//! stateless bearer tokens. The core is the authentication and validation
//! engine (token lifecycle, password hashing, field validators); HTTP
//! routing and persistence are thin adapters around it.
//!
//! # Architecture Layers
//!
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities, the password value object,
//!   and the field validators
//! - **services**: Application use cases (auth flows, token service)
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
