//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserStore};
use crate::services::{AuthService, Authenticator, JwtTokenService, TokenService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service (the business flows)
    pub auth_service: Arc<dyn AuthService>,
    /// Token service (bearer-token verification for the middleware)
    pub token_service: Arc<dyn TokenService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let token_service: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(config.jwt_secret()));
        let auth_service = Arc::new(Authenticator::new(users, token_service.clone()));

        Self {
            auth_service,
            token_service,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        token_service: Arc<dyn TokenService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            token_service,
            database,
        }
    }
}
