//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub(crate) mod token_service;

pub use auth_service::{AuthService, Authenticator};
pub use token_service::{bearer_token, AccessToken, Claims, JwtTokenService, TokenService};

#[cfg(test)]
pub use token_service::MockTokenService;
