//! Infrastructure layer - External systems integration
//!
//! This module handles the external system concerns:
//! database connection management and the user repository.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};
