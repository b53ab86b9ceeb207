//! Authentication module for managing user accounts and credentials.
//!
//! This module provides the account service (creation, updates, password
//! verification, seeding) together with the login endpoint built on it.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use models::*;
pub use routes::*;
pub use service::*;
