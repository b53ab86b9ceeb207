//! Module for user profile and management API endpoints.
//!
//! Listing, reading, creating and updating accounts. Credential checks are
//! handled by the `auth` module.

pub mod handlers;
pub mod routes;
