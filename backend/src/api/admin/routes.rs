//! Defines the HTTP routes for schema installation and test-data seeding.

use axum::{routing::get, Router};

use super::handlers::{install, seed};
use crate::api::AppState;

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/install", get(install))
        .route("/seed", get(seed))
}
