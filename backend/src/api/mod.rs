//! Central module for organizing the application's API endpoints.
//!
//! This module owns the shared handler state and assembles the provisioning,
//! user and authentication routers into the application router.

pub mod admin;
pub mod extract;
pub mod user;

use std::sync::Arc;

use axum::Router;

use crate::auth::{auth_router, AccountService, SeedAccount};
use crate::errors::ApiError;
use crate::middleware::trace_layer;

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub seed_accounts: Arc<Vec<SeedAccount>>,
}

impl AppState {
    pub fn new(accounts: AccountService, seed_accounts: Vec<SeedAccount>) -> Self {
        Self {
            accounts: Arc::new(accounts),
            seed_accounts: Arc::new(seed_accounts),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(admin::routes::admin_router())
        .merge(user::routes::user_router())
        .merge(auth_router())
        .fallback(fallback)
        .layer(trace_layer())
        .with_state(state)
}

async fn fallback() -> ApiError {
    ApiError::not_found("Ruta no encontrada")
}
