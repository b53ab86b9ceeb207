//! Defines the HTTP routes specifically for authentication.
//!
//! Only credential checks live here; there are no sessions or tokens to
//! issue or refresh.

use axum::{routing::post, Router};

use super::handlers::login;
use crate::api::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
