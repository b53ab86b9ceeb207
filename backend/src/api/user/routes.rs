//! Defines the HTTP routes for reading and managing user accounts.

use axum::{routing::get, Router};

use super::handlers::{create_user, get_user, list_users, update_user};
use crate::api::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user))
}
