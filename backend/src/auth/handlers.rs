//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse the login body, hand the credentials to the
//! `auth::service`, and shape the result into the JSON the route promises.

use axum::extract::State;
use axum::Json;

use super::models::{AuthenticatedAccount, LoginRequest};
use crate::api::extract::JsonBody;
use crate::api::AppState;
use crate::errors::ApiError;

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<Vec<AuthenticatedAccount>>, ApiError> {
    let account = state
        .accounts
        .authenticate(
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(vec![account]))
}
