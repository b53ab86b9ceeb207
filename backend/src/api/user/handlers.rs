//! Handler functions for user management API endpoints.
//!
//! Single-entity responses are wrapped in a one-element array and list
//! responses are bare arrays. Existing clients depend on that shape, odd as it
//! is, so it must not be "fixed" here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use adapters::Account;

use crate::api::extract::JsonBody;
use crate::api::AppState;
use crate::auth::{
    AccountError, CreateAccountRequest, CreatedAccount, UpdateAccountRequest, UpdatedAccount,
};
use crate::errors::ApiError;

/// A path id that is not a number cannot match any account.
fn parse_account_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| AccountError::NotFound.into())
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.accounts.list_accounts().await?))
}

/// `GET /users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let id = parse_account_id(&id)?;
    let account = state.accounts.get_account(id).await?;
    Ok(Json(vec![account]))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Vec<CreatedAccount>>), ApiError> {
    let id = state
        .accounts
        .create_account(
            request.name.as_deref().unwrap_or_default(),
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(vec![CreatedAccount { id }])))
}

/// `PUT /users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateAccountRequest>,
) -> Result<Json<Vec<UpdatedAccount>>, ApiError> {
    let id = parse_account_id(&id)?;
    let id = state.accounts.update_account(id, request.into()).await?;
    Ok(Json(vec![UpdatedAccount { id, updated: true }]))
}
