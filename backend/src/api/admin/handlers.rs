//! Handler functions for provisioning endpoints.

use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::auth::{InstallResponse, SeedOutcome};
use crate::errors::ApiError;

const TABLE_CREATED: &str = "Tabla users creada exitosamente";
const TABLE_EXISTS: &str = "La tabla users ya existe";

/// `GET /install`
pub async fn install(State(state): State<AppState>) -> Result<Json<Vec<InstallResponse>>, ApiError> {
    let status = state.accounts.install().await?;
    let already_exists = status.already_existed();

    Ok(Json(vec![InstallResponse {
        message: if already_exists { TABLE_EXISTS } else { TABLE_CREATED },
        already_exists,
    }]))
}

/// `GET /seed`
pub async fn seed(State(state): State<AppState>) -> Result<Json<Vec<SeedOutcome>>, ApiError> {
    let outcomes = state.accounts.seed_accounts(&state.seed_accounts).await?;
    Ok(Json(outcomes))
}
