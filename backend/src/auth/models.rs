//! Data structures for account requests, responses and seeding.
//!
//! Request bodies keep every field optional so that a missing field reaches
//! the service's own presence checks instead of failing deserialization.
//! None of the password-bearing types derive `Debug` or `Serialize`.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Default)]
pub struct CreateAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Fields an update may change. `None` keeps the stored value.
#[derive(Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateAccountRequest> for AccountChanges {
    fn from(request: UpdateAccountRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedAccount {
    pub id: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdatedAccount {
    pub id: i64,
    pub updated: bool,
}

/// Identity returned by a successful login. Never carries the hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InstallResponse {
    pub message: &'static str,
    #[serde(rename = "alreadyExists")]
    pub already_exists: bool,
}

/// One entry of the configured seed list.
#[derive(Deserialize, Clone)]
pub struct SeedAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStatus {
    #[serde(rename = "creado")]
    Created,
    #[serde(rename = "ya existe")]
    Skipped,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub status: SeedStatus,
}

impl SeedOutcome {
    pub fn created(id: i64, email: &str) -> Self {
        Self {
            id: Some(id),
            email: email.to_string(),
            status: SeedStatus::Created,
        }
    }

    pub fn skipped(email: &str) -> Self {
        Self {
            id: None,
            email: email.to_string(),
            status: SeedStatus::Skipped,
        }
    }
}
