//! Custom error types specific to the `adapters` crate.
//!
//! Every backend reports failures through [`StoreError`]. Uniqueness
//! violations and missing rows get their own variants so callers never have
//! to inspect driver messages to tell them apart from other failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("account not found")]
    NotFound,
    #[error("account table does not exist")]
    SchemaMissing,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
    #[error("internal store error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound;
        }
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::DuplicateEmail;
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
