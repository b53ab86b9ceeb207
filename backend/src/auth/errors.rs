//! Custom error types for the account service.
//!
//! Display strings double as the user-facing `error` message, so they keep
//! the exact wording existing clients already match on.

use adapters::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    /// A required field was missing or empty.
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("El email ya está registrado")]
    DuplicateEmail,
    #[error("Usuario no encontrado")]
    NotFound,
    /// Unknown email and wrong password are reported identically.
    #[error("Credenciales inválidas")]
    InvalidCredentials,
    #[error("{0}")]
    Store(StoreError),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AccountError::DuplicateEmail,
            StoreError::NotFound => AccountError::NotFound,
            other => AccountError::Store(other),
        }
    }
}

pub type AccountResult<T> = Result<T, AccountError>;
