//! Core `adapters` crate for abstracting account persistence.
//!
//! This crate defines the `AccountStore` trait, which outlines the storage
//! contract the account service relies on, and provides the concrete
//! backends (SQLite, in-memory) together with a factory that picks one from a
//! connection string.
//!
//! The store owns two guarantees on its own: email uniqueness, enforced
//! atomically by the backend, and idempotent schema creation. Everything
//! else (validation, hashing, merging partial updates) belongs to callers.

pub mod errors;
pub mod factory;
pub mod memory;
pub mod models;
pub mod sqlite;

use async_trait::async_trait;

pub use errors::{StoreError, StoreResult};
pub use factory::{connect, BackendType};
pub use memory::MemoryAccountStore;
pub use models::{Account, AccountRecord, SchemaStatus};
pub use sqlite::SqliteAccountStore;

/// Name of the table (or collection) holding accounts.
pub const ACCOUNTS_TABLE: &str = "users";

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create the accounts table if it is missing.
    ///
    /// Safe to call any number of times, including concurrently.
    async fn ensure_schema(&self) -> StoreResult<SchemaStatus>;

    /// Insert a new account and return its assigned id.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when the email is taken.
    async fn insert(&self, name: &str, email: &str, password_hash: &str) -> StoreResult<i64>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Account>;

    /// Full read by id, password hash included.
    async fn get_record_by_id(&self, id: i64) -> StoreResult<AccountRecord>;

    /// Full read by email, password hash included.
    async fn get_by_email(&self, email: &str) -> StoreResult<AccountRecord>;

    /// All accounts, password hashes excluded. Order is backend-defined.
    async fn list_all(&self) -> StoreResult<Vec<Account>>;

    /// Overwrite every mutable field of an existing account.
    ///
    /// Callers merge optional fields beforehand. Fails with
    /// [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::DuplicateEmail`] when `email` belongs to another account.
    async fn update(
        &self,
        id: i64,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<()>;
}
