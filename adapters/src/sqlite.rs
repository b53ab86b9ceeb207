//! SQLite-backed account store.
//!
//! This file contains the concrete implementation of the `AccountStore` trait
//! on top of a `sqlx` connection pool. Email uniqueness is delegated to the
//! table's `UNIQUE` constraint, so two racing writers with the same email are
//! settled by SQLite itself and the loser surfaces as
//! [`StoreError::DuplicateEmail`].

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::{StoreError, StoreResult};
use crate::models::{Account, AccountRecord, SchemaStatus};
use crate::{AccountStore, ACCOUNTS_TABLE};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

pub struct SqliteAccountStore {
    pool: SqlitePool,
    /// Serializes the check-then-create sequence within this process so the
    /// reported [`SchemaStatus`] is accurate. `IF NOT EXISTS` covers other
    /// processes sharing the same file.
    schema_lock: Mutex<()>,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            schema_lock: Mutex::new(()),
        }
    }

    async fn table_exists(&self) -> StoreResult<bool> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(ACCOUNTS_TABLE)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn ensure_schema(&self) -> StoreResult<SchemaStatus> {
        let _guard = self.schema_lock.lock().await;

        if self.table_exists().await? {
            debug!(table = ACCOUNTS_TABLE, "schema already present");
            return Ok(SchemaStatus::AlreadyExists);
        }

        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!(table = ACCOUNTS_TABLE, "created accounts table");
        Ok(SchemaStatus::Created)
    }

    async fn insert(&self, name: &str, email: &str, password_hash: &str) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>("SELECT id, name, email, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn get_record_by_id(&self, id: i64) -> StoreResult<AccountRecord> {
        sqlx::query_as::<_, AccountRecord>(
            "SELECT id, name, email, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<AccountRecord> {
        sqlx::query_as::<_, AccountRecord>(
            "SELECT id, name, email, password, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list_all(&self) -> StoreResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    async fn update(
        &self,
        id: i64,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<()> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ?, password = ? WHERE id = ?")
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
