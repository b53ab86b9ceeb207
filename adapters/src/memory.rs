//! In-memory account store for tests and local development.
//!
//! All state sits behind a single `RwLock`, so the uniqueness check and the
//! write that depends on it happen under the same guard.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Timelike, Utc};
use tokio::sync::RwLock;

use crate::errors::{StoreError, StoreResult};
use crate::models::{Account, AccountRecord, SchemaStatus};
use crate::AccountStore;

pub struct MemoryAccountStore {
    /// `None` until `ensure_schema` has run.
    table: RwLock<Option<Table>>,
}

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, AccountRecord>,
}

impl Table {
    fn email_owner(&self, email: &str) -> Option<i64> {
        self.rows
            .values()
            .find(|row| row.email == email)
            .map(|row| row.id)
    }
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(None),
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Current UTC time at second precision, matching `CURRENT_TIMESTAMP`.
fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn ensure_schema(&self) -> StoreResult<SchemaStatus> {
        let mut table = self.table.write().await;
        if table.is_some() {
            return Ok(SchemaStatus::AlreadyExists);
        }
        *table = Some(Table::default());
        Ok(SchemaStatus::Created)
    }

    async fn insert(&self, name: &str, email: &str, password_hash: &str) -> StoreResult<i64> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(StoreError::SchemaMissing)?;

        if table.email_owner(email).is_some() {
            return Err(StoreError::DuplicateEmail);
        }

        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            AccountRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: now(),
            },
        );
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Account> {
        self.get_record_by_id(id).await.map(Account::from)
    }

    async fn get_record_by_id(&self, id: i64) -> StoreResult<AccountRecord> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(StoreError::SchemaMissing)?;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<AccountRecord> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(StoreError::SchemaMissing)?;
        table
            .rows
            .values()
            .find(|row| row.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_all(&self) -> StoreResult<Vec<Account>> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(StoreError::SchemaMissing)?;
        Ok(table.rows.values().cloned().map(Account::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<()> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(StoreError::SchemaMissing)?;

        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if matches!(table.email_owner(email), Some(owner) if owner != id) {
            return Err(StoreError::DuplicateEmail);
        }

        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.name = name.to_string();
        row.email = email.to_string();
        row.password_hash = password_hash.to_string();
        Ok(())
    }
}
