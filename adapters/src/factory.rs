//! Storage factory for creating backend instances.
//!
//! Maps a connection string onto one of the concrete stores so that the
//! backend binary never names a store type directly.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::errors::{StoreError, StoreResult};
use crate::memory::MemoryAccountStore;
use crate::sqlite::SqliteAccountStore;
use crate::AccountStore;

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// In-memory storage, lost on exit
    Memory,
    /// SQLite database file (or `sqlite::memory:`)
    Sqlite,
}

impl FromStr for BackendType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        if lowered == "memory" {
            Ok(BackendType::Memory)
        } else if lowered.starts_with("sqlite:") {
            Ok(BackendType::Sqlite)
        } else {
            Err(StoreError::Internal(format!(
                "unsupported database url: {s}"
            )))
        }
    }
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Memory => "memory",
            BackendType::Sqlite => "sqlite",
        }
    }
}

/// Open the store described by `database_url`.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> StoreResult<Arc<dyn AccountStore>> {
    let backend = BackendType::from_str(database_url)?;
    info!(backend = backend.as_str(), "opening account store");

    match backend {
        BackendType::Memory => Ok(Arc::new(MemoryAccountStore::new())),
        BackendType::Sqlite => {
            let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options)
                .await?;
            Ok(Arc::new(SqliteAccountStore::new(pool)))
        }
    }
}
