//! Module for database connection setup.
//!
//! Opens the account store named by the configuration. The schema is not
//! touched here; it is created lazily through `/install`.

use std::sync::Arc;

use adapters::{AccountStore, StoreError};
use tracing::info;

use crate::config::Config;

pub async fn open_store(config: &Config) -> Result<Arc<dyn AccountStore>, StoreError> {
    let store = adapters::connect(&config.database_url, config.max_connections).await?;
    info!(max_connections = config.max_connections, "account store ready");
    Ok(store)
}
