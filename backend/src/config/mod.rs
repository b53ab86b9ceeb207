//! Central module for application-wide configuration settings.
//!
//! Settings come from command-line flags, each of which can also be supplied
//! through an environment variable. The seed list is read from an optional
//! JSON file so that sample identities stay out of the code.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::auth::SeedAccount;

#[derive(Parser, Debug, Clone)]
#[command(name = "account-backend", version, about = "Account management HTTP service")]
pub struct Config {
    /// Store connection string: `sqlite://<file>`, `sqlite::memory:` or `memory`
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://database.db")]
    pub database_url: String,

    /// Upper bound on pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// JSON file with `[{name, email, password}]` entries served by `/seed`
    #[arg(long, env = "SEED_FILE")]
    pub seed_file: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("seed entry {index} in {path} has an empty field")]
    SeedEntry { path: PathBuf, index: usize },
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Load the seed list. No file configured means an empty list.
    pub async fn load_seed_accounts(&self) -> Result<Vec<SeedAccount>, ConfigError> {
        let Some(path) = &self.seed_file else {
            return Ok(Vec::new());
        };

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::SeedRead {
                path: path.clone(),
                source,
            })?;
        parse_seed_accounts(path, &raw)
    }
}

fn parse_seed_accounts(path: &Path, raw: &str) -> Result<Vec<SeedAccount>, ConfigError> {
    let entries: Vec<SeedAccount> =
        serde_json::from_str(raw).map_err(|source| ConfigError::SeedParse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(index) = entries
        .iter()
        .position(|e| e.name.is_empty() || e.email.is_empty() || e.password.is_empty())
    {
        return Err(ConfigError::SeedEntry {
            path: path.to_path_buf(),
            index,
        });
    }

    Ok(entries)
}
