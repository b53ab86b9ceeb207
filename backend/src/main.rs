//! Main entry point for the account backend.
//!
//! This file initializes logging, reads the configuration, opens the account
//! store, and serves the API router until the process is stopped.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod middleware;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::auth::AccountService;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,account_backend=debug")),
        )
        .init();

    let config = Config::parse();

    let store = database::open_store(&config).await?;
    let seed_accounts = config.load_seed_accounts().await?;
    info!(seed_accounts = seed_accounts.len(), "seed list loaded");

    let state = AppState::new(AccountService::new(store), seed_accounts);
    let app = api::router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
