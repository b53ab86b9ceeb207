//! Module for provisioning endpoints: creating the accounts table and
//! loading the configured seed accounts.

pub mod handlers;
pub mod routes;
