//! Crate entrypoint wiring together configuration, DB, and APIs.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod query;
pub mod search;
pub mod validation;

use config::AppConfig;
use db::Db;

use std::sync::Arc;

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub config: AppConfig,
    pub db: Db,
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;
