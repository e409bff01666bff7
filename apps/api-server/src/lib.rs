//! CRUD API Server
//!
//! Serves create/read/update/delete endpoints for the `users`, `products`
//! and `tasks` collections over a pluggable storage backend.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use axum::Router;
use entities::{Product, Task, User};
use resource_store::{Database, ResourceRepository};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{Config, StorageKind};
use crate::state::{AppState, SharedState};

/// Creates the application router with all routes configured.
pub fn create_app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state, connecting to the database if the
/// configuration asks for one.
pub async fn create_state(config: &Config) -> anyhow::Result<SharedState> {
    let state = match config.storage {
        StorageKind::Memory => AppState::new(
            ResourceRepository::in_memory(),
            ResourceRepository::in_memory(),
            ResourceRepository::in_memory(),
        ),
        StorageKind::Sqlite => {
            let db = Database::connect(&config.database_url, config.db_max_connections).await?;
            AppState::new(
                ResourceRepository::new(Arc::new(db.backend::<User>())),
                ResourceRepository::new(Arc::new(db.backend::<Product>())),
                ResourceRepository::new(Arc::new(db.backend::<Task>())),
            )
        }
    };

    Ok(Arc::new(state))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
