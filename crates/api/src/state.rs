use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Each write checks out one connection for
    /// its whole transaction.
    pub pool: gamespot_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
