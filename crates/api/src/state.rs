use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store handle is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle.
    pub db: fauna_db::Db,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
