use std::sync::Arc;

use crate::config::ServerConfig;

/// Handed to every handler through `State<AppState>`. Cloning is cheap:
/// the pool is reference-counted and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: stackit_db::DbPool,
    /// Read by the auth extractor for the JWT secret.
    pub config: Arc<ServerConfig>,
}
