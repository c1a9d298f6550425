use std::sync::Arc;

use cgshare_core::gameserver::GameServerApi;

use crate::config::ServerConfig;
use crate::store::EntryStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cgshare_db::DbPool,
    /// Entry store over the same pool.
    pub store: EntryStore,
    /// Client for the remote game servers entries point at.
    pub game_server: Arc<dyn GameServerApi>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
