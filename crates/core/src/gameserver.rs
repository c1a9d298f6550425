//! Remote game-server capability.
//!
//! The validation and resolution pipelines only ever talk to a game server
//! through [`GameServerApi`]. The production implementation lives in the
//! `cgshare-gameserver` crate; tests substitute an in-memory fake.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discovery document served by a game server at `/api/info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub name: String,
    /// Protocol version implemented by the server. Empty means the endpoint
    /// is not a game server.
    #[serde(default)]
    pub cg_version: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub repository_url: String,
}

impl GameInfo {
    /// Display name, falling back to the technical name.
    pub fn title(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}

/// A remote call that did not produce a usable answer.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Remote game server request failed: {0}")]
pub struct RemoteError(pub String);

/// Players of a game keyed by player id, valued by username.
pub type PlayerList = HashMap<String, String>;

#[async_trait]
pub trait GameServerApi: Send + Sync {
    /// Fetch the discovery document of the server at `game_url`.
    async fn fetch_game_info(&self, game_url: &str) -> Result<GameInfo, RemoteError>;

    /// Whether the server hosts a game with this id.
    async fn game_exists(&self, game_url: &str, game_id: Uuid) -> bool;

    /// Whether the game contains a player with this id.
    async fn player_exists(&self, game_url: &str, game_id: Uuid, player_id: Uuid) -> bool;

    /// List the players currently in a game.
    async fn get_players(&self, game_url: &str, game_id: Uuid) -> Result<PlayerList, RemoteError>;

    /// Whether the server answers over TLS.
    async fn is_tls(&self, game_url: &str) -> bool;
}
