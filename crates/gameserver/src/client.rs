//! REST client for the game-server HTTP endpoints.
//!
//! Wraps the discovery document (`/api/info`) and the player endpoints of a
//! game using [`reqwest`]. Game URLs are stored without a scheme, so every
//! call first checks whether the server speaks TLS.

use std::time::Duration;

use async_trait::async_trait;
use cgshare_core::gameserver::{GameInfo, GameServerApi, PlayerList, RemoteError};
use cgshare_core::network::base_url;
use uuid::Uuid;

/// Errors from the game-server REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GameServerApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Game server API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<GameServerApiError> for RemoteError {
    fn from(err: GameServerApiError) -> Self {
        RemoteError(err.to_string())
    }
}

/// HTTP client shared by all game-server lookups.
#[derive(Debug, Clone)]
pub struct GameServerClient {
    client: reqwest::Client,
}

impl GameServerClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, GameServerApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `/api/info` from the server.
    pub async fn info(&self, game_url: &str) -> Result<GameInfo, GameServerApiError> {
        let url = format!("{}/api/info", self.resolve_base(game_url).await);
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// Fetch `/api/games/{game_id}/players`.
    pub async fn players(
        &self,
        game_url: &str,
        game_id: Uuid,
    ) -> Result<PlayerList, GameServerApiError> {
        let url = format!(
            "{}/api/games/{game_id}/players",
            self.resolve_base(game_url).await
        );
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// Check that `/api/games/{game_id}/players` answers, discarding the body.
    pub async fn game(&self, game_url: &str, game_id: Uuid) -> Result<(), GameServerApiError> {
        let url = format!(
            "{}/api/games/{game_id}/players",
            self.resolve_base(game_url).await
        );
        let response = self.client.get(url).send().await?;
        Self::check_status(response).await
    }

    /// Fetch `/api/games/{game_id}/players/{player_id}`, discarding the body.
    pub async fn player(
        &self,
        game_url: &str,
        game_id: Uuid,
        player_id: Uuid,
    ) -> Result<(), GameServerApiError> {
        let url = format!(
            "{}/api/games/{game_id}/players/{player_id}",
            self.resolve_base(game_url).await
        );
        let response = self.client.get(url).send().await?;
        Self::check_status(response).await
    }

    /// Whether `https://{game_url}/api/info` answers successfully.
    pub async fn detect_tls(&self, game_url: &str) -> bool {
        let url = format!("{}/api/info", base_url(true, game_url));
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(game_url, error = %e, "TLS detection failed, using plain HTTP");
                false
            }
        }
    }

    // ---- private helpers ----

    async fn resolve_base(&self, game_url: &str) -> String {
        base_url(self.detect_tls(game_url).await, game_url)
    }

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GameServerApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GameServerApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GameServerApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), GameServerApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl GameServerApi for GameServerClient {
    async fn fetch_game_info(&self, game_url: &str) -> Result<GameInfo, RemoteError> {
        Ok(self.info(game_url).await?)
    }

    async fn game_exists(&self, game_url: &str, game_id: Uuid) -> bool {
        match self.game(game_url, game_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(game_url, %game_id, error = %e, "Game lookup failed");
                false
            }
        }
    }

    async fn player_exists(&self, game_url: &str, game_id: Uuid, player_id: Uuid) -> bool {
        match self.player(game_url, game_id, player_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(game_url, %game_id, %player_id, error = %e, "Player lookup failed");
                false
            }
        }
    }

    async fn get_players(&self, game_url: &str, game_id: Uuid) -> Result<PlayerList, RemoteError> {
        Ok(self.players(game_url, game_id).await?)
    }

    async fn is_tls(&self, game_url: &str) -> bool {
        self.detect_tls(game_url).await
    }
}
