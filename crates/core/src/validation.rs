//! Validation pipeline.
//!
//! Decides whether the remote state a payload points at is real. The same
//! checks run when an entry is created (a failure rejects the request) and
//! every time it is resolved (a failure becomes a soft, user-facing message).
//!
//! Checks short-circuit in order:
//!
//! 1. Private-network game URLs are accepted without any remote call.
//! 2. The URL must serve a discovery document with a protocol version.
//! 3. The referenced game must exist.
//! 4. Spectate and session payloads: the referenced player must exist.
//!
//! Nothing is cached and nothing is retried; a single failed check is final
//! for the current request.

use uuid::Uuid;

use crate::entry::EntryPayload;
use crate::gameserver::GameServerApi;
use crate::network::is_local_address;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{0}' is not a CodeGame game server!")]
    NotAGameServer(String),

    #[error("The game '{0}' does not exist!")]
    GameNotFound(Uuid),

    #[error("The player '{0}' does not exist!")]
    PlayerNotFound(Uuid),
}

/// Run the pipeline for `payload` against the remote server it references.
pub async fn validate(
    api: &dyn GameServerApi,
    payload: &EntryPayload,
) -> Result<(), ValidationError> {
    let game_url = payload.game_url();

    if is_local_address(game_url) {
        tracing::debug!(game_url, "Private game server, skipping remote checks");
        return Ok(());
    }

    if !is_game_server(api, game_url).await {
        return Err(ValidationError::NotAGameServer(game_url.to_string()));
    }

    let game_id = payload.game_id();
    if !api.game_exists(game_url, game_id).await {
        return Err(ValidationError::GameNotFound(game_id));
    }

    if let Some(player_id) = payload.player_id() {
        if !api.player_exists(game_url, game_id, player_id).await {
            return Err(ValidationError::PlayerNotFound(player_id));
        }
    }

    Ok(())
}

async fn is_game_server(api: &dyn GameServerApi, game_url: &str) -> bool {
    match api.fetch_game_info(game_url).await {
        Ok(info) => !info.cg_version.is_empty(),
        Err(e) => {
            tracing::debug!(game_url, error = %e, "Game info unavailable");
            false
        }
    }
}
