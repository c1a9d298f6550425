//! Resolution engine.
//!
//! Turns a stored entry back into something a caller can act on. Every
//! resolution decodes the payload, re-runs the validation pipeline (the game
//! or player may be gone since the link was created), and only then builds
//! the variant-specific result. Problems with the referenced game never
//! surface as errors: they become [`Resolution::SoftError`] and leave the
//! stored entry untouched.

use serde::Serialize;
use url::form_urlencoded;
use uuid::Uuid;

use crate::codec;
use crate::entry::{EntryPayload, EntryType, GamePayload, SessionPayload, SpectatePayload};
use crate::gameserver::GameServerApi;
use crate::network::{base_url, is_local_address};
use crate::validation::validate;

/// Shown when stored bytes no longer decode.
pub const MALFORMED_ENTRY_MESSAGE: &str = "The stored entry is corrupted and cannot be opened.";

/// Player count reported for private servers, which are never queried.
pub const UNKNOWN_PLAYER_COUNT: i64 = -1;

/// Render-ready data for a shared game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub display_name: String,
    pub description: String,
    pub base_url: String,
    pub game_id: Uuid,
    pub join_secret: Option<String>,
    pub url: String,
    pub player_count: i64,
    pub version: String,
    pub repository_url: String,
    pub cg_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Game entries: data for the game landing page.
    RenderView(GameView),
    /// Spectate entries: where to send the visitor.
    Redirect(String),
    /// Session entries: the stored payload, unchanged.
    RawData(SessionPayload),
    /// The link is intact but its referent is not usable right now.
    SoftError(String),
}

/// Whether an entry of type `stored` satisfies the caller's optional filter.
pub fn matches_filter(stored: EntryType, expected: Option<EntryType>) -> bool {
    expected.map_or(true, |expected| expected == stored)
}

/// Resolve the stored bytes of an entry of type `entry_type`.
pub async fn resolve(api: &dyn GameServerApi, entry_type: EntryType, data: &[u8]) -> Resolution {
    let payload = match codec::decode(entry_type, data) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(%entry_type, error = %e, "Stored payload failed to decode");
            return Resolution::SoftError(MALFORMED_ENTRY_MESSAGE.to_string());
        }
    };

    if let Err(e) = validate(api, &payload).await {
        tracing::info!(%entry_type, reason = %e, "Entry no longer valid");
        return Resolution::SoftError(e.to_string());
    }

    match payload {
        EntryPayload::Game(game) => game_view(api, game).await,
        EntryPayload::Spectate(spectate) => {
            Resolution::Redirect(spectate_redirect(api, &spectate).await)
        }
        EntryPayload::Session(session) => Resolution::RawData(session),
    }
}

async fn game_view(api: &dyn GameServerApi, game: GamePayload) -> Resolution {
    if is_local_address(&game.game_url) {
        return Resolution::RenderView(GameView {
            display_name: game.game_url.clone(),
            description: String::new(),
            base_url: base_url(false, &game.game_url),
            game_id: game.game_id,
            join_secret: game.join_secret,
            url: game.game_url,
            player_count: UNKNOWN_PLAYER_COUNT,
            version: String::new(),
            repository_url: String::new(),
            cg_version: String::new(),
        });
    }

    let info = match api.fetch_game_info(&game.game_url).await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(game_url = %game.game_url, error = %e, "Failed to fetch game info");
            return unavailable(&game.game_url);
        }
    };

    let players = match api.get_players(&game.game_url, game.game_id).await {
        Ok(players) => players,
        Err(e) => {
            tracing::warn!(game_url = %game.game_url, error = %e, "Failed to fetch players");
            return unavailable(&game.game_url);
        }
    };

    let tls = api.is_tls(&game.game_url).await;

    Resolution::RenderView(GameView {
        display_name: info.title().to_string(),
        description: info.description,
        base_url: base_url(tls, &game.game_url),
        game_id: game.game_id,
        join_secret: game.join_secret,
        url: game.game_url,
        player_count: i64::try_from(players.len()).unwrap_or(i64::MAX),
        version: info.version,
        repository_url: info.repository_url,
        cg_version: info.cg_version,
    })
}

fn unavailable(game_url: &str) -> Resolution {
    Resolution::SoftError(format!(
        "Failed to fetch information about the game server '{game_url}'."
    ))
}

async fn spectate_redirect(api: &dyn GameServerApi, spectate: &SpectatePayload) -> String {
    let tls = !is_local_address(&spectate.game_url) && api.is_tls(&spectate.game_url).await;
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("game_id", &spectate.game_id.to_string())
        .append_pair("player_id", &spectate.player_id.to_string())
        .append_pair("player_secret", &spectate.player_secret)
        .finish();
    format!("{}/spectate?{query}", base_url(tls, &spectate.game_url))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::entry::SessionCredentials;
    use crate::testing::FakeGameServer;

    fn encoded(payload: &EntryPayload) -> Vec<u8> {
        codec::encode(payload).unwrap()
    }

    #[test]
    fn filter_matches_only_the_stored_type() {
        assert!(matches_filter(EntryType::Game, None));
        assert!(matches_filter(EntryType::Game, Some(EntryType::Game)));
        assert!(!matches_filter(EntryType::Game, Some(EntryType::Spectate)));
    }

    #[tokio::test]
    async fn local_game_renders_raw_connection_fields() {
        let api = FakeGameServer::unreachable();
        let game_id = Uuid::new_v4();
        let payload = EntryPayload::Game(GamePayload {
            game_url: "192.168.1.20:8080".into(),
            game_id,
            join_secret: Some("join".into()),
        });

        let view = assert_matches!(
            resolve(&api, EntryType::Game, &encoded(&payload)).await,
            Resolution::RenderView(view) => view
        );
        assert_eq!(view.display_name, "192.168.1.20:8080");
        assert_eq!(view.base_url, "http://192.168.1.20:8080");
        assert_eq!(view.player_count, UNKNOWN_PLAYER_COUNT);
        assert_eq!(view.join_secret.as_deref(), Some("join"));
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn remote_game_gathers_server_metadata() {
        let game_id = Uuid::new_v4();
        let api = FakeGameServer::default()
            .with_game(game_id, &[Uuid::new_v4(), Uuid::new_v4()])
            .with_tls(true);
        let payload = EntryPayload::Game(GamePayload {
            game_url: "games.example.com".into(),
            game_id,
            join_secret: None,
        });

        let view = assert_matches!(
            resolve(&api, EntryType::Game, &encoded(&payload)).await,
            Resolution::RenderView(view) => view
        );
        assert_eq!(view.display_name, "Fake Game");
        assert_eq!(view.base_url, "https://games.example.com");
        assert_eq!(view.player_count, 2);
        assert_eq!(view.version, "1.2.3");
        assert_eq!(view.cg_version, "0.7");
    }

    #[tokio::test]
    async fn failed_player_listing_is_soft() {
        let game_id = Uuid::new_v4();
        let api = FakeGameServer::default()
            .with_game(game_id, &[])
            .with_players_unavailable();
        let payload = EntryPayload::Game(GamePayload {
            game_url: "games.example.com".into(),
            game_id,
            join_secret: None,
        });

        assert_matches!(
            resolve(&api, EntryType::Game, &encoded(&payload)).await,
            Resolution::SoftError(msg) if msg.contains("games.example.com")
        );
    }

    #[tokio::test]
    async fn spectate_redirects_with_encoded_query() {
        let game_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();
        let api = FakeGameServer::default().with_game(game_id, &[player_id]);
        let payload = EntryPayload::Spectate(SpectatePayload {
            game_url: "games.example.com".into(),
            game_id,
            player_id,
            player_secret: "a b&c".into(),
        });

        let target = assert_matches!(
            resolve(&api, EntryType::Spectate, &encoded(&payload)).await,
            Resolution::Redirect(target) => target
        );
        assert_eq!(
            target,
            format!(
                "http://games.example.com/spectate?game_id={game_id}&player_id={player_id}&player_secret=a+b%26c"
            )
        );
    }

    #[tokio::test]
    async fn local_spectate_never_checks_tls() {
        let api = FakeGameServer::unreachable();
        let payload = EntryPayload::Spectate(SpectatePayload {
            game_url: "10.0.0.7".into(),
            game_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            player_secret: "secret".into(),
        });

        assert_matches!(
            resolve(&api, EntryType::Spectate, &encoded(&payload)).await,
            Resolution::Redirect(target) if target.starts_with("http://10.0.0.7/spectate?")
        );
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn session_is_returned_verbatim() {
        let api = FakeGameServer::unreachable();
        let session = SessionPayload {
            game_url: "10.0.0.5".into(),
            username: "alice".into(),
            session: SessionCredentials {
                game_id: Uuid::new_v4(),
                player_id: Uuid::new_v4(),
                player_secret: "s3cret".into(),
            },
        };
        let bytes = encoded(&EntryPayload::Session(session.clone()));

        let first = resolve(&api, EntryType::Session, &bytes).await;
        let second = resolve(&api, EntryType::Session, &bytes).await;
        assert_eq!(first, Resolution::RawData(session));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn departed_player_becomes_soft_error() {
        let game_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();
        let api = FakeGameServer::default().with_game(game_id, &[player_id]);
        let payload = EntryPayload::Spectate(SpectatePayload {
            game_url: "games.example.com".into(),
            game_id,
            player_id,
            player_secret: "secret".into(),
        });
        let bytes = encoded(&payload);

        assert_matches!(
            resolve(&api, EntryType::Spectate, &bytes).await,
            Resolution::Redirect(_)
        );

        api.remove_player(game_id, player_id);
        assert_eq!(
            resolve(&api, EntryType::Spectate, &bytes).await,
            Resolution::SoftError(format!("The player '{player_id}' does not exist!"))
        );
    }

    #[tokio::test]
    async fn corrupted_bytes_become_soft_error() {
        let api = FakeGameServer::default();
        assert_eq!(
            resolve(&api, EntryType::Game, b"{\"game_url\":").await,
            Resolution::SoftError(MALFORMED_ENTRY_MESSAGE.to_string())
        );
        assert_eq!(api.calls(), 0);
    }
}
