//! Entry types and the three payload variants an entry can carry.
//!
//! The stored `type` discriminant is the single source of truth for which
//! payload shape an entry holds; see [`crate::codec`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entry type
// ---------------------------------------------------------------------------

/// Discriminant persisted in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Game,
    Spectate,
    Session,
}

impl EntryType {
    /// Integer code stored in the database.
    pub const fn code(self) -> i64 {
        match self {
            Self::Game => 0,
            Self::Spectate => 1,
            Self::Session => 2,
        }
    }

    /// Inverse of [`EntryType::code`]. Returns `None` for unknown codes.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Game),
            1 => Some(Self::Spectate),
            2 => Some(Self::Session),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Spectate => "spectate",
            Self::Session => "session",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "game" => Ok(Self::Game),
            "spectate" => Ok(Self::Spectate),
            "session" => Ok(Self::Session),
            other => Err(CoreError::UnknownEntryType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload variants
// ---------------------------------------------------------------------------

/// A shared game lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePayload {
    pub game_url: String,
    pub game_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_secret: Option<String>,
}

/// A link that drops the visitor into a player's spectator view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectatePayload {
    pub game_url: String,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub player_secret: String,
}

/// Credentials of a single player inside a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub player_secret: String,
}

/// A complete player session handed over to another client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub game_url: String,
    pub username: String,
    pub session: SessionCredentials,
}

/// Exactly one of the three payload shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPayload {
    Game(GamePayload),
    Spectate(SpectatePayload),
    Session(SessionPayload),
}

impl EntryPayload {
    pub const fn entry_type(&self) -> EntryType {
        match self {
            Self::Game(_) => EntryType::Game,
            Self::Spectate(_) => EntryType::Spectate,
            Self::Session(_) => EntryType::Session,
        }
    }

    pub fn game_url(&self) -> &str {
        match self {
            Self::Game(g) => &g.game_url,
            Self::Spectate(s) => &s.game_url,
            Self::Session(s) => &s.game_url,
        }
    }

    pub const fn game_id(&self) -> Uuid {
        match self {
            Self::Game(g) => g.game_id,
            Self::Spectate(s) => s.game_id,
            Self::Session(s) => s.session.game_id,
        }
    }

    /// Player referenced by the payload. Game entries reference none.
    pub const fn player_id(&self) -> Option<Uuid> {
        match self {
            Self::Game(_) => None,
            Self::Spectate(s) => Some(s.player_id),
            Self::Session(s) => Some(s.session.player_id),
        }
    }
}

impl From<GamePayload> for EntryPayload {
    fn from(value: GamePayload) -> Self {
        Self::Game(value)
    }
}

impl From<SpectatePayload> for EntryPayload {
    fn from(value: SpectatePayload) -> Self {
        Self::Spectate(value)
    }
}

impl From<SessionPayload> for EntryPayload {
    fn from(value: SessionPayload) -> Self {
        Self::Session(value)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn codes_round_trip() {
        for ty in [EntryType::Game, EntryType::Spectate, EntryType::Session] {
            assert_eq!(EntryType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(EntryType::from_code(3), None);
        assert_eq!(EntryType::from_code(-1), None);
    }

    #[test]
    fn parses_query_names() {
        assert_eq!("spectate".parse::<EntryType>().unwrap(), EntryType::Spectate);
        assert_matches!(
            "lobby".parse::<EntryType>(),
            Err(CoreError::UnknownEntryType(name)) if name == "lobby"
        );
    }

    #[test]
    fn session_accessors_read_nested_credentials() {
        let game_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();
        let payload = EntryPayload::from(SessionPayload {
            game_url: "games.example.com".into(),
            username: "alice".into(),
            session: SessionCredentials {
                game_id,
                player_id,
                player_secret: "s3cret".into(),
            },
        });

        assert_eq!(payload.entry_type(), EntryType::Session);
        assert_eq!(payload.game_id(), game_id);
        assert_eq!(payload.player_id(), Some(player_id));
    }

    #[test]
    fn game_without_join_secret_omits_the_field() {
        let payload = GamePayload {
            game_url: "games.example.com".into(),
            game_id: Uuid::nil(),
            join_secret: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("join_secret").is_none());
    }
}
