//! Request bodies for creating entries.
//!
//! Every field defaults when absent so a missing field is reported by name in
//! an `invalid-fields` error rather than as an undecodable body.

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::entry::{
    EntryPayload, GamePayload, SessionCredentials, SessionPayload, SpectatePayload,
};
use crate::error::{CoreError, CoreResult};
use crate::network::trim_url;

/// A validated payload plus the optional password protecting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub payload: EntryPayload,
    pub password: Option<String>,
}

/// DTO for `POST /game`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateGameEntry {
    #[validate(length(min = 1))]
    pub game_url: String,
    #[validate(length(min = 1))]
    pub game_id: String,
    pub join_secret: Option<String>,
    pub password: Option<String>,
}

/// DTO for `POST /spectate`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateSpectateEntry {
    #[validate(length(min = 1))]
    pub game_url: String,
    #[validate(length(min = 1))]
    pub game_id: String,
    #[validate(length(min = 1))]
    pub player_id: String,
    #[validate(length(min = 1))]
    pub player_secret: String,
    pub password: Option<String>,
}

/// Nested credentials of `POST /session`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateSessionCredentials {
    #[validate(length(min = 1))]
    pub game_id: String,
    #[validate(length(min = 1))]
    pub player_id: String,
    #[validate(length(min = 1))]
    pub player_secret: String,
}

/// DTO for `POST /session`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateSessionEntry {
    #[validate(length(min = 1))]
    pub game_url: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(nested)]
    pub session: CreateSessionCredentials,
    pub password: Option<String>,
}

impl CreateGameEntry {
    pub fn into_new_entry(mut self) -> CoreResult<NewEntry> {
        self.game_url = trim_url(&self.game_url);
        let mut invalid = field_errors(&self);
        let game_id = parse_uuid("game_id", &self.game_id, &mut invalid);
        reject_invalid(invalid)?;

        Ok(NewEntry {
            payload: EntryPayload::Game(GamePayload {
                game_url: self.game_url,
                game_id,
                join_secret: self.join_secret.filter(|s| !s.is_empty()),
            }),
            password: non_empty(self.password),
        })
    }
}

impl CreateSpectateEntry {
    pub fn into_new_entry(mut self) -> CoreResult<NewEntry> {
        self.game_url = trim_url(&self.game_url);
        let mut invalid = field_errors(&self);
        let game_id = parse_uuid("game_id", &self.game_id, &mut invalid);
        let player_id = parse_uuid("player_id", &self.player_id, &mut invalid);
        reject_invalid(invalid)?;

        Ok(NewEntry {
            payload: EntryPayload::Spectate(SpectatePayload {
                game_url: self.game_url,
                game_id,
                player_id,
                player_secret: self.player_secret,
            }),
            password: non_empty(self.password),
        })
    }
}

impl CreateSessionEntry {
    pub fn into_new_entry(mut self) -> CoreResult<NewEntry> {
        self.game_url = trim_url(&self.game_url);
        let mut invalid = field_errors(&self);
        let game_id = parse_uuid("session.game_id", &self.session.game_id, &mut invalid);
        let player_id = parse_uuid("session.player_id", &self.session.player_id, &mut invalid);
        reject_invalid(invalid)?;

        Ok(NewEntry {
            payload: EntryPayload::Session(SessionPayload {
                game_url: self.game_url,
                username: self.username,
                session: SessionCredentials {
                    game_id,
                    player_id,
                    player_secret: self.session.player_secret,
                },
            }),
            password: non_empty(self.password),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn field_errors(input: &impl Validate) -> Vec<String> {
    let mut fields = Vec::new();
    if let Err(errors) = input.validate() {
        collect_fields("", &errors, &mut fields);
    }
    fields
}

fn collect_fields(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let name = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(_) => out.push(name),
            ValidationErrorsKind::Struct(inner) => collect_fields(&name, inner, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_fields(&name, inner, out);
                }
            }
        }
    }
}

/// Parse a UUID field. Only the lowercase hyphenated form is accepted, so the
/// stored id always reads back exactly as submitted. Empty values are already
/// reported by the length check.
fn parse_uuid(field: &str, value: &str, invalid: &mut Vec<String>) -> Uuid {
    match Uuid::parse_str(value) {
        Ok(id) if id.hyphenated().to_string() == value => id,
        _ => {
            if !value.is_empty() {
                invalid.push(field.to_string());
            }
            Uuid::nil()
        }
    }
}

fn reject_invalid(mut invalid: Vec<String>) -> CoreResult<()> {
    if invalid.is_empty() {
        return Ok(());
    }
    invalid.sort();
    invalid.dedup();
    Err(CoreError::InvalidFields(invalid))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
