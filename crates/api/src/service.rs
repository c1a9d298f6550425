//! Entry operations shared by the HTTP handlers.
//!
//! Writes validate the payload against its game server before anything is
//! stored. Reads fetch the live entry, apply the optional type filter and
//! hand the bytes to the resolution engine, which never fails hard.

use cgshare_core::entry::EntryType;
use cgshare_core::error::CoreError;
use cgshare_core::ids::is_well_formed;
use cgshare_core::requests::{CreateGameEntry, CreateSessionEntry, CreateSpectateEntry, NewEntry};
use cgshare_core::resolution::{matches_filter, resolve, Resolution, MALFORMED_ENTRY_MESSAGE};
use cgshare_core::validation::validate;

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn create_game_entry(state: &AppState, request: CreateGameEntry) -> AppResult<String> {
    create_entry(state, request.into_new_entry()?).await
}

pub async fn create_spectate_entry(
    state: &AppState,
    request: CreateSpectateEntry,
) -> AppResult<String> {
    create_entry(state, request.into_new_entry()?).await
}

pub async fn create_session_entry(
    state: &AppState,
    request: CreateSessionEntry,
) -> AppResult<String> {
    create_entry(state, request.into_new_entry()?).await
}

/// Validate and store an entry, returning its id.
pub async fn create_entry(state: &AppState, entry: NewEntry) -> AppResult<String> {
    let entry_type = entry.payload.entry_type();
    if let Err(e) = validate(state.game_server.as_ref(), &entry.payload).await {
        tracing::info!(%entry_type, game_url = entry.payload.game_url(), reason = %e, "Entry rejected");
        return Err(CoreError::from(e).into());
    }

    let id = state
        .store
        .put(&entry.payload, entry.password.as_deref())
        .await?;
    Ok(id)
}

/// Resolve a stored entry, optionally requiring it to be of `expected` type.
///
/// A type mismatch is reported exactly like an absent entry.
pub async fn resolve_entry(
    state: &AppState,
    id: &str,
    expected: Option<EntryType>,
) -> AppResult<Resolution> {
    if !is_well_formed(id) {
        return Err(not_found(id));
    }

    let entry = match state.store.get(id).await {
        Ok(entry) => entry,
        Err(CoreError::MalformedPayload(reason)) => {
            tracing::warn!(entry_id = %id, %reason, "Stored entry is unreadable");
            return Ok(Resolution::SoftError(MALFORMED_ENTRY_MESSAGE.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    if !matches_filter(entry.entry_type, expected) {
        tracing::debug!(entry_id = %id, stored = %entry.entry_type, "Entry type filter mismatch");
        return Err(not_found(id));
    }

    Ok(resolve(state.game_server.as_ref(), entry.entry_type, &entry.data).await)
}

/// Delete a password-protected entry after checking the password.
pub async fn delete_entry(state: &AppState, id: &str, password: &str) -> AppResult<()> {
    if !is_well_formed(id) {
        return Err(not_found(id));
    }

    let entry = state.store.get(id).await?;
    let Some(hash) = entry.password_hash else {
        return Err(CoreError::Forbidden("This entry is not password protected.".into()).into());
    };

    let password = password.to_string();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .map_err(|e| CoreError::Hashing(e.to_string()))?;
    if !verified {
        tracing::info!(entry_id = %id, "Delete refused, wrong password");
        return Err(CoreError::Forbidden("Wrong password.".into()).into());
    }

    state.store.delete(id).await?;
    Ok(())
}

fn not_found(id: &str) -> AppError {
    CoreError::NotFound { id: id.to_string() }.into()
}
