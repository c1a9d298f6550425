//! Payload codec.
//!
//! Payloads are stored as JSON objects keyed by field name. The variant is
//! never inferred from the bytes: [`decode`] always selects the shape from the
//! entry's stored [`EntryType`].

use serde::de::DeserializeOwned;

use crate::entry::{EntryPayload, EntryType};
use crate::error::{CoreError, CoreResult};

/// Serialize a payload into the bytes persisted in the `data` column.
pub fn encode(payload: &EntryPayload) -> CoreResult<Vec<u8>> {
    let encoded = match payload {
        EntryPayload::Game(p) => serde_json::to_vec(p),
        EntryPayload::Spectate(p) => serde_json::to_vec(p),
        EntryPayload::Session(p) => serde_json::to_vec(p),
    };
    encoded.map_err(|e| CoreError::MalformedPayload(e.to_string()))
}

/// Parse stored bytes into the payload shape implied by `entry_type`.
pub fn decode(entry_type: EntryType, bytes: &[u8]) -> CoreResult<EntryPayload> {
    match entry_type {
        EntryType::Game => parse(bytes).map(EntryPayload::Game),
        EntryType::Spectate => parse(bytes).map(EntryPayload::Spectate),
        EntryType::Session => parse(bytes).map(EntryPayload::Session),
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> CoreResult<T> {
    serde_json::from_slice(bytes).map_err(|e| CoreError::MalformedPayload(e.to_string()))
}
