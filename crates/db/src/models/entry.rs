//! Row model for the `entries` table.

use cgshare_core::entry::EntryType;
use sqlx::FromRow;

/// A row from the `entries` table.
///
/// `data` holds the encoded payload; decode it with
/// [`cgshare_core::codec::decode`] using [`Entry::kind`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Entry {
    pub id: String,
    /// Creation time, Unix seconds.
    pub created: i64,
    #[sqlx(rename = "type")]
    pub entry_type: i64,
    /// PHC-formatted password hash, if the creator set a password.
    pub password_hash: Option<String>,
    pub data: Vec<u8>,
}

impl Entry {
    /// The stored discriminant, or `None` if the row carries an unknown code.
    pub fn kind(&self) -> Option<EntryType> {
        EntryType::from_code(self.entry_type)
    }
}

/// Values for a row about to be inserted.
#[derive(Debug, Clone)]
pub struct CreateEntry<'a> {
    pub id: &'a str,
    pub created: i64,
    pub entry_type: EntryType,
    pub password_hash: Option<&'a str>,
    pub data: &'a [u8],
}
