use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No live entry with this id. Expired entries and type-filter mismatches
    /// are reported the same way.
    #[error("No entry stored at {id}.")]
    NotFound { id: String },

    /// The submitted payload references remote state that does not exist.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Required request fields are missing or malformed.
    #[error("invalid-fields: {}", .0.join(","))]
    InvalidFields(Vec<String>),

    /// A `type` filter value that names no entry type.
    #[error("Unknown entry type: {0}")]
    UnknownEntryType(String),

    /// Stored payload bytes do not parse into the shape of the stored type.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The supplied password does not unlock the entry.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Hashing failure: {0}")]
    Hashing(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
