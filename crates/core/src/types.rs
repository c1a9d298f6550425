/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Lifespan of a stored entry in seconds (24 hours).
pub const ENTRY_LIFESPAN_SECS: i64 = 24 * 60 * 60;
