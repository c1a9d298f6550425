//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body returned after an entry is created.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Soft, user-facing failure returned with a success status.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub error: String,
}
