use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness report for the share-link service.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` while the entry table answers, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// Entries can be stored and resolved.
    pub db_healthy: bool,
}

/// GET /health. Reports whether share links can currently be served.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match cgshare_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Entry database is not answering");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
