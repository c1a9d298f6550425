use axum::routing::{get, post};
use axum::Router;

use crate::handlers::entries;
use crate::state::AppState;

/// Entry routes, mounted at the root.
///
/// ```text
/// GET    /            README redirect
/// POST   /game        create a game entry
/// POST   /spectate    create a spectate entry
/// POST   /session     create a session entry
/// GET    /{id}        resolve (optional ?type=game|spectate|session)
/// DELETE /{id}        delete a password-protected entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::readme))
        .route("/game", post(entries::create_game))
        .route("/spectate", post(entries::create_spectate))
        .route("/session", post(entries::create_session))
        .route(
            "/{id}",
            get(entries::resolve_entry).delete(entries::delete_entry),
        )
}
