//! Handlers for creating, resolving and deleting share entries.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use cgshare_core::entry::EntryType;
use cgshare_core::requests::{CreateGameEntry, CreateSessionEntry, CreateSpectateEntry};
use cgshare_core::resolution::Resolution;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::{CreatedResponse, DataResponse, MessageResponse};
use crate::service;
use crate::state::AppState;

/// Query parameters of `GET /{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveParams {
    /// Expected entry type (`game`, `spectate` or `session`).
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

/// Body of `DELETE /{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteEntryRequest {
    pub password: String,
}

/// POST /game
pub async fn create_game(
    State(state): State<AppState>,
    body: Result<Json<CreateGameEntry>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = body?;
    let id = service::create_game_entry(&state, request).await?;
    Ok(created(id))
}

/// POST /spectate
pub async fn create_spectate(
    State(state): State<AppState>,
    body: Result<Json<CreateSpectateEntry>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = body?;
    let id = service::create_spectate_entry(&state, request).await?;
    Ok(created(id))
}

/// POST /session
pub async fn create_session(
    State(state): State<AppState>,
    body: Result<Json<CreateSessionEntry>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = body?;
    let id = service::create_session_entry(&state, request).await?;
    Ok(created(id))
}

/// GET /{id}
///
/// Resolves the entry into a landing-page view, a redirect, or the raw
/// session. Soft failures are returned as `{"error": ...}` with status 200.
pub async fn resolve_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ResolveParams>,
) -> AppResult<Response> {
    let expected = params
        .entry_type
        .as_deref()
        .map(str::parse::<EntryType>)
        .transpose()?;

    let response = match service::resolve_entry(&state, &id, expected).await? {
        Resolution::RenderView(view) => Json(DataResponse { data: view }).into_response(),
        Resolution::Redirect(target) => Redirect::temporary(&target).into_response(),
        Resolution::RawData(session) => Json(session).into_response(),
        Resolution::SoftError(error) => Json(MessageResponse { error }).into_response(),
    };
    Ok(response)
}

/// DELETE /{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DeleteEntryRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = body?;
    service::delete_entry(&state, &id, &request.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /
pub async fn readme(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.config.readme_url)
}

fn created(id: String) -> (StatusCode, Json<CreatedResponse>) {
    (StatusCode::CREATED, Json(CreatedResponse { id }))
}
