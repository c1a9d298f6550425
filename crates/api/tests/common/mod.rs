#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cgshare_core::clock::ManualClock;
use cgshare_core::gameserver::GameServerApi;
use cgshare_core::testing::FakeGameServer;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cgshare_api::config::ServerConfig;
use cgshare_api::router::build_app_router;
use cgshare_api::state::AppState;
use cgshare_api::store::EntryStore;

pub const README_URL: &str = "https://example.com/readme";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        remote_timeout_secs: 5,
        readme_url: README_URL.to_string(),
    }
}

/// A running test application plus the handles tests steer it with.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub game_server: Arc<FakeGameServer>,
    pub state: AppState,
}

/// Build the full application router over an in-memory database, a manual
/// clock and the given fake game server.
pub async fn build_test_app(game_server: FakeGameServer) -> TestApp {
    let config = test_config();
    let pool = cgshare_db::create_memory_pool().await.unwrap();
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let game_server = Arc::new(game_server);
    let api: Arc<dyn GameServerApi> = game_server.clone();

    let state = AppState {
        store: EntryStore::new(pool.clone(), clock.clone()),
        pool,
        game_server: api,
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        clock,
        game_server,
        state,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, json).await
}

pub async fn delete_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_json(app, Method::DELETE, uri, json).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    json: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an entry and return its id, asserting a 201.
pub async fn create(app: &TestApp, uri: &str, json: serde_json::Value) -> String {
    let response = post_json(app.router.clone(), uri, json).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"]
        .as_str()
        .expect("id should be a string")
        .to_string()
}
