#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use fauna_api::config::ServerConfig;
use fauna_api::router::build_app_router;
use fauna_api::state::AppState;
use fauna_db::Db;

/// Connection string used when no live server is needed. The driver connects
/// lazily, so requests that fail validation never touch it.
const UNREACHABLE_URI: &str = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(uri: &str, database: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        mongodb_uri: uri.to_string(),
        mongodb_database: database.to_string(),
    }
}

/// Build the full application router against the given database.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub async fn build_app(uri: &str, database: &str) -> (Router, Db) {
    let config = test_config(uri, database);
    let handle = fauna_db::connect(uri, database).await.unwrap();
    let db = Db::new(handle, Duration::from_secs(config.request_timeout_secs));

    let state = AppState {
        db: db.clone(),
        config: Arc::new(config.clone()),
    };

    (build_app_router(state, &config), db)
}

/// Application whose store is unreachable; for tests that must not need one.
pub async fn build_offline_app() -> Router {
    build_app(UNREACHABLE_URI, "fauna_offline").await.0
}

/// Application backed by a fresh, uniquely named database on `MONGODB_URI`.
///
/// Call [`drop_database`] at the end of the test.
pub async fn build_live_app() -> (Router, Db) {
    let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set for store tests");
    let database = format!("fauna_test_{}", mongodb::bson::oid::ObjectId::new().to_hex());
    build_app(&uri, &database).await
}

pub async fn drop_database(db: &Db) {
    db.database().drop().await.unwrap();
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
