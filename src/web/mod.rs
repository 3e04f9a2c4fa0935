// Web server — Axum endpoint that receives Plex webhooks.
//
// Plex posts a multipart form to the configured URL; the JSON document is in
// the `payload` field. Each request runs the bridge pipeline independently,
// the shared state is read-only after startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bridge::BridgeError;
use crate::config::Config;
use crate::slack::client::Notifier;

pub mod handlers;

/// Largest accepted webhook body. Plex attaches a JPEG thumbnail to some
/// events alongside the JSON payload.
pub const MAX_BODY_BYTES: usize = 15_485_760;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Arc<dyn Notifier>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, notifier: Arc<dyn Notifier>) -> Result<()> {
    let addr = format!("{}:{}", config.bind, config.port);
    let state = AppState {
        config: Arc::new(config),
        notifier,
    };

    let app = build_router(state);

    info!("plexhook listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::webhook::receive))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = match &self {
            BridgeError::Json(_) => StatusCode::BAD_REQUEST,
            BridgeError::Form { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            BridgeError::Dispatch(_) => StatusCode::BAD_GATEWAY,
        };
        api_error(status, &self.to_string())
    }
}
