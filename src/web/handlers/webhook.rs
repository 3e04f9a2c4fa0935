// POST / — inbound Plex webhook.
//
// Reads the `payload` form field and hands it to the bridge. Other parts
// (the `thumb` image Plex attaches to some events) are drained and ignored.
//
// 200 {"status": "dispatched" | "skipped"} on success,
// 400 when the form or payload can't be decoded,
// 413 when the body is over the size limit,
// 502 when Slack couldn't be reached or refused the message.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::bridge::{relay, BridgeError};
use crate::web::AppState;

/// Name of the form field carrying the JSON document.
pub const PAYLOAD_FIELD: &str = "payload";

/// POST / — relay one Plex event to Slack.
pub async fn receive(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let payload = match read_payload(multipart).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable webhook form");
            return e.into_response();
        }
    };

    match relay(&payload, &state.config, state.notifier.as_ref()).await {
        Ok(outcome) => Json(serde_json::json!({ "status": outcome.as_str() })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Pull the text of the `payload` field out of the multipart form.
async fn read_payload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, BridgeError> {
    let mut multipart = multipart.map_err(|e| form_error(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| form_error(e.status(), e.body_text()))?
    {
        if field.name() == Some(PAYLOAD_FIELD) {
            return field
                .text()
                .await
                .map_err(|e| form_error(e.status(), e.body_text()));
        }
    }

    Err(form_error(
        StatusCode::BAD_REQUEST,
        format!("missing `{PAYLOAD_FIELD}` form field"),
    ))
}

fn form_error(status: StatusCode, message: String) -> BridgeError {
    BridgeError::Form {
        status: status.as_u16(),
        message,
    }
}
