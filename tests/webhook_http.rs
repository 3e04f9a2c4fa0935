// HTTP tests for the inbound webhook endpoint.
//
// Drives the axum router with tower's `oneshot`, posting multipart bodies
// shaped like the ones Plex sends.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use plexhook::config::{ActionToggles, Config};
use plexhook::slack::client::{DispatchError, Notifier};
use plexhook::slack::message::SlackMessage;
use plexhook::web::{build_router, AppState, MAX_BODY_BYTES};

const BOUNDARY: &str = "----PlexBoundary";

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<SlackMessage>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, message: &SlackMessage) -> Result<(), DispatchError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

struct RejectingNotifier;

#[async_trait]
impl Notifier for RejectingNotifier {
    async fn deliver(&self, _message: &SlackMessage) -> Result<(), DispatchError> {
        Err(DispatchError::Rejected {
            status: 500,
            body: "internal_error".to_string(),
        })
    }
}

fn app(toggles: ActionToggles, notifier: Arc<dyn Notifier>) -> Router {
    let config = Config {
        slack_url: "http://127.0.0.1:9/unused".to_string(),
        username: "Plex".to_string(),
        toggles,
        bind: "127.0.0.1".to_string(),
        port: 0,
    };
    build_router(AppState {
        config: Arc::new(config),
        notifier,
    })
}

fn play_only() -> ActionToggles {
    ActionToggles {
        play: true,
        ..ActionToggles::default()
    }
}

fn text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn thumb_part() -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"thumb\"; filename=\"image.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nJFIFDATA\r\n"
    )
}

fn multipart_request(parts: &[String]) -> Request<Body> {
    let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn payload(event: &str) -> String {
    serde_json::json!({
        "event": event,
        "Account": {"title": "alice", "thumb": "https://plex.tv/users/1/avatar"},
        "Player": {"title": "Plex Web"},
        "Metadata": {
            "librarySectionTitle": "TV Shows",
            "type": "episode",
            "title": "Pilot",
            "parentTitle": "Season 1",
            "grandparentTitle": "Show X"
        }
    })
    .to_string()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn enabled_event_is_dispatched() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(play_only(), notifier.clone());

    let resp = app
        .oneshot(multipart_request(&[text_part(
            "payload",
            &payload("media.play"),
        )]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "dispatched");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].attachments[0].title,
        "Started watching Pilot from Season 1 of Show X"
    );
}

#[tokio::test]
async fn disabled_event_completes_without_dispatch() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(play_only(), notifier.clone());

    let resp = app
        .oneshot(multipart_request(&[text_part(
            "payload",
            &payload("media.pause"),
        )]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "skipped");
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn thumbnail_part_is_ignored() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(play_only(), notifier.clone());

    let resp = app
        .oneshot(multipart_request(&[
            thumb_part(),
            text_part("payload", &payload("media.play")),
        ]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_payload_returns_400() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(play_only(), notifier.clone());

    let resp = app
        .oneshot(multipart_request(&[text_part("payload", "{\"event\": ")]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_payload_field_returns_400() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(play_only(), notifier.clone());

    let resp = app
        .oneshot(multipart_request(&[text_part("other", "value")]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("payload"));
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_body_returns_413() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(play_only(), notifier.clone());

    let filler = "a".repeat(MAX_BODY_BYTES + 1);
    let resp = app
        .oneshot(multipart_request(&[text_part("payload", &filler)]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json_body(resp).await["error"].is_string());
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_multipart_request_returns_400() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = app(play_only(), notifier.clone());

    let req = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header("Content-Type", "application/json")
        .body(Body::from(payload("media.play")))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn slack_failure_returns_502() {
    let app = app(play_only(), Arc::new(RejectingNotifier));

    let resp = app
        .oneshot(multipart_request(&[text_part(
            "payload",
            &payload("media.play"),
        )]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert!(json_body(resp).await["error"].is_string());
}

#[tokio::test]
async fn health_returns_ok() {
    let app = app(ActionToggles::default(), Arc::new(RecordingNotifier::default()));

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "ok");
}
