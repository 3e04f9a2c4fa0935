// Bridge pipeline — one Plex payload in, at most one Slack message out.
//
//   decode → classify → compose → gate → dispatch | skip
//
// Only decoding and dispatch can fail. Nothing is retried, and nothing
// survives past the request.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::plex::action::Action;
use crate::plex::event::PlexEvent;
use crate::slack::client::{DispatchError, Notifier};
use crate::slack::message::{compose, SlackMessage};

/// Terminal failures for a single relayed request.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The `payload` document isn't a valid Plex event.
    #[error("invalid Plex payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The webhook form couldn't be read, or has no `payload` field.
    /// `status` is the HTTP status to answer with (400, or 413 when too large).
    #[error("unreadable webhook form: {message}")]
    Form { status: u16, message: String },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}


/// What happened to a successfully processed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Dispatched,
    /// The toggle for this action is off (always the case for unrecognized events).
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Dispatched => "dispatched",
            Outcome::Skipped => "skipped",
        }
    }
}

/// A classified, composed and gated event, ready to dispatch or drop.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// Raw Plex event identifier, kept for logging
    pub event: String,
    pub action: Action,
    pub message: SlackMessage,
}

/// Decode, classify, compose and gate a raw payload. No I/O.
pub fn prepare(payload: &str, config: &Config) -> Result<Prepared, BridgeError> {
    let event = PlexEvent::from_json(payload)?;
    Ok(prepare_event(&event, config))
}

/// Classify, compose and gate an already decoded event.
pub fn prepare_event(event: &PlexEvent, config: &Config) -> Prepared {
    let action = Action::classify(&event.event);
    let mut message = compose(&config.username, action, event);
    message.send = config.toggles.is_enabled(action);

    Prepared {
        event: event.event.clone(),
        action,
        message,
    }
}

/// Run the full pipeline for one inbound payload.
pub async fn relay(
    payload: &str,
    config: &Config,
    notifier: &dyn Notifier,
) -> Result<Outcome, BridgeError> {
    debug!(payload = %payload, "Received Plex payload");

    let prepared = match prepare(payload, config) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Rejecting Plex payload");
            return Err(e);
        }
    };

    let Prepared {
        event,
        action,
        message,
    } = prepared;
    if action == Action::Unrecognized {
        // Still composed (empty headline), but there is no toggle to enable it.
        debug!(event = %event, "Unrecognized Plex event");
    }
    info!(action = %action, send = message.send, "Classified Plex event");

    if !message.send {
        info!(action = %action, "Delivery disabled for action, skipping");
        return Ok(Outcome::Skipped);
    }

    if let Err(e) = notifier.deliver(&message).await {
        warn!(action = %action, error = %e, "Slack delivery failed");
        return Err(e.into());
    }

    info!(action = %action, "Delivered to Slack");
    Ok(Outcome::Dispatched)
}
