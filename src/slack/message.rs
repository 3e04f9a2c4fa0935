// Slack incoming-webhook payload and the Plex → Slack composer.
//
// Payload reference: https://api.slack.com/reference/messaging/attachments
// Each Plex event becomes one message with exactly one legacy attachment.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::plex::action::{display_title, Action};
use crate::plex::event::PlexEvent;

/// Sender display name used when none is configured.
pub const DEFAULT_USERNAME: &str = "Plex";

/// Plain-text fallback shown by clients that can't render attachments.
pub const FALLBACK_TEXT: &str = "Fallback message";

/// Slack's named attachment colors plus the custom blue used for ratings.
pub const COLOR_GOOD: &str = "good";
pub const COLOR_WARNING: &str = "warning";
pub const COLOR_DANGER: &str = "danger";
pub const COLOR_RATED: &str = "#439FE0";

/// Body posted to the Slack incoming webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub username: String,
    pub attachments: Vec<SlackAttachment>,
    /// Whether the delivery gate let this message through. Never sent to Slack.
    #[serde(skip)]
    pub send: bool,
}

/// A single legacy message attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackAttachment {
    pub fallback: String,
    pub color: String,
    pub pretext: String,
    pub author_name: String,
    pub author_link: String,
    pub author_icon: String,
    /// Headline, e.g. "Started watching Movie Y"
    pub title: String,
    pub title_link: String,
    pub text: String,
    pub image_url: String,
    pub thumb_url: String,
    pub footer: String,
    pub footer_icon: String,
    /// Unix seconds
    pub ts: i64,
}

/// Headline prefix and attachment color for an action.
///
/// `None` for unrecognized actions, which render with an empty headline
/// and no color.
pub fn action_style(action: Action) -> Option<(&'static str, &'static str)> {
    match action {
        Action::Play => Some(("Started watching", COLOR_GOOD)),
        Action::Pause => Some(("Paused", COLOR_WARNING)),
        Action::Resume => Some(("Continued watching", COLOR_GOOD)),
        Action::Stop => Some(("Stopped watching", COLOR_DANGER)),
        Action::Finished => Some(("Finished watching", COLOR_DANGER)),
        Action::Rated => Some(("Rated", COLOR_RATED)),
        Action::Unrecognized => None,
    }
}

/// Build the Slack message for a classified Plex event.
///
/// Author, body and footer come from the event regardless of the action.
/// `send` starts out false; the delivery gate sets it.
pub fn compose(username: &str, action: Action, event: &PlexEvent) -> SlackMessage {
    let (title, color) = match action_style(action) {
        Some((prefix, color)) => (
            format!("{prefix} {}", display_title(&event.metadata)),
            color.to_string(),
        ),
        None => (String::new(), String::new()),
    };

    let attachment = SlackAttachment {
        fallback: FALLBACK_TEXT.to_string(),
        color,
        author_name: event.account.title.clone(),
        author_icon: event.account.thumb.clone(),
        title,
        text: event.metadata.summary.clone(),
        footer: format!(
            "Played from {} on {}",
            event.metadata.library_section_title, event.player.title
        ),
        ts: Utc::now().timestamp(),
        ..SlackAttachment::default()
    };

    SlackMessage {
        username: username.to_string(),
        attachments: vec![attachment],
        send: false,
    }
}
