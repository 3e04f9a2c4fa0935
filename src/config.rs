use std::env;

use anyhow::Result;

use crate::plex::action::Action;
use crate::slack::message::DEFAULT_USERNAME;

/// Listen address used when PLEXHOOK_BIND is unset.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Listen port used when PORT is unset (Plex webhooks default to plain HTTP).
pub const DEFAULT_PORT: u16 = 80;

/// Per-action "send enabled" switches.
///
/// Built once at startup and read-only afterwards. Unrecognized actions have
/// no switch and are always disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionToggles {
    pub play: bool,
    pub pause: bool,
    pub resume: bool,
    pub stop: bool,
    pub finished: bool,
    pub rated: bool,
}

impl ActionToggles {
    /// Environment variable that controls the toggle for `action`.
    ///
    /// Finished uses SEND_VIEWED, Plex calls the underlying event a "scrobble"
    /// and existing deployments already set that name.
    pub fn env_key(action: Action) -> Option<&'static str> {
        match action {
            Action::Play => Some("SEND_PLAY"),
            Action::Pause => Some("SEND_PAUSE"),
            Action::Resume => Some("SEND_RESUME"),
            Action::Stop => Some("SEND_STOP"),
            Action::Finished => Some("SEND_VIEWED"),
            Action::Rated => Some("SEND_RATED"),
            Action::Unrecognized => None,
        }
    }

    /// Read every toggle through `lookup`; missing keys are disabled.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |action: Action| {
            Self::env_key(action)
                .and_then(&lookup)
                .is_some_and(|v| parse_flag(&v))
        };

        Self {
            play: flag(Action::Play),
            pause: flag(Action::Pause),
            resume: flag(Action::Resume),
            stop: flag(Action::Stop),
            finished: flag(Action::Finished),
            rated: flag(Action::Rated),
        }
    }

    /// Whether messages for `action` should be delivered.
    pub fn is_enabled(&self, action: Action) -> bool {
        match action {
            Action::Play => self.play,
            Action::Pause => self.pause,
            Action::Resume => self.resume,
            Action::Stop => self.stop,
            Action::Finished => self.finished,
            Action::Rated => self.rated,
            Action::Unrecognized => false,
        }
    }
}

/// Toggle values are enabled only when they read "true" (any case).
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy before this runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Slack incoming-webhook URL (SLACK_URL)
    pub slack_url: String,
    /// Sender display name on posted messages (PLEXHOOK_USERNAME, default "Plex")
    pub username: String,
    pub toggles: ActionToggles,
    /// Listen address (PLEXHOOK_BIND)
    pub bind: String,
    /// Listen port (PORT)
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Only PORT can fail to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {raw:?}: {e}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            slack_url: lookup("SLACK_URL").unwrap_or_default(),
            username: lookup("PLEXHOOK_USERNAME")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            toggles: ActionToggles::from_lookup(&lookup),
            bind: lookup("PLEXHOOK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port,
        })
    }

    /// Check that the Slack webhook URL is configured.
    /// Call this before starting the server.
    pub fn require_slack_url(&self) -> Result<()> {
        if self.slack_url.trim().is_empty() {
            anyhow::bail!(
                "SLACK_URL not set. Add your Slack incoming-webhook URL to the .env file.\n\
                 See .env.example for the available variables."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE\n"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_every_recognized_action_has_an_env_key() {
        for action in Action::RECOGNIZED {
            assert!(ActionToggles::env_key(action).is_some());
        }
        assert!(ActionToggles::env_key(Action::Unrecognized).is_none());
    }
}
