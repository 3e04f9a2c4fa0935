// plexhook: relay Plex media-server webhooks to Slack.
//
// This is the library root. `plex` and `slack` model the two webhook
// schemas, `bridge` turns one into the other, and `web` is the HTTP
// endpoint Plex posts to.

pub mod bridge;
pub mod config;
pub mod plex;
pub mod slack;
pub mod web;
