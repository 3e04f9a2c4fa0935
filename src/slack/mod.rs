// Slack side of the bridge.
//
// `message` is the incoming-webhook payload and the composer that builds it
// from a Plex event; `client` posts it.

pub mod client;
pub mod message;
