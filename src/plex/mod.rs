// Plex webhook side of the bridge.
//
// `event` holds the decoded inbound document, `action` maps its raw event
// identifier onto the closed set of actions the bridge knows how to render.

pub mod action;
pub mod event;
