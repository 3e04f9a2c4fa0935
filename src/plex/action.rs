// Event classification — raw Plex event identifiers to bridge actions.
//
// Plex sends many more events than the six we render (library.new,
// admin.database.backup, media.seek on some clients, ...). Those classify
// as `Unrecognized` rather than failing: they still compose into a
// notification, but no toggle exists for them so they are never delivered.

use super::event::Metadata;

/// Playback/rating actions the bridge knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Play,
    Pause,
    Resume,
    Stop,
    /// Plex's `media.scrobble`: the item was watched past the 90% mark.
    Finished,
    Rated,
    Unrecognized,
}

impl Action {
    /// Every action that has a delivery toggle.
    pub const RECOGNIZED: [Action; 6] = [
        Action::Play,
        Action::Pause,
        Action::Resume,
        Action::Stop,
        Action::Finished,
        Action::Rated,
    ];

    /// Classify a raw Plex event identifier.
    pub fn classify(event: &str) -> Self {
        match event {
            "media.play" => Action::Play,
            "media.pause" => Action::Pause,
            "media.resume" => Action::Resume,
            "media.stop" => Action::Stop,
            "media.scrobble" => Action::Finished,
            "media.rate" => Action::Rated,
            _ => Action::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Stop => "stop",
            Action::Finished => "finished",
            Action::Rated => "rated",
            Action::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-readable title for the media item.
///
/// Episodes read as "Pilot from Season 1 of Show X"; everything else uses
/// the item title as-is.
pub fn display_title(metadata: &Metadata) -> String {
    if metadata.media_type == "episode" {
        format!(
            "{} from {} of {}",
            metadata.title, metadata.parent_title, metadata.grandparent_title
        )
    } else {
        metadata.title.clone()
    }
}
