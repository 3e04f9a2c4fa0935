// Plex webhook payload — the JSON document Plex posts in the `payload` form field.
//
// Plex capitalises the nested object keys (`Account`, `Metadata`, ...) but
// uses camelCase inside them. Every field is optional on the wire: Plex omits
// whatever doesn't apply to the media item (movies have no parentTitle, music
// has no summary, etc.), so missing fields decode to their defaults. Some
// clients send explicit nulls instead of omitting a field; those decode to
// the default too.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single webhook delivery from the Plex Media Server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexEvent {
    /// Raw event identifier, e.g. `media.play` or `media.scrobble`
    #[serde(deserialize_with = "null_as_default")]
    pub event: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: bool,
    #[serde(rename = "Account", deserialize_with = "null_as_default")]
    pub account: Account,
    #[serde(rename = "Server", deserialize_with = "null_as_default")]
    pub server: Server,
    #[serde(rename = "Player", deserialize_with = "null_as_default")]
    pub player: Player,
    #[serde(rename = "Metadata", deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

impl PlexEvent {
    /// Decode a raw `payload` document.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

/// The Plex account that triggered the event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Avatar URL
    #[serde(deserialize_with = "null_as_default")]
    pub thumb: String,
    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
}

/// The client device playing the media.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    #[serde(deserialize_with = "null_as_default")]
    pub local: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub public_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
}

/// Library metadata for the media item.
///
/// For episodes, `parent_title` is the season and `grandparent_title` the
/// series. For music tracks they are the album and artist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    #[serde(deserialize_with = "null_as_default")]
    pub library_section_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub library_section_title: String,
    #[serde(rename = "librarySectionID", deserialize_with = "null_as_default")]
    pub library_section_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rating_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_rating_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grandparent_rating_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub guid: String,
    /// Media kind: `movie`, `episode`, `track`, ...
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub media_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grandparent_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grandparent_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_index: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rating_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub thumb: String,
    #[serde(deserialize_with = "null_as_default")]
    pub art: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_thumb: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grandparent_thumb: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grandparent_art: String,
    #[serde(deserialize_with = "null_as_default")]
    pub added_at: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: i64,
}
