use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A Spotify URI naming exactly one playable track, e.g. `spotify:track:4uLU6hMCjMI75M1A2tKUQC`.
///
/// Two references are equal iff their string forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackRef(String);

impl TrackRef {
    pub fn new(uri: impl Into<String>) -> Self {
        TrackRef(uri.into())
    }

    /// Canonical reference for a bare track id.
    pub fn track(id: &str) -> Self {
        TrackRef(format!("spotify:track:{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackRef {
    fn from(uri: &str) -> Self {
        TrackRef::new(uri)
    }
}

impl From<String> for TrackRef {
    fn from(uri: String) -> Self {
        TrackRef(uri)
    }
}

/// One chat message returned by the Discord search endpoint.
#[derive(Debug, Clone)]
pub struct Message {
    pub author: String,
    pub text: String,
    pub timestamp: String,
    /// The untouched message object as Discord sent it.
    pub raw: serde_json::Value,
}

impl Message {
    /// Builds a message from one raw search record, keeping the record itself in `raw`.
    pub fn from_raw(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let record = MessageRecord::deserialize(&raw)?;
        Ok(Message {
            author: record.author.username,
            text: record.content,
            timestamp: record.timestamp,
            raw,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_results: u64,
    /// Each hit is wrapped in its own array; only element 0 is meaningful.
    #[serde(default)]
    pub messages: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    pub author: MessageAuthor,
    #[serde(default)]
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageAuthor {
    pub username: String,
}

/// Body of a Discord 429 response.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitBody {
    pub retry_after: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// `null` for tracks that were removed from the catalog.
    #[serde(default)]
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub uri: TrackRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumTracksPage {
    pub items: Vec<AlbumTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumTrack {
    pub uri: TrackRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest<'a> {
    pub uris: &'a [TrackRef],
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: Option<String>,
}

#[derive(Tabled)]
pub struct PendingTrackRow {
    pub uri: String,
    pub author: String,
    pub posted: String,
}

/// Counters collected over one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub messages: usize,
    pub skipped: usize,
    pub unique_tracks: usize,
    pub already_present: usize,
    pub added: usize,
    pub batches: usize,
}
