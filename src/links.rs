//! Turning a chat message into a Spotify track reference.
//!
//! The first `http(s)://` URL in the message decides. Its path must have the
//! shape `/{type}/{id}`; `track` links map straight to a `spotify:track:` URI
//! and `album` links are resolved to the album's first track through an
//! [`AlbumResolver`].

use std::{borrow::Cow, future::Future, sync::LazyLock};

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::{
    Error,
    types::{Message, TrackRef},
};

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("URL pattern is valid"));

/// Looks up a representative track for an album.
pub trait AlbumResolver {
    fn first_track_of_album(
        &self,
        album_id: &str,
    ) -> impl Future<Output = Result<TrackRef, Error>> + Send;
}

/// Why a message produced no track. None of these are fatal to a sync.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("no link found in message")]
    NoMatch,

    #[error("unsupported Spotify link: {0}")]
    UnsupportedLinkType(String),

    #[error("could not resolve album {album}: {source}")]
    Resolve {
        album: String,
        #[source]
        source: Error,
    },
}

/// A recognised Spotify link with its sanitized id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotifyLink {
    Track(String),
    Album(String),
}

/// Finds and classifies the first link in `text` without any network access.
pub fn parse_link(text: &str) -> Result<SpotifyLink, LinkError> {
    let raw = URL_PATTERN.find(text).ok_or(LinkError::NoMatch)?.as_str();
    let url = Url::parse(raw).map_err(|_| LinkError::UnsupportedLinkType(raw.to_string()))?;
    let path = url.path();

    // `url` percent-encodes characters such as `>`; decode them so they are
    // stripped below like any other punctuation.
    let segments: Vec<Cow<'_, str>> = path
        .split('/')
        .map(|s| urlencoding::decode(s).unwrap_or(Cow::Borrowed(s)))
        .collect();

    let [leading, kind, id] = segments.as_slice() else {
        return Err(LinkError::UnsupportedLinkType(path.to_string()));
    };
    if !leading.is_empty() {
        return Err(LinkError::UnsupportedLinkType(path.to_string()));
    }

    let id: String = id.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if id.is_empty() {
        return Err(LinkError::UnsupportedLinkType(path.to_string()));
    }

    match &**kind {
        "track" => Ok(SpotifyLink::Track(id)),
        "album" => Ok(SpotifyLink::Album(id)),
        _ => Err(LinkError::UnsupportedLinkType(path.to_string())),
    }
}

/// Extracts the track reference a message links to.
///
/// Track links never touch the network. Album links make exactly one
/// `resolver` call and return its answer unchanged; resolver failures come
/// back as [`LinkError::Resolve`].
pub async fn extract<R: AlbumResolver>(message: &Message, resolver: &R) -> Result<TrackRef, LinkError> {
    match parse_link(&message.text)? {
        SpotifyLink::Track(id) => Ok(TrackRef::track(&id)),
        SpotifyLink::Album(id) => resolver
            .first_track_of_album(&id)
            .await
            .map_err(|source| LinkError::Resolve { album: id, source }),
    }
}
