//! # Spotify Integration Module
//!
//! A small typed client for the parts of the Spotify Web API that a playlist
//! sync touches:
//!
//! - `GET /playlists/{id}/tracks` - current playlist contents, cursor paginated
//! - `POST /playlists/{id}/tracks` - append tracks
//! - `GET /albums/{id}/tracks` - first track of an album linked in chat
//!
//! Every request carries the same bearer token, supplied when the client is
//! created. Responses are deserialized into the records in [`crate::types`].
//! Non-success statuses are returned as [`Error::Http`] and never retried.

pub mod albums;
pub mod playlist;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{Error, Res, utils};

pub use playlist::PLAYLIST_PAGE_SIZE;

pub struct SpotifyClient {
    client: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    /// Creates a client for the API rooted at `api_url`
    /// (normally `https://api.spotify.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when `token` is `None`.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Res<Self> {
        let token = token.ok_or(Error::MissingCredential("SPOTIFY_BEARER_TOKEN"))?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(SpotifyClient {
            client: utils::http_client()?,
            api_url,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GETs an absolute URL and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Res<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        Ok(response.json::<T>().await?)
    }
}
