//! Error types shared by the Discord and Spotify clients.

use reqwest::StatusCode;
use thiserror::Error;

/// Fatal errors. Any of these aborts a sync run.
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential was not configured.
    #[error("{0} must be set")]
    MissingCredential(&'static str),

    /// The search endpoint kept answering 429 for the same page.
    #[error("rate limited {attempts} times for search offset {offset}, giving up")]
    RateLimitExhausted { offset: u64, attempts: u32 },

    /// Any non-success status other than a retried 429.
    #[error("request to {url} failed with status {status}: {body}")]
    Http {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// The album-tracks endpoint returned no items.
    #[error("album {0} has no tracks")]
    EmptyAlbum(String),

    #[error("HTTP client error: {0}")]
    Request(#[from] reqwest::Error),
}

impl Error {
    /// Builds an [`Error::Http`] from a failed response, consuming its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Error::Http { status, url, body }
    }
}
