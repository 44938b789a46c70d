//! Configuration management for spotsync.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Credentials are read here once and handed to the clients explicitly, so
//! nothing below this module touches the process environment.

use std::{env, path::PathBuf};

pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v9";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ID: &str = "689619583841337505";
pub const DEFAULT_PLAYLIST_ID: &str = "1o1LieydFE80e9PoCMBmt0";

/// Loads environment variables from `.env` in the local data directory.
///
/// The directory is created if missing. A missing `.env` file is fine, since
/// all values may come from the real environment. A file that exists but
/// cannot be parsed is reported as an error.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/spotsync/.env`
/// - macOS: `~/Library/Application Support/spotsync/.env`
/// - Windows: `%LOCALAPPDATA%/spotsync/.env`
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotsync/.env");
    path
}

/// Returns a variable's value, treating an empty string as unset.
fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Personal Discord token sent verbatim in the `Authorization` header.
pub fn discord_token() -> Option<String> {
    non_empty("DISCORD_BEARER_TOKEN")
}

/// Spotify access token, sent as `Bearer {token}`.
pub fn spotify_token() -> Option<String> {
    non_empty("SPOTIFY_BEARER_TOKEN")
}

pub fn discord_apiurl() -> String {
    non_empty("DISCORD_API_URL").unwrap_or_else(|| DEFAULT_DISCORD_API_URL.to_string())
}

pub fn spotify_apiurl() -> String {
    non_empty("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())
}

pub fn server_id() -> String {
    non_empty("DISCORD_SERVER_ID").unwrap_or_else(|| DEFAULT_SERVER_ID.to_string())
}

pub fn playlist_id() -> String {
    non_empty("SPOTIFY_PLAYLIST_ID").unwrap_or_else(|| DEFAULT_PLAYLIST_ID.to_string())
}

/// Everything a sync run needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_api_url: String,
    pub spotify_api_url: String,
    pub discord_token: Option<String>,
    pub spotify_token: Option<String>,
    pub server_id: String,
    pub playlist_id: String,
}

impl Settings {
    /// Snapshot of the current environment.
    pub fn from_env() -> Self {
        Settings {
            discord_api_url: discord_apiurl(),
            spotify_api_url: spotify_apiurl(),
            discord_token: discord_token(),
            spotify_token: spotify_token(),
            server_id: server_id(),
            playlist_id: playlist_id(),
        }
    }
}
