use std::{
    collections::{BTreeSet, HashSet},
    time::Duration,
};

use chrono::{DateTime, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{Res, types::Message, types::TrackRef};

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client shared by the Discord and Spotify clients.
pub fn http_client() -> Res<Client> {
    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;
    Ok(client)
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Tracks that were extracted from chat but are not yet in the playlist.
///
/// Duplicates in `extracted` collapse to one entry. The result is sorted so
/// that repeated runs write in the same order.
pub fn tracks_to_add(
    extracted: impl IntoIterator<Item = TrackRef>,
    existing: &[TrackRef],
) -> Vec<TrackRef> {
    let existing: HashSet<&TrackRef> = existing.iter().collect();
    extracted
        .into_iter()
        .filter(|track| !existing.contains(track))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Splits `tracks` into consecutive batches of at most `size` items.
///
/// Every batch except the last holds exactly `size` tracks.
pub fn batches(tracks: &[TrackRef], size: usize) -> std::slice::Chunks<'_, TrackRef> {
    tracks.chunks(size.max(1))
}

/// Parses a `YYYY-MM-DD` command line date.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", value, e))
}

/// Date (UTC) a message was sent, if its timestamp is valid RFC 3339.
pub fn message_date(message: &Message) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&message.timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Drops messages sent before `since`. Messages without a readable
/// timestamp are kept. Returns how many were dropped.
pub fn retain_messages_since(messages: &mut Vec<Message>, since: NaiveDate) -> usize {
    let before = messages.len();
    messages.retain(|m| message_date(m).is_none_or(|date| date >= since));
    before - messages.len()
}
