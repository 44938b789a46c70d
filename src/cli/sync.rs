use std::collections::HashMap;

use chrono::NaiveDate;
use tabled::Table;

use crate::{
    Res,
    config::Settings,
    discord::SearchClient,
    info, links,
    spotify::SpotifyClient,
    types::{Message, PendingTrackRow, SyncReport, TrackRef},
    utils, warning,
};

/// Search keyword used to find candidate messages.
///
/// Discord's search does keyword matching, not pattern matching, so this can
/// both over-match (text mentioning the host without a usable link, which the
/// link parser then rejects) and under-match (links written without the
/// `https://open.spotify.com` prefix are never returned). Override it with
/// `--query` when a server formats links differently.
pub const DEFAULT_SEARCH_QUERY: &str = "https://open.spotify.com";

/// Tracks written per playlist request.
pub const ADD_BATCH_SIZE: usize = 25;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub server_id: String,
    pub playlist_id: String,
    pub query: String,
    /// Ignore messages sent before this day (UTC).
    pub since: Option<NaiveDate>,
    /// Compute and show the pending tracks without writing them.
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn new(server_id: impl Into<String>, playlist_id: impl Into<String>) -> Self {
        SyncOptions {
            server_id: server_id.into(),
            playlist_id: playlist_id.into(),
            query: DEFAULT_SEARCH_QUERY.to_string(),
            since: None,
            dry_run: false,
        }
    }
}

/// Builds both clients from `settings` and runs one sync.
///
/// Missing credentials are reported before any request is sent.
pub async fn run_sync(settings: &Settings, options: &SyncOptions) -> Res<SyncReport> {
    let search = SearchClient::new(&settings.discord_api_url, settings.discord_token.clone())?;
    let spotify = SpotifyClient::new(&settings.spotify_api_url, settings.spotify_token.clone())?;

    sync(&search, &spotify, options).await
}

/// Copies every Spotify track linked in the server into the playlist.
///
/// 1. Search the server for candidate messages.
/// 2. Extract one track per message; messages that yield none are skipped
///    with a warning.
/// 3. Drop tracks the playlist already contains.
/// 4. Append the rest in batches of [`ADD_BATCH_SIZE`].
///
/// Running it again without new messages writes nothing, since the diff is
/// always taken against the live playlist.
pub async fn sync(
    search: &SearchClient,
    spotify: &SpotifyClient,
    options: &SyncOptions,
) -> Res<SyncReport> {
    let mut report = SyncReport::default();

    info!("Retrieving messages with Spotify links from Discord...");
    let mut messages = search.search(&options.server_id, &options.query).await?;
    if let Some(since) = options.since {
        let dropped = utils::retain_messages_since(&mut messages, since);
        if dropped > 0 {
            info!("Ignoring {} messages sent before {}.", dropped, since);
        }
    }
    report.messages = messages.len();
    info!("{} possibly relevant messages retrieved.", messages.len());

    info!("Extracting Spotify tracks from messages...");
    let mut sources: HashMap<TrackRef, &Message> = HashMap::new();
    for message in &messages {
        match links::extract(message, spotify).await {
            Ok(track) => {
                sources.entry(track).or_insert(message);
            }
            Err(e) => {
                report.skipped += 1;
                warning!(
                    "Could not parse message from {} at {}: {}",
                    message.author,
                    message.timestamp,
                    e
                );
            }
        }
    }
    report.unique_tracks = sources.len();
    info!("{} unique Spotify tracks extracted.", sources.len());

    info!("Retrieving existing tracks from playlist {}...", options.playlist_id);
    let existing = spotify.list_tracks(&options.playlist_id).await?;
    let to_add = utils::tracks_to_add(sources.keys().cloned(), &existing);
    report.already_present = report.unique_tracks - to_add.len();

    if to_add.is_empty() {
        info!("Playlist is already up to date.");
        return Ok(report);
    }

    if options.dry_run {
        let rows: Vec<PendingTrackRow> = to_add
            .iter()
            .map(|track| {
                let source = sources.get(track);
                PendingTrackRow {
                    uri: track.to_string(),
                    author: source.map(|m| m.author.clone()).unwrap_or_default(),
                    posted: source.map(|m| m.timestamp.clone()).unwrap_or_default(),
                }
            })
            .collect();
        println!("{}", Table::new(rows));
        info!("Dry run: {} tracks would be added.", to_add.len());
        return Ok(report);
    }

    info!("Adding {} new tracks.", to_add.len());
    let batches_total = to_add.len().div_ceil(ADD_BATCH_SIZE);
    let pb = utils::spinner(format!("Adding tracks (0/{})", batches_total));
    for batch in utils::batches(&to_add, ADD_BATCH_SIZE) {
        if let Err(e) = spotify.add_tracks(&options.playlist_id, batch).await {
            pb.finish_and_clear();
            return Err(e);
        }
        report.added += batch.len();
        report.batches += 1;
        pb.set_message(format!(
            "Adding tracks ({}/{})",
            report.batches, batches_total
        ));
    }
    pb.finish_and_clear();

    Ok(report)
}
