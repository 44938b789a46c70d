use crate::{
    Error, Res,
    types::{AddTracksRequest, PlaylistTracksPage, SnapshotResponse, TrackRef},
    utils,
};

use super::SpotifyClient;

/// Items requested per playlist page.
pub const PLAYLIST_PAGE_SIZE: u32 = 50;

impl SpotifyClient {
    /// Lists every track URI currently in the playlist, in playlist order.
    ///
    /// The first page is requested with `limit=50`. After that the absolute
    /// `next` URL of each page is followed verbatim until it is `null`.
    /// Removed tracks, which Spotify reports with `track: null`, are skipped.
    pub async fn list_tracks(&self, playlist_id: &str) -> Res<Vec<TrackRef>> {
        let pb = utils::spinner(format!("Fetching tracks of playlist {}...", playlist_id));

        let mut tracks: Vec<TrackRef> = Vec::new();
        let mut next = Some(self.endpoint(&format!(
            "/playlists/{id}/tracks?limit={limit}",
            id = playlist_id,
            limit = PLAYLIST_PAGE_SIZE
        )));

        while let Some(url) = next {
            let page = match self.get_json::<PlaylistTracksPage>(&url).await {
                Ok(page) => page,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            };

            tracks.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.track)
                    .map(|track| track.uri),
            );
            pb.set_message(format!(
                "Fetching tracks of playlist {}... ({} so far)",
                playlist_id,
                tracks.len()
            ));
            next = page.next;
        }

        pb.finish_and_clear();
        Ok(tracks)
    }

    /// Appends `tracks` to the end of the playlist with a single request.
    ///
    /// Batching is up to the caller; Spotify accepts at most 100 URIs per call.
    /// Returns the new snapshot id when Spotify reports one.
    pub async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackRef]) -> Res<Option<String>> {
        let api_url = self.endpoint(&format!("/playlists/{}/tracks", playlist_id));

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&AddTracksRequest { uris: tracks })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<SnapshotResponse>(&body)
            .ok()
            .and_then(|r| r.snapshot_id))
    }
}
