use crate::{
    Error, Res,
    links::AlbumResolver,
    types::{AlbumTracksPage, TrackRef},
};

use super::SpotifyClient;

impl AlbumResolver for SpotifyClient {
    /// First track of the album in catalog order, from `GET /albums/{id}/tracks`.
    async fn first_track_of_album(&self, album_id: &str) -> Res<TrackRef> {
        let url = self.endpoint(&format!("/albums/{}/tracks", album_id));
        let page = self.get_json::<AlbumTracksPage>(&url).await?;

        page.items
            .into_iter()
            .next()
            .map(|track| track.uri)
            .ok_or_else(|| Error::EmptyAlbum(album_id.to_string()))
    }
}
