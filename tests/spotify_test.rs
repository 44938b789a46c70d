use serde_json::{Value, json};
use spotsync::Error;
use spotsync::links::AlbumResolver;
use spotsync::spotify::SpotifyClient;
use spotsync::types::TrackRef;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(server.uri(), Some("spotify-token".to_string())).unwrap()
}

fn item(uri: &str) -> Value {
    json!({ "added_at": "2024-01-01T00:00:00Z", "track": { "id": "x", "uri": uri } })
}

#[tokio::test]
async fn test_list_tracks_follows_next_until_null() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlists/pl1/tracks"))
        .and(query_param("limit", "50"))
        .and(header("Authorization", "Bearer spotify-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                item("spotify:track:a"),
                item("spotify:track:b"),
                { "added_at": "2024-01-01T00:00:00Z", "track": null },
            ],
            "next": format!("{}/cursor/page-2?token=opaque", server.uri()),
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cursor/page-2"))
        .and(query_param("token", "opaque"))
        .and(header("Authorization", "Bearer spotify-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [item("spotify:track:c")],
            "next": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = client(&server).list_tracks("pl1").await.unwrap();

    let uris: Vec<&str> = tracks.iter().map(TrackRef::as_str).collect();
    assert_eq!(uris, vec!["spotify:track:a", "spotify:track:b", "spotify:track:c"]);
}

#[tokio::test]
async fn test_list_tracks_empty_playlist() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlists/empty/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [], "next": null })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server).list_tracks("empty").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_tracks_fails_on_error_in_later_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlists/pl1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [item("spotify:track:a")],
            "next": format!("{}/cursor/page-2", server.uri()),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cursor/page-2"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).list_tracks("pl1").await;

    assert!(matches!(result, Err(Error::Http { status, .. }) if status.as_u16() == 502));
}

#[tokio::test]
async fn test_add_tracks_posts_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/playlists/pl1/tracks"))
        .and(header("Authorization", "Bearer spotify-token"))
        .and(body_json(json!({ "uris": ["spotify:track:a", "spotify:track:b"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = vec![TrackRef::from("spotify:track:a"), TrackRef::from("spotify:track:b")];
    let snapshot = client(&server).add_tracks("pl1", &tracks).await.unwrap();

    assert_eq!(snapshot.as_deref(), Some("snap-1"));
}

#[tokio::test]
async fn test_add_tracks_failure_is_returned() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/playlists/pl1/tracks"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "status": 403, "message": "You cannot add tracks to a playlist you don't own." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = vec![TrackRef::from("spotify:track:a")];
    let result = client(&server).add_tracks("pl1", &tracks).await;

    match result {
        Err(Error::Http { status, body, .. }) => {
            assert_eq!(status.as_u16(), 403);
            assert!(body.contains("don't own"));
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_first_track_of_album() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/alb1/tracks"))
        .and(header("Authorization", "Bearer spotify-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "uri": "spotify:track:opener", "track_number": 1 },
                { "uri": "spotify:track:second", "track_number": 2 },
            ],
            "next": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let track = client(&server).first_track_of_album("alb1").await.unwrap();

    assert_eq!(track, TrackRef::from("spotify:track:opener"));
}

#[tokio::test]
async fn test_first_track_of_empty_album() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/void/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let result = client(&server).first_track_of_album("void").await;

    assert!(matches!(result, Err(Error::EmptyAlbum(id)) if id == "void"));
}

#[test]
fn test_missing_token_is_config_error() {
    let result = SpotifyClient::new("http://127.0.0.1:9", None);

    assert!(matches!(
        result,
        Err(Error::MissingCredential("SPOTIFY_BEARER_TOKEN"))
    ));
}
