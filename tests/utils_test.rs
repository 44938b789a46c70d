use chrono::NaiveDate;
use spotsync::types::{Message, TrackRef};
use spotsync::utils::*;

// Helper function to create a test message
fn create_test_message(text: &str, timestamp: &str) -> Message {
    Message {
        author: "tester".to_string(),
        text: text.to_string(),
        timestamp: timestamp.to_string(),
        raw: serde_json::Value::Null,
    }
}

fn refs(uris: &[&str]) -> Vec<TrackRef> {
    uris.iter().map(|u| TrackRef::from(*u)).collect()
}

#[test]
fn test_tracks_to_add_is_set_difference() {
    let extracted = refs(&["A", "B", "C"]);
    let existing = refs(&["B", "C", "D"]);

    assert_eq!(tracks_to_add(extracted, &existing), refs(&["A"]));
}

#[test]
fn test_tracks_to_add_collapses_duplicates() {
    let extracted = refs(&["A", "B", "A", "B", "A"]);

    assert_eq!(tracks_to_add(extracted, &[]), refs(&["A", "B"]));
}

#[test]
fn test_tracks_to_add_nothing_new() {
    let extracted = refs(&["A", "B"]);
    let existing = refs(&["A", "B", "C"]);

    assert!(tracks_to_add(extracted, &existing).is_empty());
}

#[test]
fn test_second_pass_adds_nothing() {
    let extracted = refs(&["A", "B", "C", "E"]);
    let mut playlist = refs(&["B", "C", "D"]);

    let first = tracks_to_add(extracted.clone(), &playlist);
    assert_eq!(first, refs(&["A", "E"]));

    playlist.extend(first);
    assert!(tracks_to_add(extracted, &playlist).is_empty());
}

#[test]
fn test_batches_thirty_tracks_makes_two_batches() {
    let tracks: Vec<TrackRef> = (0..30).map(|i| TrackRef::track(&format!("t{i}"))).collect();

    let sizes: Vec<usize> = batches(&tracks, 25).map(|b| b.len()).collect();
    assert_eq!(sizes, vec![25, 5]);
}

#[test]
fn test_batches_keep_every_track() {
    let tracks: Vec<TrackRef> = (0..50).map(|i| TrackRef::track(&format!("t{i}"))).collect();

    let all: Vec<TrackRef> = batches(&tracks, 25).flatten().cloned().collect();
    assert_eq!(all, tracks);
    assert_eq!(batches(&tracks, 25).count(), 2);
    assert!(batches(&tracks, 25).all(|b| b.len() == 25));
}

#[test]
fn test_batches_exact_and_empty() {
    let tracks: Vec<TrackRef> = (0..25).map(|i| TrackRef::track(&format!("t{i}"))).collect();
    assert_eq!(batches(&tracks, 25).count(), 1);
    assert_eq!(batches(&[], 25).count(), 0);
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("2024-02-29"),
        Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
    );
    assert!(parse_date("2023-02-29").is_err());
    assert!(parse_date("yesterday").is_err());
}

#[test]
fn test_message_date() {
    let msg = create_test_message("x", "2023-12-31T23:30:00.000000-02:00");
    // 23:30 at UTC-2 is already the next day in UTC
    assert_eq!(
        message_date(&msg),
        Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    );

    let broken = create_test_message("x", "last tuesday");
    assert_eq!(message_date(&broken), None);
}

#[test]
fn test_retain_messages_since() {
    let mut messages = vec![
        create_test_message("old", "2023-05-01T10:00:00+00:00"),
        create_test_message("boundary", "2024-01-01T00:00:00+00:00"),
        create_test_message("new", "2024-06-01T10:00:00+00:00"),
        create_test_message("unknown", "not a date"),
    ];

    let dropped = retain_messages_since(&mut messages, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

    assert_eq!(dropped, 1);
    let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["boundary", "new", "unknown"]);
}

#[test]
fn test_track_ref_canonical_form() {
    let track = TrackRef::track("abc123");
    assert_eq!(track.as_str(), "spotify:track:abc123");
    assert_eq!(track, TrackRef::from("spotify:track:abc123"));
    assert_eq!(track.to_string(), "spotify:track:abc123");
}
