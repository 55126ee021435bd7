use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone, Utc};
use spotmix::{
    Error, Res, WriteError,
    spotify::{
        ChunkFailurePolicy, PlaylistSink,
        playlist::{MAX_TRACKS_PER_REQUEST, append_tracks, create_playlist},
    },
    types::PlaylistHandle,
    utils,
};

// Sink that records every call; chunk indexes in `fail_chunks` are rejected
#[derive(Default)]
struct RecordingSink {
    fail_create: bool,
    fail_chunks: HashSet<usize>,
    created: Mutex<Vec<(String, String)>>,
    add_calls: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl PlaylistSink for RecordingSink {
    async fn create_private_playlist(&self, owner_id: &str, name: &str) -> Res<PlaylistHandle> {
        if self.fail_create {
            return Err(Error::data("creation rejected"));
        }
        self.created
            .lock()
            .unwrap()
            .push((owner_id.to_string(), name.to_string()));
        Ok(handle())
    }

    async fn add_tracks(&self, _playlist: &PlaylistHandle, uris: &[String]) -> Res<()> {
        let mut calls = self.add_calls.lock().unwrap();
        let index = calls.len();
        calls.push(uris.to_vec());
        if self.fail_chunks.contains(&index) {
            return Err(Error::data("add rejected"));
        }
        Ok(())
    }
}

fn handle() -> PlaylistHandle {
    PlaylistHandle {
        id: "new".to_string(),
        href: "https://api.example/v1/playlists/new".to_string(),
    }
}

fn uris(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("spotify:track:{}", i)).collect()
}

#[tokio::test]
async fn test_append_tracks_batches_in_order() {
    for count in [0usize, 1, 99, 100, 101, 250, 1000] {
        let sink = RecordingSink::default();
        let all = uris(count);

        let report = append_tracks(&sink, &handle(), &all, ChunkFailurePolicy::Continue)
            .await
            .unwrap();

        let calls = sink.add_calls.lock().unwrap();
        assert_eq!(calls.len(), count.div_ceil(MAX_TRACKS_PER_REQUEST));
        assert!(calls.iter().all(|c| !c.is_empty() && c.len() <= 100));
        assert_eq!(calls.concat(), all);

        assert!(report.is_complete());
        assert_eq!(report.tracks_written, count);
        assert_eq!(report.chunks_written, calls.len());
    }
}

#[tokio::test]
async fn test_failed_chunk_is_reported_and_rest_is_written() {
    let sink = RecordingSink {
        fail_chunks: HashSet::from([1]),
        ..Default::default()
    };
    let all = uris(250);

    let report = append_tracks(&sink, &handle(), &all, ChunkFailurePolicy::Continue)
        .await
        .unwrap();

    assert_eq!(sink.add_calls.lock().unwrap().len(), 3);
    assert!(!report.is_complete());
    assert_eq!(report.chunks_written, 2);
    assert_eq!(report.tracks_written, 150);
    assert_eq!(report.failures.len(), 1);
    match &report.failures[0] {
        WriteError::Chunk { index, size, .. } => {
            assert_eq!(*index, 1);
            assert_eq!(*size, 100);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_abort_policy_stops_at_failed_chunk() {
    let sink = RecordingSink {
        fail_chunks: HashSet::from([1]),
        ..Default::default()
    };

    let result = append_tracks(&sink, &handle(), &uris(250), ChunkFailurePolicy::Abort).await;

    assert!(matches!(result, Err(WriteError::Chunk { index: 1, .. })));
    // the first chunk stays written, the third is never sent
    assert_eq!(sink.add_calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_playlist_names_after_original() {
    let sink = RecordingSink::default();

    let created = create_playlist(&sink, "user-1", "Road Trip").await.unwrap();
    assert_eq!(created, handle());

    let calls = sink.created.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (owner, name) = &calls[0];
    assert_eq!(owner, "user-1");
    assert!(name.starts_with("Road Trip BUT MIXED!! :) — ("));
    assert!(name.ends_with(')'));
    // "MM/dd/yyyy HH:mm:ss"
    let stamp = &name["Road Trip BUT MIXED!! :) — (".len()..name.len() - 1];
    assert_eq!(stamp.len(), 19);
}

#[tokio::test]
async fn test_create_playlist_failure_is_write_error() {
    let sink = RecordingSink {
        fail_create: true,
        ..Default::default()
    };

    let result = create_playlist(&sink, "user-1", "Road Trip").await;
    assert!(matches!(result, Err(WriteError::Create(_))));
    assert!(sink.add_calls.lock().unwrap().is_empty());
}

#[test]
fn test_playlist_name_format() {
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 14, 3, 59).unwrap();
    assert_eq!(
        utils::playlist_name("Road Trip", &at),
        "Road Trip BUT MIXED!! :) — (10/18/2026 14:03:59)"
    );

    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let at = offset.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(
        utils::playlist_name("Chill", &at),
        "Chill BUT MIXED!! :) — (01/02/2026 03:04:05)"
    );
}
