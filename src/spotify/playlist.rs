use async_trait::async_trait;
use chrono::Local;

use crate::{
    error::{Res, WriteError},
    spotify::SpotifyClient,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        PlaylistHandle,
    },
    utils, warning,
};

/// Upper bound of URIs the API accepts in one add-tracks call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Destination of the remixed playlist.
#[async_trait]
pub trait PlaylistSink: Send + Sync {
    async fn create_private_playlist(&self, owner_id: &str, name: &str) -> Res<PlaylistHandle>;

    /// Appends `uris` (at most [`MAX_TRACKS_PER_REQUEST`]) to the end of the playlist.
    async fn add_tracks(&self, playlist: &PlaylistHandle, uris: &[String]) -> Res<()>;
}

#[async_trait]
impl PlaylistSink for SpotifyClient {
    async fn create_private_playlist(&self, owner_id: &str, name: &str) -> Res<PlaylistHandle> {
        let url = self.endpoint(&format!("/users/{}/playlists", owner_id));
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public: false,
        };

        let res: CreatePlaylistResponse = self.post_json(&url, &body).await?;
        Ok(PlaylistHandle {
            id: res.id,
            href: res.href,
        })
    }

    async fn add_tracks(&self, playlist: &PlaylistHandle, uris: &[String]) -> Res<()> {
        let body = AddTracksRequest {
            uris: uris.to_vec(),
        };
        let _: AddTracksResponse = self
            .post_json(&format!("{}/tracks", playlist.href), &body)
            .await?;
        Ok(())
    }
}

/// What to do when one add-tracks call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkFailurePolicy {
    /// Report the failed chunk and keep writing the rest.
    #[default]
    Continue,
    /// Stop at the first failed chunk.
    Abort,
}

#[derive(Debug, Default)]
pub struct AppendReport {
    pub chunks_written: usize,
    pub tracks_written: usize,
    pub failures: Vec<WriteError>,
}

impl AppendReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Creates the private destination playlist named after `original_name` and
/// the current local time.
pub async fn create_playlist<S>(
    sink: &S,
    owner_id: &str,
    original_name: &str,
) -> Result<PlaylistHandle, WriteError>
where
    S: PlaylistSink + ?Sized,
{
    let name = utils::playlist_name(original_name, &Local::now());
    sink.create_private_playlist(owner_id, &name)
        .await
        .map_err(|e| WriteError::Create(e.to_string()))
}

/// Appends `uris` in order, one call per chunk of at most
/// [`MAX_TRACKS_PER_REQUEST`].
///
/// Chunks written before a failure stay in the playlist.
pub async fn append_tracks<S>(
    sink: &S,
    playlist: &PlaylistHandle,
    uris: &[String],
    policy: ChunkFailurePolicy,
) -> Result<AppendReport, WriteError>
where
    S: PlaylistSink + ?Sized,
{
    let mut report = AppendReport::default();

    for (index, chunk) in uris.chunks(MAX_TRACKS_PER_REQUEST).enumerate() {
        match sink.add_tracks(playlist, chunk).await {
            Ok(()) => {
                report.chunks_written += 1;
                report.tracks_written += chunk.len();
            }
            Err(e) => {
                let err = WriteError::Chunk {
                    index,
                    size: chunk.len(),
                    reason: e.to_string(),
                };
                if policy == ChunkFailurePolicy::Abort {
                    return Err(err);
                }
                warning!("{}", err);
                report.failures.push(err);
            }
        }
    }

    Ok(report)
}
