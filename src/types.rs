use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::{Error, Res};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            scope: String::new(),
            expires_in: 3600,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.access_token
    }
}

/// Where the handshake currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Waiting,
    CodeReceived,
    TokenAcquired,
    Failed,
}

/// What the callback route saw on the redirect from the authorization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: String,
    pub href: String,
    pub name: String,
    pub album_type: AlbumType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub href: String,
    pub name: String,
}

/// A track of the source playlist together with the references needed to
/// look up its candidate pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub uri: String,
    pub album: AlbumRef,
    pub artist: ArtistRef,
}

#[derive(Debug, Clone, Default)]
pub struct SourcePlaylist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl SourcePlaylist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A track offered as a replacement. Album track listings and top-track
/// listings both carry at least these two fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub href: String,
    pub tracks_href: String,
}

/// How to reach the tracks of a playlist picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistLink {
    /// The `tracks` sub-resource is already known.
    Tracks(String),
    /// Only the playlist object link is known; its `tracks.href` must be
    /// looked up first.
    Playlist(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSource {
    pub name: String,
    pub link: PlaylistLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistHandle {
    pub id: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksLink {
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
    pub href: String,
    pub tracks: TracksLink,
}

impl From<PlaylistObject> for PlaylistSummary {
    fn from(p: PlaylistObject) -> Self {
        PlaylistSummary {
            id: p.id,
            name: p.name,
            href: p.href,
            tracks_href: p.tracks.href,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Paging<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPlaylist {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPlaylistsResponse {
    // the browse endpoint pads its pages with nulls
    pub playlists: Paging<Option<CategoryPlaylist>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub name: String,
    pub uri: String,
    pub album: AlbumRef,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

impl TryFrom<TrackObject> for Track {
    type Error = Error;

    fn try_from(t: TrackObject) -> Res<Self> {
        let Some(artist) = t.artists.into_iter().next() else {
            return Err(Error::data(format!("track '{}' has no artists", t.name)));
        };

        Ok(Track {
            name: t.name,
            uri: t.uri,
            album: t.album,
            artist,
        })
    }
}

impl PlaylistTracksResponse {
    /// Converts the listing into tracks, keeping the API order.
    pub fn into_tracks(self) -> Res<Vec<Track>> {
        self.items
            .into_iter()
            .enumerate()
            .map(|(pos, item)| match item.track {
                Some(track) => Track::try_from(track),
                None => Err(Error::data(format!(
                    "playlist item #{} has no track",
                    pos + 1
                ))),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumTracksResponse {
    pub items: Vec<CandidateTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<CandidateTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct CategoryTableRow {
    pub name: String,
    pub id: String,
}
