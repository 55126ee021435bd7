//! # Spotify Integration Module
//!
//! Thin async client for the parts of the Spotify Web API the remixer needs.
//!
//! ```text
//! CLI (prompts, progress)
//!          ↓
//! Spotify Integration Layer
//!     ├── auth      authorization-code handshake, token exchange
//!     ├── library   owned playlists, browse categories, playlist tracks
//!     ├── catalog   album tracks, artist top tracks (candidate pools)
//!     └── playlist  create playlist, add tracks in chunks
//!          ↓
//! reqwest + serde_json
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange (accounts service)
//! - `GET /v1/me`
//! - `GET /v1/me/playlists`
//! - `GET /v1/browse/categories`
//! - `GET /v1/browse/categories/{id}/playlists`
//! - `GET {playlist}/tracks`, `GET {album}/tracks`, `GET {artist}/top-tracks`
//! - `POST /v1/users/{id}/playlists`
//! - `POST {playlist}/tracks`
//!
//! Tokens are kept in memory only; there is no refresh, retry, or rate-limit
//! handling. Links returned by the API (`href`) are followed as given.

pub mod auth;
mod catalog;
mod client;
mod library;
pub mod playlist;

pub use auth::{AuthSession, authorize};
pub use client::SpotifyClient;
pub use playlist::{AppendReport, ChunkFailurePolicy, PlaylistSink};
