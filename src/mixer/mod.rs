//! Track substitution.
//!
//! For every track of the source playlist a replacement is drawn from one of
//! two candidate pools: the other tracks of its album, or its primary
//! artist's top tracks. The engine keeps the original track whenever no
//! candidate passes the duplicate checks.

mod engine;
mod pick;

use async_trait::async_trait;

use crate::{
    error::Res,
    types::{AlbumRef, ArtistRef, CandidateTrack},
};

pub use engine::{ALBUM_POOL_WEIGHT, PoolKind, Substitution, SubstitutionEngine};
pub use pick::pick_first_acceptable;

/// Source of candidate pools.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn album_tracks(&self, album: &AlbumRef) -> Res<Vec<CandidateTrack>>;

    async fn artist_top_tracks(&self, artist: &ArtistRef) -> Res<Vec<CandidateTrack>>;
}
