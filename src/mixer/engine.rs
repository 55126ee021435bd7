use std::{collections::HashSet, fmt};

use indicatif::ProgressBar;
use rand::Rng;

use crate::{
    mixer::{Catalog, pick_first_acceptable},
    types::{AlbumType, CandidateTrack, SourcePlaylist, Track},
    warning,
};

/// Probability of drawing from the album pool for tracks that are not on a
/// single.
pub const ALBUM_POOL_WEIGHT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Album,
    ArtistTopTracks,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKind::Album => f.write_str("album tracks"),
            PoolKind::ArtistTopTracks => f.write_str("artist top tracks"),
        }
    }
}

/// Outcome of one substitution decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub original_name: String,
    pub original_uri: String,
    pub name: String,
    pub uri: String,
    pub pool: PoolKind,
    pub pool_size: usize,
    /// `false` when no candidate qualified and the original track was kept.
    pub replaced: bool,
}

pub struct SubstitutionEngine<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    album_weight: f64,
    progress: ProgressBar,
}

impl<'a, C: Catalog + ?Sized> SubstitutionEngine<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            album_weight: ALBUM_POOL_WEIGHT,
            progress: ProgressBar::hidden(),
        }
    }

    /// Overrides the album-pool probability; clamped to `0.0..=1.0`.
    pub fn with_album_weight(mut self, weight: f64) -> Self {
        self.album_weight = if weight.is_finite() {
            weight.clamp(0.0, 1.0)
        } else {
            ALBUM_POOL_WEIGHT
        };
        self
    }

    /// Reports per-track progress on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Singles always use the artist's top tracks; anything else draws the
    /// album pool with the configured weight.
    pub fn choose_pool<R: Rng + ?Sized>(&self, track: &Track, rng: &mut R) -> PoolKind {
        if track.album.album_type == AlbumType::Single {
            return PoolKind::ArtistTopTracks;
        }

        if rng.random_bool(self.album_weight) {
            PoolKind::Album
        } else {
            PoolKind::ArtistTopTracks
        }
    }

    /// Decides a replacement for every track, in playlist order.
    ///
    /// A candidate is accepted only if its name does not appear in the source
    /// playlist and its URI has not been placed yet. Pool lookups run one
    /// after the other so the random draws happen in track order.
    pub async fn substitute_all<R: Rng + ?Sized>(
        &self,
        playlist: &SourcePlaylist,
        rng: &mut R,
    ) -> Vec<Substitution> {
        let source_names: HashSet<&str> = playlist.tracks.iter().map(|t| t.name.as_str()).collect();
        let mut placed: HashSet<String> = HashSet::new();
        let mut substitutions = Vec::with_capacity(playlist.len());

        self.progress.set_length(playlist.len() as u64);

        for track in &playlist.tracks {
            self.progress.set_message(track.name.clone());

            let pool_kind = self.choose_pool(track, rng);
            let pool = self.fetch_pool(track, pool_kind).await;

            let picked = pick_first_acceptable(&pool, rng, |c| {
                !source_names.contains(c.name.as_str()) && !placed.contains(&c.uri)
            });

            let substitution = match picked {
                Some(candidate) => Substitution {
                    original_name: track.name.clone(),
                    original_uri: track.uri.clone(),
                    name: candidate.name.clone(),
                    uri: candidate.uri.clone(),
                    pool: pool_kind,
                    pool_size: pool.len(),
                    replaced: true,
                },
                None => Substitution {
                    original_name: track.name.clone(),
                    original_uri: track.uri.clone(),
                    name: track.name.clone(),
                    uri: track.uri.clone(),
                    pool: pool_kind,
                    pool_size: pool.len(),
                    replaced: false,
                },
            };

            placed.insert(substitution.uri.clone());
            substitutions.push(substitution);
            self.progress.inc(1);
        }

        substitutions
    }

    /// The URIs of [`substitute_all`](Self::substitute_all), one per source track.
    pub async fn build_replacement_sequence<R: Rng + ?Sized>(
        &self,
        playlist: &SourcePlaylist,
        rng: &mut R,
    ) -> Vec<String> {
        self.substitute_all(playlist, rng)
            .await
            .into_iter()
            .map(|s| s.uri)
            .collect()
    }

    // A failed lookup counts as an empty pool: the original track is kept.
    async fn fetch_pool(&self, track: &Track, kind: PoolKind) -> Vec<CandidateTrack> {
        let result = match kind {
            PoolKind::Album => self.catalog.album_tracks(&track.album).await,
            PoolKind::ArtistTopTracks => self.catalog.artist_top_tracks(&track.artist).await,
        };

        result.unwrap_or_else(|e| {
            self.progress.suspend(|| {
                warning!("Cannot fetch {} for '{}': {}", kind, track.name, e);
            });
            Vec::new()
        })
    }
}
