use async_trait::async_trait;

use crate::{
    error::Res,
    mixer::Catalog,
    spotify::SpotifyClient,
    types::{AlbumRef, AlbumTracksResponse, ArtistRef, CandidateTrack, TopTracksResponse},
};

#[async_trait]
impl Catalog for SpotifyClient {
    async fn album_tracks(&self, album: &AlbumRef) -> Res<Vec<CandidateTrack>> {
        let res: AlbumTracksResponse = self.get_json(&format!("{}/tracks", album.href)).await?;
        Ok(res.items)
    }

    async fn artist_top_tracks(&self, artist: &ArtistRef) -> Res<Vec<CandidateTrack>> {
        let res: TopTracksResponse = self
            .get_json(&format!("{}/top-tracks?market=from_token", artist.href))
            .await?;
        Ok(res.tracks)
    }
}
