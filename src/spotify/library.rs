use std::collections::BTreeMap;

use crate::{
    error::Res,
    spotify::SpotifyClient,
    types::{
        CategoriesResponse, CategoryPlaylistsResponse, Paging, PlaylistLink, PlaylistObject,
        PlaylistSource, PlaylistSummary, PlaylistTracksResponse, SourcePlaylist,
    },
};

impl SpotifyClient {
    /// Playlists in the current user's library, in API order.
    pub async fn list_owned_playlists(&self) -> Res<Vec<PlaylistSummary>> {
        let page: Paging<PlaylistObject> = self
            .get_json(&self.endpoint("/me/playlists?limit=50"))
            .await?;

        Ok(page.items.into_iter().map(PlaylistSummary::from).collect())
    }

    /// Browse categories as `name -> id`.
    pub async fn list_categories(&self) -> Res<BTreeMap<String, String>> {
        let res: CategoriesResponse = self
            .get_json(&self.endpoint("/browse/categories?locale=US&limit=50"))
            .await?;

        Ok(res
            .categories
            .items
            .into_iter()
            .map(|c| (c.name, c.id))
            .collect())
    }

    /// Playlists of one browse category as `name -> playlist link`.
    pub async fn list_playlists_in_category(
        &self,
        category_id: &str,
    ) -> Res<BTreeMap<String, String>> {
        let url = self.endpoint(&format!(
            "/browse/categories/{}/playlists?country=US&limit=50",
            category_id
        ));
        let res: CategoryPlaylistsResponse = self.get_json(&url).await?;

        Ok(res
            .playlists
            .items
            .into_iter()
            .flatten()
            .map(|p| (p.name, p.href))
            .collect())
    }

    /// Materializes the tracks of the selected playlist in playlist order.
    pub async fn load_playlist(&self, source: &PlaylistSource) -> Res<SourcePlaylist> {
        let tracks_href = match &source.link {
            PlaylistLink::Tracks(href) => href.clone(),
            PlaylistLink::Playlist(href) => {
                let playlist: PlaylistObject = self.get_json(href).await?;
                playlist.tracks.href
            }
        };

        let listing: PlaylistTracksResponse = self.get_json(&tracks_href).await?;

        Ok(SourcePlaylist {
            name: source.name.clone(),
            tracks: listing.into_tracks()?,
        })
    }
}
