//! Substring search over artists, albums and tracks.

use super::error::BrowseError;
use crate::catalog_store::{AlbumWithArtist, Artist, CatalogStore, SubstringPattern, TrackWithAlbum};
use crate::config::BrowseSettings;
use std::sync::Arc;
use tracing::debug;

/// Parameters of a `search3` call. Counts left as `None` use the configured default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub artist_offset: usize,
    pub artist_count: Option<usize>,
    pub album_offset: usize,
    pub album_count: Option<usize>,
    pub song_offset: usize,
    pub song_count: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub artists: Vec<Artist>,
    pub albums: Vec<AlbumWithArtist>,
    pub songs: Vec<TrackWithAlbum>,
}

/// Strips a single trailing `*`, which some clients append as a prefix-search hint.
pub fn normalize_query(query: &str) -> &str {
    query.strip_suffix('*').unwrap_or(query)
}

pub struct CatalogSearcher {
    store: Arc<dyn CatalogStore>,
    settings: BrowseSettings,
}

impl CatalogSearcher {
    pub fn new(store: Arc<dyn CatalogStore>, settings: BrowseSettings) -> Self {
        Self { store, settings }
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResults, BrowseError> {
        let query = request
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .ok_or(BrowseError::MissingParameter("query"))?;
        let pattern = SubstringPattern::new(normalize_query(query));

        let default_count = self.settings.default_search_count;
        let artist_page = self
            .settings
            .page(request.artist_offset, request.artist_count, default_count);
        let album_page = self
            .settings
            .page(request.album_offset, request.album_count, default_count);
        let song_page = self
            .settings
            .page(request.song_offset, request.song_count, default_count);
        debug!(
            "Searching {:?}: artists {:?}, albums {:?}, songs {:?}",
            pattern.text(),
            artist_page,
            album_page,
            song_page
        );

        let mut results = SearchResults::default();
        if !artist_page.is_empty() {
            results.artists = self.store.search_artists(&pattern, artist_page)?;
        }
        if !album_page.is_empty() {
            results.albums = self.store.search_albums(&pattern, album_page)?;
        }
        if !song_page.is_empty() {
            results.songs = self.store.search_tracks(&pattern, song_page)?;
        }
        Ok(results)
    }
}
