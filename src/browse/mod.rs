//! Catalog browsing: the artist index, album listings, search and id lookups.
//!
//! Everything here reads through an injected `CatalogStore` and returns
//! catalog entities; turning them into Subsonic views is left to
//! `crate::subsonic`.

mod album_list;
mod error;
mod indexer;
mod search;
#[cfg(test)]
pub(crate) mod test_support;

pub use album_list::{
    AlbumListRequest, AlbumListType, AlbumLister, DEFAULT_FROM_YEAR, DEFAULT_TO_YEAR,
};
pub use error::BrowseError;
pub use indexer::{build_artist_index, index_key, IndexBucket, FALLBACK_INDEX_KEY};
pub use search::{normalize_query, CatalogSearcher, SearchRequest, SearchResults};

use crate::catalog_store::{
    AlbumId, AlbumWithArtist, ArtistId, CatalogStore, ResolvedAlbum, ResolvedArtist,
};
use crate::config::BrowseSettings;
use crate::user::UserId;
use std::sync::Arc;

/// Entry point for the browse endpoints, sharing one store handle.
pub struct CatalogBrowser {
    store: Arc<dyn CatalogStore>,
    lister: AlbumLister,
    searcher: CatalogSearcher,
}

impl CatalogBrowser {
    pub fn new(store: Arc<dyn CatalogStore>, settings: BrowseSettings) -> Self {
        Self {
            lister: AlbumLister::new(store.clone(), settings.clone()),
            searcher: CatalogSearcher::new(store.clone(), settings),
            store,
        }
    }

    pub fn artist_index(&self) -> Result<Vec<IndexBucket>, BrowseError> {
        let artists = self.store.get_artists_with_album_count()?;
        Ok(build_artist_index(artists))
    }

    pub fn artist(&self, id: ArtistId) -> Result<ResolvedArtist, BrowseError> {
        self.store
            .get_resolved_artist(id)?
            .ok_or(BrowseError::NotFound("artist"))
    }

    pub fn album(&self, id: AlbumId) -> Result<ResolvedAlbum, BrowseError> {
        self.store
            .get_resolved_album(id)?
            .ok_or(BrowseError::NotFound("album"))
    }

    pub fn album_list(
        &self,
        request: &AlbumListRequest,
        caller: Option<UserId>,
    ) -> Result<Vec<AlbumWithArtist>, BrowseError> {
        self.lister.list(request, caller)
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResults, BrowseError> {
        self.searcher.search(request)
    }
}
