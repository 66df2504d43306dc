//! CatalogStore trait definition.
//!
//! The browse layer only talks to the catalog through this trait, so the
//! listing, search and index logic can be exercised against an in-memory
//! mock as well as against `SqliteCatalogStore`.

use super::models::{
    AlbumId, AlbumWithArtist, Artist, ArtistId, ArtistWithAlbumCount, ResolvedAlbum,
    ResolvedArtist, TrackWithAlbum,
};
use super::query_plan::{AlbumQueryPlan, Page, SubstringPattern};
use anyhow::Result;

/// Read access to the catalog.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Browsing
    // =========================================================================

    /// Get every artist with the number of albums attributed to it, in storage order.
    fn get_artists_with_album_count(&self) -> Result<Vec<ArtistWithAlbumCount>>;

    /// Get an artist with all of its albums.
    fn get_resolved_artist(&self, id: ArtistId) -> Result<Option<ResolvedArtist>>;

    /// Get an album with its artist and ordered tracks.
    fn get_resolved_album(&self, id: AlbumId) -> Result<Option<ResolvedAlbum>>;

    /// Run an album listing plan. Albums without an artist are never returned.
    fn find_albums(&self, plan: &AlbumQueryPlan) -> Result<Vec<AlbumWithArtist>>;

    // =========================================================================
    // Search
    // =========================================================================

    /// Artists whose name or normalized name contains the pattern, in storage order.
    fn search_artists(&self, pattern: &SubstringPattern, page: Page) -> Result<Vec<Artist>>;

    /// Albums (with an artist) whose title or normalized title contains the pattern.
    fn search_albums(&self, pattern: &SubstringPattern, page: Page)
        -> Result<Vec<AlbumWithArtist>>;

    /// Tracks whose title or normalized title contains the pattern.
    fn search_tracks(&self, pattern: &SubstringPattern, page: Page) -> Result<Vec<TrackWithAlbum>>;

    // =========================================================================
    // Counts
    // =========================================================================

    fn get_artists_count(&self) -> Result<usize>;

    fn get_albums_count(&self) -> Result<usize>;

    fn get_tracks_count(&self) -> Result<usize>;
}
