//! Catalog entities as read from the SQLite catalog.
//!
//! These are storage shapes, not wire shapes; `crate::subsonic::views`
//! projects them into what clients receive.

use serde::Serialize;

pub type ArtistId = i64;
pub type AlbumId = i64;
pub type TrackId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    /// Diacritic-folded, lowercased name (see `crate::normalize::fold`).
    pub name_normalized: String,
}

impl Artist {
    /// The name used to place the artist in the alphabetic index.
    pub fn index_name(&self) -> &str {
        if self.name_normalized.is_empty() {
            &self.name
        } else {
            &self.name_normalized
        }
    }
}

/// An artist together with the number of albums attributed to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArtistWithAlbumCount {
    pub artist: Artist,
    pub album_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: AlbumId,
    pub artist_id: Option<ArtistId>,
    pub title: String,
    pub title_normalized: String,
    pub year: Option<i32>,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds, bumped by the scanner whenever the album's files change.
    pub modified_at: i64,
    /// Number of tracks on the album.
    pub song_count: u32,
    /// Sum of the album's track durations, in seconds.
    pub duration_secs: u32,
}

/// An album and its owning artist. Listing and search only ever return
/// albums that have one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlbumWithArtist {
    pub album: Album,
    pub artist: Artist,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: TrackId,
    pub album_id: AlbumId,
    pub title: String,
    pub title_normalized: String,
    pub disc_number: u32,
    pub track_number: u32,
    pub duration_secs: u32,
    pub bitrate: u32,
    pub size: u64,
    pub suffix: String,
    pub content_type: String,
    pub path: String,
    pub created_at: i64,
}

/// A track with its album and, when the album has one, the album's artist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackWithAlbum {
    pub track: Track,
    pub album: Album,
    pub artist: Option<Artist>,
}

/// An artist with all of its albums, ordered by year then title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedArtist {
    pub artist: Artist,
    pub albums: Vec<Album>,
}

/// An album with its artist (if any) and tracks ordered by disc then track number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedAlbum {
    pub album: Album,
    pub artist: Option<Artist>,
    pub tracks: Vec<Track>,
}
