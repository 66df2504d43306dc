//! Subsonic "ID3" view objects.
//!
//! Pure projections of catalog entities into the shapes clients expect.
//! Ids are emitted as strings; cover art ids carry an entity prefix so a
//! cover art endpoint can tell artists, albums and playlists apart.

use crate::browse::{IndexBucket, SearchResults};
use crate::catalog_store::{Album, AlbumWithArtist, Artist, ResolvedAlbum, ResolvedArtist, Track};
use crate::user::{Playlist, ResolvedPlaylist};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const TRACK_MEDIA_TYPE: &str = "music";
/// The catalog does not track playlist length; clients only need a positive value.
pub const PLAYLIST_DURATION_PLACEHOLDER: u32 = 1;

fn timestamp(unix_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(unix_secs, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn artist_cover_id(id: i64) -> String {
    format!("ar-{}", id)
}

fn album_cover_id(id: i64) -> String {
    format!("al-{}", id)
}

fn playlist_cover_id(id: i64) -> String {
    format!("pl-{}", id)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistView {
    pub id: String,
    pub name: String,
    pub album_count: u32,
    pub cover_art: String,
}

impl ArtistView {
    pub fn from_artist(artist: &Artist, album_count: u32) -> Self {
        Self {
            id: artist.id.to_string(),
            name: artist.name.clone(),
            album_count,
            cover_art: artist_cover_id(artist.id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    pub cover_art: String,
    pub song_count: u32,
    pub duration: u32,
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl AlbumView {
    pub fn from_album(album: &Album, artist: Option<&Artist>) -> Self {
        Self {
            id: album.id.to_string(),
            name: album.title.clone(),
            artist: artist.map(|a| a.name.clone()),
            artist_id: artist.map(|a| a.id.to_string()),
            cover_art: album_cover_id(album.id),
            song_count: album.song_count,
            duration: album.duration_secs,
            created: timestamp(album.modified_at),
            year: album.year,
        }
    }

    pub fn from_album_with_artist(entry: &AlbumWithArtist) -> Self {
        Self::from_album(&entry.album, Some(&entry.artist))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
    pub id: String,
    pub parent: String,
    pub is_dir: bool,
    pub title: String,
    pub album: String,
    pub album_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    pub track: u32,
    pub disc_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub cover_art: String,
    pub size: u64,
    pub content_type: String,
    pub suffix: String,
    pub duration: u32,
    pub bit_rate: u32,
    pub path: String,
    pub created: String,
    #[serde(rename = "type")]
    pub media_type: &'static str,
}

impl TrackView {
    pub fn from_track(track: &Track, album: &Album, artist: Option<&Artist>) -> Self {
        Self {
            id: track.id.to_string(),
            parent: album.id.to_string(),
            is_dir: false,
            title: track.title.clone(),
            album: album.title.clone(),
            album_id: album.id.to_string(),
            artist: artist.map(|a| a.name.clone()),
            artist_id: artist.map(|a| a.id.to_string()),
            track: track.track_number,
            disc_number: track.disc_number,
            year: album.year,
            cover_art: album_cover_id(album.id),
            size: track.size,
            content_type: track.content_type.clone(),
            suffix: track.suffix.clone(),
            duration: track.duration_secs,
            bit_rate: track.bitrate,
            path: track.path.clone(),
            created: timestamp(track.created_at),
            media_type: TRACK_MEDIA_TYPE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub owner: String,
    pub public: bool,
    pub song_count: u32,
    pub duration: u32,
    pub created: String,
    pub changed: String,
    pub cover_art: String,
}

impl PlaylistView {
    pub fn from_playlist(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.to_string(),
            name: playlist.name.clone(),
            comment: playlist.comment.clone(),
            owner: playlist.owner.clone(),
            public: true,
            song_count: playlist.track_count,
            duration: PLAYLIST_DURATION_PLACEHOLDER,
            created: timestamp(playlist.created_at),
            changed: timestamp(playlist.updated_at),
            cover_art: playlist_cover_id(playlist.id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexView {
    pub name: String,
    pub artist: Vec<ArtistView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistsView {
    pub ignored_articles: String,
    pub index: Vec<IndexView>,
}

impl ArtistsView {
    pub fn from_buckets(buckets: &[IndexBucket]) -> Self {
        Self {
            ignored_articles: String::new(),
            index: buckets
                .iter()
                .map(|bucket| IndexView {
                    name: bucket.key.clone(),
                    artist: bucket
                        .artists
                        .iter()
                        .map(|a| ArtistView::from_artist(&a.artist, a.album_count))
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArtistWithAlbumsView {
    #[serde(flatten)]
    pub artist: ArtistView,
    pub album: Vec<AlbumView>,
}

impl ArtistWithAlbumsView {
    pub fn from_resolved(resolved: &ResolvedArtist) -> Self {
        Self {
            artist: ArtistView::from_artist(&resolved.artist, resolved.albums.len() as u32),
            album: resolved
                .albums
                .iter()
                .map(|album| AlbumView::from_album(album, Some(&resolved.artist)))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlbumWithSongsView {
    #[serde(flatten)]
    pub album: AlbumView,
    pub song: Vec<TrackView>,
}

impl AlbumWithSongsView {
    pub fn from_resolved(resolved: &ResolvedAlbum) -> Self {
        let artist = resolved.artist.as_ref();
        Self {
            album: AlbumView::from_album(&resolved.album, artist),
            song: resolved
                .tracks
                .iter()
                .map(|track| TrackView::from_track(track, &resolved.album, artist))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlbumList2View {
    pub album: Vec<AlbumView>,
}

impl AlbumList2View {
    pub fn from_albums(albums: &[AlbumWithArtist]) -> Self {
        Self {
            album: albums.iter().map(AlbumView::from_album_with_artist).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchResult3View {
    pub artist: Vec<ArtistView>,
    pub album: Vec<AlbumView>,
    pub song: Vec<TrackView>,
}

impl SearchResult3View {
    /// Search hits carry no album aggregate for artists, so `albumCount` is 0.
    pub fn from_results(results: &SearchResults) -> Self {
        Self {
            artist: results
                .artists
                .iter()
                .map(|a| ArtistView::from_artist(a, 0))
                .collect(),
            album: results
                .albums
                .iter()
                .map(AlbumView::from_album_with_artist)
                .collect(),
            song: results
                .songs
                .iter()
                .map(|s| TrackView::from_track(&s.track, &s.album, s.artist.as_ref()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistsView {
    pub playlist: Vec<PlaylistView>,
}

impl PlaylistsView {
    pub fn from_playlists(playlists: &[Playlist]) -> Self {
        Self {
            playlist: playlists.iter().map(PlaylistView::from_playlist).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistWithSongsView {
    #[serde(flatten)]
    pub playlist: PlaylistView,
    pub entry: Vec<TrackView>,
}

impl PlaylistWithSongsView {
    pub fn from_resolved(resolved: &ResolvedPlaylist) -> Self {
        Self {
            playlist: PlaylistView::from_playlist(&resolved.playlist),
            entry: resolved
                .entries
                .iter()
                .map(|e| TrackView::from_track(&e.track, &e.album, e.artist.as_ref()))
                .collect(),
        }
    }
}
