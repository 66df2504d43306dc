use crate::catalog_store::{Album, Artist, Track};
use serde::Serialize;

pub type UserId = i64;
pub type PlaylistId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub is_admin: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub user_id: UserId,
    /// Name of the owning user, reported as the playlist owner.
    pub owner: String,
    pub name: String,
    pub comment: Option<String>,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds.
    pub updated_at: i64,
    pub track_count: u32,
}

/// A playlist entry with everything needed to render it as a song.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    pub track: Track,
    pub album: Album,
    pub artist: Option<Artist>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedPlaylist {
    pub playlist: Playlist,
    pub entries: Vec<PlaylistEntry>,
}
