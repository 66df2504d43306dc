use super::user_models::{Playlist, PlaylistId, ResolvedPlaylist, User, UserId};
use anyhow::Result;

pub trait UserStore: Send + Sync {
    /// Returns the user with the given name.
    /// Returns Ok(None) if the user does not exist.
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>>;

    /// Returns the stored password of a user, used to check request credentials.
    /// Returns Ok(None) if the user does not exist.
    fn get_user_password(&self, user_id: UserId) -> Result<Option<String>>;

    /// Returns all playlists owned by the user, most recently updated first.
    fn get_user_playlists(&self, user_id: UserId) -> Result<Vec<Playlist>>;

    /// Returns a playlist with its entries in position order.
    /// Returns Ok(None) if the playlist does not exist.
    fn get_playlist(&self, playlist_id: PlaylistId) -> Result<Option<ResolvedPlaylist>>;
}
