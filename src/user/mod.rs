pub mod auth;
pub mod user_models;
mod user_store;

pub use user_models::{Playlist, PlaylistEntry, PlaylistId, ResolvedPlaylist, User, UserId};
pub use user_store::UserStore;
