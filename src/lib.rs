//! Subsonic catalog server library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod browse;
pub mod catalog_store;
pub mod config;
pub mod normalize;
pub mod server;
pub mod sqlite_persistence;
pub mod subsonic;
pub mod user;

// Re-export commonly used types for convenience
pub use browse::{BrowseError, CatalogBrowser};
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use server::{run_server, RequestsLoggingLevel};
pub use user::UserStore;
