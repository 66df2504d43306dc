//! Shared harness for the end-to-end suites
//!
//! Each suite declares `mod common;` and imports from here only.
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer, ALBUM_ODELAY_ID};
//!
//! #[tokio::test]
//! async fn test_get_album() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::authenticated(server.base_url.clone());
//!
//!     let body = client.get_album(ALBUM_ODELAY_ID).await;
//!     assert_eq!(body["status"], "ok");
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

#[allow(unused_imports)]
pub use client::{album_names, assert_subsonic_error, TestClient};
#[allow(unused_imports)]
pub use constants::*;
pub use server::TestServer;
