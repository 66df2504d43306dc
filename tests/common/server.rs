//! In-process server for end-to-end tests
//!
//! Every test gets its own catalog database in a temp dir and its own
//! server on an ephemeral port. Dropping the `TestServer` stops it.

use super::constants::*;
use super::fixtures::create_test_catalog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use subsonic_catalog_server::catalog_store::SqliteCatalogStore;
use subsonic_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub struct TestServer {
    /// e.g. "http://127.0.0.1:43127"
    pub base_url: String,
    pub port: u16,
    /// The fixture catalog, for tests that want to poke at rows directly
    pub catalog_db_path: PathBuf,

    _catalog_dir: TempDir,
    stop: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Builds the fixture catalog, serves it on 127.0.0.1 and waits until
    /// the status route answers.
    ///
    /// Panics on any setup failure.
    pub async fn spawn() -> Self {
        let (catalog_dir, catalog_db_path) =
            create_test_catalog().expect("Failed to create test catalog");
        let store = Arc::new(
            SqliteCatalogStore::new(&catalog_db_path, 2).expect("Failed to open catalog store"),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener
            .local_addr()
            .expect("Listener has no local address")
            .port();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, store.clone(), store).expect("Failed to build app");

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = stop_rx.await;
                })
                .await
                .expect("Test server crashed");
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            port,
            catalog_db_path,
            _catalog_dir: catalog_dir,
            stop: Some(stop_tx),
        };
        server.wait_until_up().await;
        server
    }

    async fn wait_until_up(&self) {
        let probe = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build probe client");
        let deadline = Instant::now() + Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        while Instant::now() < deadline {
            let up = probe
                .get(format!("{}/", self.base_url))
                .send()
                .await
                .map(|r| r.status().is_success())
                .unwrap_or(false);
            if up {
                return;
            }
            tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
        }
        panic!(
            "Test server on port {} not up after {}ms",
            self.port, SERVER_READY_TIMEOUT_MS
        );
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}
