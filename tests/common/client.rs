//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all Subsonic endpoints the server exposes.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// HTTP test client sending Subsonic credentials with every request
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    user: Option<(String, String)>,
}

impl TestClient {
    /// Creates a client that sends no credentials
    ///
    /// Use this for testing authentication failures.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            user: None,
        }
    }

    /// Creates a client sending the given credentials
    pub fn with_credentials(base_url: String, user: &str, password: &str) -> Self {
        let mut client = Self::new(base_url);
        client.user = Some((user.to_string(), password.to_string()));
        client
    }

    /// Creates a client authenticated as the regular test user
    ///
    /// This is the most common way to create a test client.
    pub fn authenticated(base_url: String) -> Self {
        Self::with_credentials(base_url, TEST_USER, TEST_PASS)
    }

    // ========================================================================
    // Raw requests
    // ========================================================================

    /// GET /rest/{endpoint}.view with credentials and the given parameters
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Response {
        let mut query: Vec<(&str, &str)> = vec![("c", "e2e-tests"), ("f", "json")];
        if let Some((user, password)) = &self.user {
            query.push(("u", user.as_str()));
            query.push(("p", password.as_str()));
        }
        query.extend_from_slice(params);

        self.client
            .get(format!("{}/rest/{}.view", self.base_url, endpoint))
            .query(&query)
            .send()
            .await
            .expect("Subsonic request failed")
    }

    /// Like `get`, asserting HTTP 200 and returning the `subsonic-response` object
    pub async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Value {
        let response = self.get(endpoint, params).await;
        assert_eq!(response.status(), StatusCode::OK, "{} failed", endpoint);
        Self::subsonic_body(response).await
    }

    /// Extracts the `subsonic-response` object of any response
    pub async fn subsonic_body(response: Response) -> Value {
        let mut body: Value = response.json().await.expect("Response was not JSON");
        body["subsonic-response"].take()
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    pub async fn ping(&self) -> Value {
        self.get_json("ping", &[]).await
    }

    pub async fn get_artists(&self) -> Value {
        self.get_json("getArtists", &[]).await
    }

    pub async fn get_artist(&self, id: i64) -> Value {
        self.get_json("getArtist", &[("id", id.to_string().as_str())]).await
    }

    pub async fn get_album(&self, id: i64) -> Value {
        self.get_json("getAlbum", &[("id", id.to_string().as_str())]).await
    }

    pub async fn get_album_list2(&self, list_type: &str, params: &[(&str, &str)]) -> Value {
        let mut all = vec![("type", list_type)];
        all.extend_from_slice(params);
        self.get_json("getAlbumList2", &all).await
    }

    pub async fn search3(&self, query: &str, params: &[(&str, &str)]) -> Value {
        let mut all = vec![("query", query)];
        all.extend_from_slice(params);
        self.get_json("search3", &all).await
    }

    pub async fn get_playlists(&self) -> Value {
        self.get_json("getPlaylists", &[]).await
    }

    pub async fn get_playlist(&self, id: i64) -> Value {
        self.get_json("getPlaylist", &[("id", id.to_string().as_str())]).await
    }
}

/// Names of the albums in a `albumList2` or `searchResult3` payload
pub fn album_names(albums: &Value) -> Vec<String> {
    albums
        .as_array()
        .map(|a| {
            a.iter()
                .map(|album| album["name"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Asserts a failed response with the given Subsonic error code
pub fn assert_subsonic_error(body: &Value, code: u64) {
    assert_eq!(body["status"], "failed", "expected failure, got {}", body);
    assert_eq!(body["error"]["code"], code, "unexpected error {}", body);
}
