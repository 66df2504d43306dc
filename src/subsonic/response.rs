//! The `subsonic-response` envelope and error mapping.

use super::views::*;
use crate::browse::BrowseError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

pub const API_VERSION: &str = "1.16.1";

/// Subsonic error codes used by this server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Generic = 0,
    MissingParameter = 10,
    WrongCredentials = 40,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub code: u32,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseBody {
    Artists(ArtistsView),
    Artist(ArtistWithAlbumsView),
    Album(AlbumWithSongsView),
    AlbumList2(AlbumList2View),
    SearchResult3(SearchResult3View),
    Playlists(PlaylistsView),
    Playlist(PlaylistWithSongsView),
    Error(ErrorView),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubsonicResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(flatten)]
    pub body: Option<ResponseBody>,
    #[serde(skip)]
    pub http_status: StatusCode,
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "subsonic-response")]
    response: &'a SubsonicResponse,
}

impl SubsonicResponse {
    /// An `ok` response with no payload, as returned by `ping`.
    pub fn empty() -> Self {
        Self {
            status: "ok",
            version: API_VERSION,
            body: None,
            http_status: StatusCode::OK,
        }
    }

    pub fn ok(body: ResponseBody) -> Self {
        Self {
            body: Some(body),
            ..Self::empty()
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: "failed",
            version: API_VERSION,
            body: Some(ResponseBody::Error(ErrorView {
                code: code as u32,
                message: message.into(),
            })),
            http_status: if code == ErrorCode::Generic {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::OK
            },
        }
    }
}

impl IntoResponse for SubsonicResponse {
    fn into_response(self) -> Response {
        let status = self.http_status;
        (status, Json(Envelope { response: &self })).into_response()
    }
}

impl From<BrowseError> for SubsonicResponse {
    fn from(err: BrowseError) -> Self {
        if err.is_client_error() {
            debug!("Rejected request: {}", err);
            SubsonicResponse::error(ErrorCode::MissingParameter, err.to_string())
        } else {
            error!("Failed to serve request: {:#}", err);
            SubsonicResponse::error(ErrorCode::Generic, err.to_string())
        }
    }
}

impl IntoResponse for BrowseError {
    fn into_response(self) -> Response {
        SubsonicResponse::from(self).into_response()
    }
}
