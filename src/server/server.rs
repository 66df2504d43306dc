use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration, time::Instant};

use tracing::info;

use crate::browse::{AlbumListRequest, BrowseError, CatalogBrowser, SearchRequest};
use crate::catalog_store::CatalogStore;
use crate::subsonic::views::{
    AlbumList2View, AlbumWithSongsView, ArtistWithAlbumsView, ArtistsView, PlaylistWithSongsView,
    PlaylistsView, SearchResult3View,
};
use crate::subsonic::{ResponseBody, SubsonicResponse, API_VERSION};
use crate::user::UserStore;

use axum::{
    extract::State, handler::Handler, middleware, response::IntoResponse, routing::get, Json,
    Router,
};
use serde::Serialize;

use super::{log_requests, state::*, Caller, Params, RequestsLoggingLevel, ServerConfig};

type SubsonicResult = Result<SubsonicResponse, BrowseError>;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub api_version: &'static str,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        api_version: API_VERSION,
    };
    Json(stats)
}

async fn ping(_caller: Caller) -> SubsonicResponse {
    SubsonicResponse::empty()
}

async fn get_artists(_caller: Caller, State(browser): State<GuardedCatalogBrowser>) -> SubsonicResult {
    let index = browser.artist_index()?;
    Ok(SubsonicResponse::ok(ResponseBody::Artists(
        ArtistsView::from_buckets(&index),
    )))
}

async fn get_artist(
    _caller: Caller,
    State(browser): State<GuardedCatalogBrowser>,
    params: Params,
) -> SubsonicResult {
    let artist = browser.artist(params.required("id")?)?;
    Ok(SubsonicResponse::ok(ResponseBody::Artist(
        ArtistWithAlbumsView::from_resolved(&artist),
    )))
}

async fn get_album(
    _caller: Caller,
    State(browser): State<GuardedCatalogBrowser>,
    params: Params,
) -> SubsonicResult {
    let album = browser.album(params.required("id")?)?;
    Ok(SubsonicResponse::ok(ResponseBody::Album(
        AlbumWithSongsView::from_resolved(&album),
    )))
}

async fn get_album_list2(
    caller: Caller,
    State(browser): State<GuardedCatalogBrowser>,
    params: Params,
) -> SubsonicResult {
    let request = AlbumListRequest {
        list_type: params.string("type"),
        offset: params.parse_or("offset", 0)?,
        size: params.parse("size")?,
        from_year: params.parse("fromYear")?,
        to_year: params.parse("toYear")?,
    };
    let albums = browser.album_list(&request, Some(caller.user.id))?;
    Ok(SubsonicResponse::ok(ResponseBody::AlbumList2(
        AlbumList2View::from_albums(&albums),
    )))
}

async fn search3(
    _caller: Caller,
    State(browser): State<GuardedCatalogBrowser>,
    params: Params,
) -> SubsonicResult {
    let request = SearchRequest {
        query: params.string("query"),
        artist_offset: params.parse_or("artistOffset", 0)?,
        artist_count: params.parse("artistCount")?,
        album_offset: params.parse_or("albumOffset", 0)?,
        album_count: params.parse("albumCount")?,
        song_offset: params.parse_or("songOffset", 0)?,
        song_count: params.parse("songCount")?,
    };
    let results = browser.search(&request)?;
    Ok(SubsonicResponse::ok(ResponseBody::SearchResult3(
        SearchResult3View::from_results(&results),
    )))
}

async fn get_playlists(caller: Caller, State(user_store): State<GuardedUserStore>) -> SubsonicResult {
    let playlists = user_store.get_user_playlists(caller.user.id)?;
    Ok(SubsonicResponse::ok(ResponseBody::Playlists(
        PlaylistsView::from_playlists(&playlists),
    )))
}

async fn get_playlist(
    _caller: Caller,
    State(user_store): State<GuardedUserStore>,
    params: Params,
) -> SubsonicResult {
    let playlist = user_store
        .get_playlist(params.required("id")?)?
        .ok_or(BrowseError::NotFound("playlist"))?;
    Ok(SubsonicResponse::ok(ResponseBody::Playlist(
        PlaylistWithSongsView::from_resolved(&playlist),
    )))
}

/// Registers `handler` under `/{name}` and `/{name}.view`, for GET and POST.
fn subsonic_route<H, T>(router: Router<ServerState>, name: &str, handler: H) -> Router<ServerState>
where
    H: Handler<T, ServerState>,
    T: 'static,
{
    router
        .route(&format!("/{}", name), get(handler.clone()).post(handler.clone()))
        .route(&format!("/{}.view", name), get(handler.clone()).post(handler))
}

pub fn make_app(
    config: ServerConfig,
    catalog_store: Arc<dyn CatalogStore>,
    user_store: Arc<dyn UserStore>,
) -> Result<Router> {
    let browser = Arc::new(CatalogBrowser::new(catalog_store, config.browse.clone()));
    let state = ServerState {
        config,
        start_time: Instant::now(),
        browser,
        user_store,
    };

    let mut rest_routes: Router<ServerState> = Router::new();
    rest_routes = subsonic_route(rest_routes, "ping", ping);
    rest_routes = subsonic_route(rest_routes, "getArtists", get_artists);
    rest_routes = subsonic_route(rest_routes, "getArtist", get_artist);
    rest_routes = subsonic_route(rest_routes, "getAlbum", get_album);
    rest_routes = subsonic_route(rest_routes, "getAlbumList2", get_album_list2);
    rest_routes = subsonic_route(rest_routes, "search3", search3);
    rest_routes = subsonic_route(rest_routes, "getPlaylists", get_playlists);
    rest_routes = subsonic_route(rest_routes, "getPlaylist", get_playlist);

    let app: Router = Router::new()
        .route("/", get(home))
        .nest("/rest", rest_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state);

    Ok(app)
}

pub async fn run_server(
    catalog_store: Arc<dyn CatalogStore>,
    user_store: Arc<dyn UserStore>,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    browse: crate::config::BrowseSettings,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        browse,
    };
    let app = make_app(config, catalog_store, user_store)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
