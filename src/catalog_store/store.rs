//! SQLite-backed catalog store.
//!
//! Reads go through a small round-robin pool of read-only connections; the
//! read-write connection is only used at startup to create or migrate the
//! schema.

use super::models::*;
use super::query_plan::{
    AlbumFilter, AlbumJoin, AlbumOrder, AlbumQueryPlan, Page, SubstringPattern,
};
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::migrate_if_needed;
use crate::user::{
    Playlist, PlaylistEntry, PlaylistId, ResolvedPlaylist, User, UserId, UserStore,
};
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const ARTIST_COLUMNS: &str = "artists.id, artists.name, artists.name_normalized";
const ARTIST_COLUMNS_LEN: usize = 3;

const ALBUM_COLUMNS: &str = "albums.id, albums.artist_id, albums.title, albums.title_normalized,
    albums.year, albums.created_at, albums.modified_at,
    (SELECT COUNT(*) FROM tracks t WHERE t.album_id = albums.id),
    (SELECT COALESCE(SUM(t.duration_secs), 0) FROM tracks t WHERE t.album_id = albums.id)";
const ALBUM_COLUMNS_LEN: usize = 9;

const TRACK_COLUMNS: &str = "tracks.id, tracks.album_id, tracks.title, tracks.title_normalized,
    tracks.disc_number, tracks.track_number, tracks.duration_secs, tracks.bitrate, tracks.size,
    tracks.suffix, tracks.content_type, tracks.path, tracks.created_at";
const TRACK_COLUMNS_LEN: usize = 13;

/// SQLite-backed catalog store.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    read_index: Arc<AtomicUsize>,
}

impl SqliteCatalogStore {
    /// Open (creating or migrating if needed) the catalog database.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of connections for concurrent reads (at least 1 is used)
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open catalog database")?;

        migrate_if_needed(&mut write_conn, CATALOG_VERSIONED_SCHEMAS)?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let version: i64 = write_conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        info!("Opened catalog {:?} (schema version {})", db_path, version);

        let read_pool_size = read_pool_size.max(1);
        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }
        // readers are open, so closing the writer keeps the WAL files around
        drop(write_conn);

        Ok(SqliteCatalogStore {
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn with_read_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let read_conn = self.get_read_conn();
        let conn = read_conn
            .lock()
            .map_err(|_| anyhow!("Catalog read connection lock poisoned"))?;
        f(&conn)
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        self.with_read_conn(|conn| {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                    r.get(0)
                })?;
            Ok(count as usize)
        })
        .with_context(|| format!("Failed to count {}", table))
    }

    // =========================================================================
    // Row parsing
    // =========================================================================

    fn parse_artist(row: &Row, base: usize) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(base)?,
            name: row.get(base + 1)?,
            name_normalized: row.get(base + 2)?,
        })
    }

    /// Parses the artist columns of a LEFT JOIN, which are all NULL when there is no artist.
    fn parse_optional_artist(row: &Row, base: usize) -> rusqlite::Result<Option<Artist>> {
        match row.get::<_, Option<ArtistId>>(base)? {
            Some(_) => Self::parse_artist(row, base).map(Some),
            None => Ok(None),
        }
    }

    fn parse_album(row: &Row, base: usize) -> rusqlite::Result<Album> {
        Ok(Album {
            id: row.get(base)?,
            artist_id: row.get(base + 1)?,
            title: row.get(base + 2)?,
            title_normalized: row.get(base + 3)?,
            year: row.get(base + 4)?,
            created_at: row.get(base + 5)?,
            modified_at: row.get(base + 6)?,
            song_count: row.get(base + 7)?,
            duration_secs: row.get(base + 8)?,
        })
    }

    fn parse_track(row: &Row, base: usize) -> rusqlite::Result<Track> {
        Ok(Track {
            id: row.get(base)?,
            album_id: row.get(base + 1)?,
            title: row.get(base + 2)?,
            title_normalized: row.get(base + 3)?,
            disc_number: row.get(base + 4)?,
            track_number: row.get(base + 5)?,
            duration_secs: row.get(base + 6)?,
            bitrate: row.get(base + 7)?,
            size: row.get::<_, i64>(base + 8)?.max(0) as u64,
            suffix: row.get(base + 9)?,
            content_type: row.get(base + 10)?,
            path: row.get(base + 11)?,
            created_at: row.get(base + 12)?,
        })
    }

    fn parse_album_with_artist(row: &Row) -> rusqlite::Result<AlbumWithArtist> {
        Ok(AlbumWithArtist {
            album: Self::parse_album(row, 0)?,
            artist: Self::parse_artist(row, ALBUM_COLUMNS_LEN)?,
        })
    }

    /// Parses rows selected as `TRACK_COLUMNS, ALBUM_COLUMNS, ARTIST_COLUMNS`.
    fn parse_track_with_album(row: &Row) -> rusqlite::Result<(Track, Album, Option<Artist>)> {
        Ok((
            Self::parse_track(row, 0)?,
            Self::parse_album(row, TRACK_COLUMNS_LEN)?,
            Self::parse_optional_artist(row, TRACK_COLUMNS_LEN + ALBUM_COLUMNS_LEN)?,
        ))
    }

    // =========================================================================
    // Single entity lookups
    // =========================================================================

    fn get_artist_inner(conn: &Connection, id: ArtistId) -> Result<Option<Artist>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM artists WHERE artists.id = ?1",
            ARTIST_COLUMNS
        ))?;
        Ok(stmt
            .query_row(params![id], |row| Self::parse_artist(row, 0))
            .optional()?)
    }

    fn get_album_inner(conn: &Connection, id: AlbumId) -> Result<Option<Album>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM albums WHERE albums.id = ?1",
            ALBUM_COLUMNS
        ))?;
        Ok(stmt
            .query_row(params![id], |row| Self::parse_album(row, 0))
            .optional()?)
    }

    // =========================================================================
    // Album plan translation
    // =========================================================================

    /// Translates a listing plan into SQL and its positional parameters.
    ///
    /// The owning artist is always inner-joined: it is attached to every
    /// result and drops albums without an artist at the same time.
    fn album_plan_sql(plan: &AlbumQueryPlan) -> Result<(String, Vec<Value>)> {
        if plan.order.needs_plays() && !matches!(plan.join, AlbumJoin::Plays { .. }) {
            bail!("Album order {:?} requires a plays join", plan.order);
        }

        let mut sql = format!(
            "SELECT {}, {} FROM albums JOIN artists ON albums.artist_id = artists.id",
            ALBUM_COLUMNS, ARTIST_COLUMNS
        );
        let mut values: Vec<Value> = Vec::new();

        match plan.join {
            AlbumJoin::None | AlbumJoin::Artist => {}
            AlbumJoin::Plays { user_id } => {
                sql.push_str(" JOIN plays ON plays.album_id = albums.id AND plays.user_id = ?");
                values.push(Value::Integer(user_id));
            }
        }

        sql.push_str(" WHERE albums.artist_id IS NOT NULL");
        match plan.filter {
            AlbumFilter::None => {}
            AlbumFilter::YearBetween { from, to } => {
                sql.push_str(" AND albums.year BETWEEN ? AND ?");
                values.push(Value::Integer(from as i64));
                values.push(Value::Integer(to as i64));
            }
        }

        let order_by = match plan.order {
            AlbumOrder::ArtistName => "artists.name, albums.id",
            AlbumOrder::Title => "albums.title, albums.id",
            AlbumOrder::Year { descending: false } => "albums.year, albums.id",
            AlbumOrder::Year { descending: true } => "albums.year DESC, albums.id",
            AlbumOrder::PlayCountDesc => "plays.count DESC, albums.id",
            AlbumOrder::ModifiedDesc => "albums.modified_at DESC, albums.id",
            AlbumOrder::PlayTimeDesc => "plays.time DESC, albums.id",
            AlbumOrder::Random => "RANDOM()",
        };
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);

        sql.push_str(" LIMIT ? OFFSET ?");
        let (limit, offset) = sql_window(plan.page);
        values.push(Value::Integer(limit));
        values.push(Value::Integer(offset));

        Ok((sql, values))
    }
}

/// LIMIT and OFFSET operands for a page. SQLite integers are signed, so
/// values past `i64::MAX` saturate instead of wrapping.
fn sql_window(page: Page) -> (i64, i64) {
    (
        i64::try_from(page.limit).unwrap_or(i64::MAX),
        i64::try_from(page.offset).unwrap_or(i64::MAX),
    )
}

impl CatalogStore for SqliteCatalogStore {
    fn get_artists_with_album_count(&self) -> Result<Vec<ArtistWithAlbumCount>> {
        self.with_read_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {}, COUNT(albums.id) FROM artists
                 LEFT JOIN albums ON albums.artist_id = artists.id
                 GROUP BY artists.id
                 ORDER BY artists.id",
                ARTIST_COLUMNS
            ))?;
            let artists = stmt
                .query_map([], |row| {
                    Ok(ArtistWithAlbumCount {
                        artist: Self::parse_artist(row, 0)?,
                        album_count: row.get(ARTIST_COLUMNS_LEN)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(artists)
        })
    }

    fn get_resolved_artist(&self, id: ArtistId) -> Result<Option<ResolvedArtist>> {
        self.with_read_conn(|conn| {
            let artist = match Self::get_artist_inner(conn, id)? {
                Some(artist) => artist,
                None => return Ok(None),
            };

            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {} FROM albums WHERE albums.artist_id = ?1
                 ORDER BY albums.year, albums.title, albums.id",
                ALBUM_COLUMNS
            ))?;
            let albums = stmt
                .query_map(params![id], |row| Self::parse_album(row, 0))?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(ResolvedArtist { artist, albums }))
        })
    }

    fn get_resolved_album(&self, id: AlbumId) -> Result<Option<ResolvedAlbum>> {
        self.with_read_conn(|conn| {
            let album = match Self::get_album_inner(conn, id)? {
                Some(album) => album,
                None => return Ok(None),
            };

            let artist = match album.artist_id {
                Some(artist_id) => Self::get_artist_inner(conn, artist_id)?,
                None => None,
            };

            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {} FROM tracks WHERE tracks.album_id = ?1
                 ORDER BY tracks.disc_number, tracks.track_number, tracks.id",
                TRACK_COLUMNS
            ))?;
            let tracks = stmt
                .query_map(params![id], |row| Self::parse_track(row, 0))?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(ResolvedAlbum {
                album,
                artist,
                tracks,
            }))
        })
    }

    fn find_albums(&self, plan: &AlbumQueryPlan) -> Result<Vec<AlbumWithArtist>> {
        let (sql, values) = Self::album_plan_sql(plan)?;
        debug!("Running album plan {:?}", plan);

        self.with_read_conn(|conn| {
            let mut stmt = conn.prepare_cached(&sql)?;
            let albums = stmt
                .query_map(params_from_iter(values.iter()), Self::parse_album_with_artist)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(albums)
        })
    }

    fn search_artists(&self, pattern: &SubstringPattern, page: Page) -> Result<Vec<Artist>> {
        let (limit, offset) = sql_window(page);
        self.with_read_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {} FROM artists
                 WHERE artists.name LIKE ?1 ESCAPE '\\' OR artists.name_normalized LIKE ?2 ESCAPE '\\'
                 ORDER BY artists.id
                 LIMIT ?3 OFFSET ?4",
                ARTIST_COLUMNS
            ))?;
            let artists = stmt
                .query_map(
                    params![pattern.like_raw(), pattern.like_folded(), limit, offset],
                    |row| Self::parse_artist(row, 0),
                )?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(artists)
        })
    }

    fn search_albums(
        &self,
        pattern: &SubstringPattern,
        page: Page,
    ) -> Result<Vec<AlbumWithArtist>> {
        let (limit, offset) = sql_window(page);
        self.with_read_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {}, {} FROM albums
                 JOIN artists ON albums.artist_id = artists.id
                 WHERE albums.title LIKE ?1 ESCAPE '\\' OR albums.title_normalized LIKE ?2 ESCAPE '\\'
                 ORDER BY albums.id
                 LIMIT ?3 OFFSET ?4",
                ALBUM_COLUMNS, ARTIST_COLUMNS
            ))?;
            let albums = stmt
                .query_map(
                    params![pattern.like_raw(), pattern.like_folded(), limit, offset],
                    Self::parse_album_with_artist,
                )?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(albums)
        })
    }

    fn search_tracks(
        &self,
        pattern: &SubstringPattern,
        page: Page,
    ) -> Result<Vec<TrackWithAlbum>> {
        let (limit, offset) = sql_window(page);
        self.with_read_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {}, {}, {} FROM tracks
                 JOIN albums ON tracks.album_id = albums.id
                 LEFT JOIN artists ON albums.artist_id = artists.id
                 WHERE tracks.title LIKE ?1 ESCAPE '\\' OR tracks.title_normalized LIKE ?2 ESCAPE '\\'
                 ORDER BY tracks.id
                 LIMIT ?3 OFFSET ?4",
                TRACK_COLUMNS, ALBUM_COLUMNS, ARTIST_COLUMNS
            ))?;
            let tracks = stmt
                .query_map(
                    params![pattern.like_raw(), pattern.like_folded(), limit, offset],
                    Self::parse_track_with_album,
                )?
                .map(|r| {
                    r.map(|(track, album, artist)| TrackWithAlbum {
                        track,
                        album,
                        artist,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tracks)
        })
    }

    fn get_artists_count(&self) -> Result<usize> {
        self.count_rows("artists")
    }

    fn get_albums_count(&self) -> Result<usize> {
        self.count_rows("albums")
    }

    fn get_tracks_count(&self) -> Result<usize> {
        self.count_rows("tracks")
    }
}

impl UserStore for SqliteCatalogStore {
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        self.with_read_conn(|conn| {
            let mut stmt =
                conn.prepare_cached("SELECT id, name, is_admin FROM users WHERE name = ?1")?;
            Ok(stmt
                .query_row(params![name], |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        is_admin: row.get::<_, i32>(2)? != 0,
                    })
                })
                .optional()?)
        })
    }

    fn get_user_password(&self, user_id: UserId) -> Result<Option<String>> {
        self.with_read_conn(|conn| {
            let mut stmt = conn.prepare_cached("SELECT password FROM users WHERE id = ?1")?;
            Ok(stmt.query_row(params![user_id], |row| row.get(0)).optional()?)
        })
    }

    fn get_user_playlists(&self, user_id: UserId) -> Result<Vec<Playlist>> {
        self.with_read_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "{} WHERE playlists.user_id = ?1 ORDER BY playlists.updated_at DESC, playlists.id",
                PLAYLIST_SELECT
            ))?;
            let playlists = stmt
                .query_map(params![user_id], parse_playlist)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(playlists)
        })
    }

    fn get_playlist(&self, playlist_id: PlaylistId) -> Result<Option<ResolvedPlaylist>> {
        self.with_read_conn(|conn| {
            let mut stmt =
                conn.prepare_cached(&format!("{} WHERE playlists.id = ?1", PLAYLIST_SELECT))?;
            let playlist = match stmt.query_row(params![playlist_id], parse_playlist).optional()? {
                Some(playlist) => playlist,
                None => return Ok(None),
            };

            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {}, {}, {} FROM playlist_items
                 JOIN tracks ON tracks.id = playlist_items.track_id
                 JOIN albums ON tracks.album_id = albums.id
                 LEFT JOIN artists ON albums.artist_id = artists.id
                 WHERE playlist_items.playlist_id = ?1
                 ORDER BY playlist_items.position",
                TRACK_COLUMNS, ALBUM_COLUMNS, ARTIST_COLUMNS
            ))?;
            let entries = stmt
                .query_map(params![playlist_id], Self::parse_track_with_album)?
                .map(|r| {
                    r.map(|(track, album, artist)| PlaylistEntry {
                        track,
                        album,
                        artist,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(ResolvedPlaylist { playlist, entries }))
        })
    }
}

const PLAYLIST_SELECT: &str = "SELECT playlists.id, playlists.user_id, users.name, playlists.name,
    playlists.comment, playlists.created_at, playlists.updated_at,
    (SELECT COUNT(*) FROM playlist_items i WHERE i.playlist_id = playlists.id)
    FROM playlists JOIN users ON users.id = playlists.user_id";

fn parse_playlist(row: &Row) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        id: row.get(0)?,
        user_id: row.get(1)?,
        owner: row.get(2)?,
        name: row.get(3)?,
        comment: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        track_count: row.get(7)?,
    })
}
