//! Test fixture creation for the catalog database
//!
//! The server never writes to the catalog, so fixtures are inserted with
//! direct SQL after the store has created the schema.

use super::constants::*;
use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use subsonic_catalog_server::catalog_store::SqliteCatalogStore;
use subsonic_catalog_server::normalize::fold;
use tempfile::TempDir;

/// (id, artist_id, title, year, modified_at)
const ALBUMS: [(i64, Option<i64>, &str, i32, i64); 6] = [
    (ALBUM_BESTIE_ID, Some(ARTIST_ARZTE_ID), "Die Bestie in Menschengestalt", 1993, 1000),
    (ALBUM_ODELAY_ID, Some(ARTIST_BECK_ID), ALBUM_ODELAY_TITLE, 1996, 3000),
    (ALBUM_EYEZ_ID, Some(ARTIST_2PAC_ID), ALBUM_EYEZ_TITLE, 1996, 2000),
    (ALBUM_ABBEY_ROAD_ID, Some(ARTIST_BEATLES_ID), "Abbey Road", 1969, 1500),
    (ALBUM_ORPHAN_ID, None, "Beatles Bootlegs", 2000, 9000),
    (ALBUM_ANTHOLOGY_ID, Some(ARTIST_BEATLES_ID), ALBUM_ANTHOLOGY_TITLE, 1995, 500),
];

/// (id, album_id, title, disc, track)
const TRACKS: [(i64, i64, &str, u32, u32); 8] = [
    (1, ALBUM_ABBEY_ROAD_ID, "Come Together", 1, 1),
    (2, ALBUM_ABBEY_ROAD_ID, "Something", 1, 2),
    (3, ALBUM_ODELAY_ID, "Beatles Cover", 2, 1),
    (4, ALBUM_ODELAY_ID, "Where It's At", 1, 2),
    (5, ALBUM_ODELAY_ID, "Devils Haircut", 1, 1),
    (6, ALBUM_EYEZ_ID, "California Love", 1, 1),
    (7, ALBUM_BESTIE_ID, "Schrei nach Liebe", 1, 1),
    (8, ALBUM_ORPHAN_ID, "Beatles Demo", 1, 1),
];

/// Creates a temporary catalog database with users, artists, albums,
/// tracks, plays and playlists.
/// Returns (temp_dir, catalog_db_path)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let catalog_db_path = dir.path().join("catalog.db");

    // Initialize the store (creates schema)
    let _store = SqliteCatalogStore::new(&catalog_db_path, 1)?;

    let conn = Connection::open(&catalog_db_path)?;

    // Users
    conn.execute(
        "INSERT INTO users (id, name, password) VALUES (1, ?1, ?2)",
        params![TEST_USER, TEST_PASS],
    )?;
    conn.execute(
        "INSERT INTO users (id, name, password) VALUES (2, ?1, ?2)",
        params![OTHER_USER, OTHER_PASS],
    )?;

    // Artists
    for (id, name) in [
        (ARTIST_ARZTE_ID, ARTIST_ARZTE_NAME),
        (ARTIST_BECK_ID, ARTIST_BECK_NAME),
        (ARTIST_2PAC_ID, ARTIST_2PAC_NAME),
        (ARTIST_BEATLES_ID, ARTIST_BEATLES_NAME),
    ] {
        conn.execute(
            "INSERT INTO artists (id, name, name_normalized) VALUES (?1, ?2, ?3)",
            params![id, name, fold(name)],
        )?;
    }

    // Albums
    for (id, artist_id, title, year, modified_at) in ALBUMS {
        conn.execute(
            "INSERT INTO albums (id, artist_id, title, title_normalized, year, modified_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, artist_id, title, fold(title), year, modified_at],
        )?;
    }

    // Tracks
    for (id, album_id, title, disc, track) in TRACKS {
        conn.execute(
            "INSERT INTO tracks (id, album_id, title, title_normalized, disc_number, track_number,
                                 duration_secs, bitrate, size, suffix, content_type, path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 200, 320, 8000000, 'mp3', 'audio/mpeg', ?7)",
            params![
                id,
                album_id,
                title,
                fold(title),
                disc,
                track,
                format!("music/{}/{}.mp3", album_id, id)
            ],
        )?;
    }

    // Plays: (user_id, album_id, count, time)
    for (user_id, album_id, count, time) in [
        (1, ALBUM_ODELAY_ID, 3, 100),
        (1, ALBUM_ABBEY_ROAD_ID, 10, 50),
        (1, ALBUM_ORPHAN_ID, 99, 999),
        (2, ALBUM_BESTIE_ID, 1, 10),
    ] {
        conn.execute(
            "INSERT INTO plays (user_id, album_id, count, time) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, album_id, count, time],
        )?;
    }

    // Playlists
    conn.execute(
        "INSERT INTO playlists (id, user_id, name, comment, updated_at)
         VALUES (?1, 1, 'Road Trip', 'for the car', 200)",
        params![PLAYLIST_ROAD_TRIP_ID],
    )?;
    conn.execute("INSERT INTO playlists (id, user_id, name, updated_at) VALUES (2, 1, 'Empty', 100)", [])?;
    conn.execute("INSERT INTO playlists (id, user_id, name, updated_at) VALUES (3, 2, 'Bob Mix', 300)", [])?;
    for (position, track_id) in [(0, 6), (1, 1)] {
        conn.execute(
            "INSERT INTO playlist_items (playlist_id, track_id, position) VALUES (?1, ?2, ?3)",
            params![PLAYLIST_ROAD_TRIP_ID, track_id, position],
        )?;
    }

    Ok((dir, catalog_db_path))
}
