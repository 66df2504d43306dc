//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (user credentials, catalog IDs, etc.),
//! update only this file.

// ============================================================================
// Test User Credentials
// ============================================================================

/// Regular test user name
pub const TEST_USER: &str = "alice";

/// Regular test user password
pub const TEST_PASS: &str = "secret";

/// `TEST_PASS` hex encoded with the `enc:` prefix
pub const TEST_PASS_HEX: &str = "enc:736563726574";

/// Second user, with its own plays and playlists
pub const OTHER_USER: &str = "bob";

pub const OTHER_PASS: &str = "hunter2";

// ============================================================================
// Test Catalog IDs
// ============================================================================

pub const ARTIST_ARZTE_ID: i64 = 1;
pub const ARTIST_BECK_ID: i64 = 2;
pub const ARTIST_2PAC_ID: i64 = 3;
pub const ARTIST_BEATLES_ID: i64 = 4;

/// "Die Bestie in Menschengestalt" by Ärzte, modified at t1
pub const ALBUM_BESTIE_ID: i64 = 1;
/// "Odelay" by beck, modified at t3, two discs
pub const ALBUM_ODELAY_ID: i64 = 2;
/// "All Eyez on Me" by 2Pac, modified at t2
pub const ALBUM_EYEZ_ID: i64 = 3;
/// "Abbey Road" by The Beatles
pub const ALBUM_ABBEY_ROAD_ID: i64 = 4;
/// "Beatles Bootlegs", not attributed to any artist
pub const ALBUM_ORPHAN_ID: i64 = 5;
/// "Beatles Anthology" by The Beatles
pub const ALBUM_ANTHOLOGY_ID: i64 = 6;

pub const PLAYLIST_ROAD_TRIP_ID: i64 = 1;
pub const NONEXISTENT_ID: i64 = 9999;

// ============================================================================
// Test Catalog Metadata
// ============================================================================

pub const ARTIST_ARZTE_NAME: &str = "Ärzte";
pub const ARTIST_BECK_NAME: &str = "beck";
pub const ARTIST_2PAC_NAME: &str = "2Pac";
pub const ARTIST_BEATLES_NAME: &str = "The Beatles";

pub const ALBUM_ODELAY_TITLE: &str = "Odelay";
pub const ALBUM_EYEZ_TITLE: &str = "All Eyez on Me";
pub const ALBUM_ANTHOLOGY_TITLE: &str = "Beatles Anthology";

/// Albums with an artist, by title
pub const ALBUM_TITLES_ALPHABETICAL: [&str; 5] = [
    "Abbey Road",
    "All Eyez on Me",
    "Beatles Anthology",
    "Die Bestie in Menschengestalt",
    "Odelay",
];

/// Odelay tracks in disc then track order
pub const ODELAY_TRACKS_IN_ORDER: [&str; 3] = ["Devils Haircut", "Where It's At", "Beatles Cover"];

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
