//! Alphabetic artist index.

use crate::catalog_store::ArtistWithAlbumCount;
use crate::normalize::fold;
use std::collections::BTreeMap;

/// Bucket key for artists whose folded name does not start with `a..=z`.
pub const FALLBACK_INDEX_KEY: &str = "#";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexBucket {
    pub key: String,
    pub artists: Vec<ArtistWithAlbumCount>,
}

/// The bucket key an artist name falls under.
pub fn index_key(name: &str) -> String {
    match fold(name).chars().next() {
        Some(c) if c.is_ascii_lowercase() => c.to_string(),
        _ => FALLBACK_INDEX_KEY.to_string(),
    }
}

/// Groups artists into alphabetic buckets.
///
/// Only non-empty buckets are returned, sorted by key (`#` first). Artists
/// keep their input order inside a bucket.
pub fn build_artist_index(artists: Vec<ArtistWithAlbumCount>) -> Vec<IndexBucket> {
    let mut buckets: BTreeMap<String, Vec<ArtistWithAlbumCount>> = BTreeMap::new();
    for artist in artists {
        let key = index_key(artist.artist.index_name());
        buckets.entry(key).or_default().push(artist);
    }
    buckets
        .into_iter()
        .map(|(key, artists)| IndexBucket { key, artists })
        .collect()
}
