//! Hand-written catalog store double for browse tests.

use crate::catalog_store::*;
use anyhow::{bail, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves canned data and records every query it receives.
#[derive(Default)]
pub struct RecordingCatalogStore {
    pub artists: Vec<ArtistWithAlbumCount>,
    pub albums: Vec<AlbumWithArtist>,
    pub tracks: Vec<TrackWithAlbum>,
    pub fail: bool,
    pub plans: Mutex<Vec<AlbumQueryPlan>>,
    pub searches: Mutex<Vec<(&'static str, String, Page)>>,
    pub calls: AtomicUsize,
}

impl RecordingCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artists(mut self, names: &[&str]) -> Self {
        self.artists = names
            .iter()
            .enumerate()
            .map(|(i, name)| ArtistWithAlbumCount {
                artist: artist(i as i64 + 1, name),
                album_count: 1,
            })
            .collect();
        self
    }

    pub fn with_albums(mut self, albums: Vec<AlbumWithArtist>) -> Self {
        self.albums = albums;
        self
    }

    pub fn with_tracks(mut self, tracks: Vec<TrackWithAlbum>) -> Self {
        self.tracks = tracks;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_plans(&self) -> Vec<AlbumQueryPlan> {
        self.plans.lock().unwrap().clone()
    }

    pub fn recorded_searches(&self) -> Vec<(&'static str, String, Page)> {
        self.searches.lock().unwrap().clone()
    }

    fn touch(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("store unavailable");
        }
        Ok(())
    }

    fn record_search(&self, kind: &'static str, pattern: &SubstringPattern, page: Page) {
        self.searches
            .lock()
            .unwrap()
            .push((kind, pattern.text().to_string(), page));
    }
}

fn window<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    items.iter().skip(page.offset).take(page.limit).cloned().collect()
}

pub fn artist(id: i64, name: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        name_normalized: crate::normalize::fold(name),
    }
}

pub fn album(id: i64, artist: &Artist, title: &str, year: Option<i32>) -> AlbumWithArtist {
    AlbumWithArtist {
        album: Album {
            id,
            artist_id: Some(artist.id),
            title: title.to_string(),
            title_normalized: crate::normalize::fold(title),
            year,
            created_at: 1_600_000_000,
            modified_at: 1_700_000_000 + id,
            song_count: 2,
            duration_secs: 420,
        },
        artist: artist.clone(),
    }
}

pub fn track(id: i64, owner: &AlbumWithArtist, title: &str) -> TrackWithAlbum {
    TrackWithAlbum {
        track: Track {
            id,
            album_id: owner.album.id,
            title: title.to_string(),
            title_normalized: crate::normalize::fold(title),
            disc_number: 1,
            track_number: id as u32,
            duration_secs: 210,
            bitrate: 320,
            size: 8_400_000,
            suffix: "mp3".to_string(),
            content_type: "audio/mpeg".to_string(),
            path: format!("music/{}.mp3", title),
            created_at: 1_600_000_000,
        },
        album: owner.album.clone(),
        artist: Some(owner.artist.clone()),
    }
}

impl CatalogStore for RecordingCatalogStore {
    fn get_artists_with_album_count(&self) -> Result<Vec<ArtistWithAlbumCount>> {
        self.touch()?;
        Ok(self.artists.clone())
    }

    fn get_resolved_artist(&self, id: ArtistId) -> Result<Option<ResolvedArtist>> {
        self.touch()?;
        Ok(self
            .artists
            .iter()
            .find(|a| a.artist.id == id)
            .map(|a| ResolvedArtist {
                artist: a.artist.clone(),
                albums: self
                    .albums
                    .iter()
                    .filter(|al| al.artist.id == id)
                    .map(|al| al.album.clone())
                    .collect(),
            }))
    }

    fn get_resolved_album(&self, id: AlbumId) -> Result<Option<ResolvedAlbum>> {
        self.touch()?;
        Ok(self
            .albums
            .iter()
            .find(|a| a.album.id == id)
            .map(|a| ResolvedAlbum {
                album: a.album.clone(),
                artist: Some(a.artist.clone()),
                tracks: self
                    .tracks
                    .iter()
                    .filter(|t| t.album.id == id)
                    .map(|t| t.track.clone())
                    .collect(),
            }))
    }

    fn find_albums(&self, plan: &AlbumQueryPlan) -> Result<Vec<AlbumWithArtist>> {
        self.touch()?;
        self.plans.lock().unwrap().push(plan.clone());
        Ok(window(&self.albums, plan.page))
    }

    fn search_artists(&self, pattern: &SubstringPattern, page: Page) -> Result<Vec<Artist>> {
        self.touch()?;
        self.record_search("artists", pattern, page);
        let artists: Vec<Artist> = self.artists.iter().map(|a| a.artist.clone()).collect();
        Ok(window(&artists, page))
    }

    fn search_albums(
        &self,
        pattern: &SubstringPattern,
        page: Page,
    ) -> Result<Vec<AlbumWithArtist>> {
        self.touch()?;
        self.record_search("albums", pattern, page);
        Ok(window(&self.albums, page))
    }

    fn search_tracks(
        &self,
        pattern: &SubstringPattern,
        page: Page,
    ) -> Result<Vec<TrackWithAlbum>> {
        self.touch()?;
        self.record_search("tracks", pattern, page);
        Ok(window(&self.tracks, page))
    }

    fn get_artists_count(&self) -> Result<usize> {
        Ok(self.artists.len())
    }

    fn get_albums_count(&self) -> Result<usize> {
        Ok(self.albums.len())
    }

    fn get_tracks_count(&self) -> Result<usize> {
        Ok(self.tracks.len())
    }
}
