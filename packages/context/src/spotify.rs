//! Spotify Web API listening history: recently played and saved tracks.

use futures::future::BoxFuture;
use serde::Deserialize;
use std::time::Duration;
use wanderwave_domain::{TrackSource, TrackSummary};

use crate::error::ProviderError;
use crate::provider::ListeningHistory;

const RECENTLY_PLAYED_URL: &str = "https://api.spotify.com/v1/me/player/recently-played";
const SAVED_TRACKS_URL: &str = "https://api.spotify.com/v1/me/tracks";

/// Largest page either endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<PageItem>,
}

/// Both endpoints wrap the track the same way; episodes and removed
/// tracks come back as `null`.
#[derive(Debug, Deserialize)]
struct PageItem {
    track: Option<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<RawArtist>,
}

#[derive(Debug, Deserialize)]
struct RawArtist {
    #[serde(default)]
    name: String,
}

fn summarize(page: TrackPage, source: TrackSource) -> Vec<TrackSummary> {
    page.items
        .into_iter()
        .filter_map(|item| item.track)
        .map(|track| TrackSummary {
            name: track.name,
            artist: track
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            source,
        })
        .collect()
}

/// Reads the listener's history with a user access token that carries the
/// `user-read-recently-played` and `user-library-read` scopes.
#[derive(Debug, Clone)]
pub struct SpotifyHistory {
    http: reqwest::Client,
    token: String,
}

impl SpotifyHistory {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ProviderError::MissingApiKey("spotify"));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, token })
    }

    async fn page(&self, url: &str, limit: usize) -> Result<TrackPage, ProviderError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        Ok(self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Up to `limit` recently played tracks followed by up to `limit` saved
    /// ones. Either request failing fails the lookup.
    pub async fn tracks(&self, limit: usize) -> Result<Vec<TrackSummary>, ProviderError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let (recent, saved) = futures::try_join!(
            self.page(RECENTLY_PLAYED_URL, limit),
            self.page(SAVED_TRACKS_URL, limit),
        )?;
        let mut tracks = summarize(recent, TrackSource::RecentlyPlayed);
        tracks.extend(summarize(saved, TrackSource::Liked));
        Ok(tracks)
    }
}

impl ListeningHistory for SpotifyHistory {
    fn recent_tracks(
        &self,
        limit: usize,
    ) -> BoxFuture<'_, Result<Vec<TrackSummary>, ProviderError>> {
        Box::pin(self.tracks(limit))
    }
}
