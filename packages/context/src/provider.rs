//! Provider seams. Object safe so the resolver can hold any mix of real and
//! fake implementations.

use futures::future::BoxFuture;
use wanderwave_domain::{GeocodedPlace, NearbyPlace, TrackSummary, WeatherData};

use crate::error::ProviderError;

pub trait WeatherProvider: Send + Sync {
    fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> BoxFuture<'_, Result<WeatherData, ProviderError>>;
}

pub trait PlacesProvider: Send + Sync {
    fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> BoxFuture<'_, Result<Option<GeocodedPlace>, ProviderError>>;

    /// Closest places first.
    fn search_nearby(
        &self,
        lat: f64,
        lon: f64,
    ) -> BoxFuture<'_, Result<Vec<NearbyPlace>, ProviderError>>;
}

/// Source of the listener's recent and liked tracks.
pub trait ListeningHistory: Send + Sync {
    fn recent_tracks(
        &self,
        limit: usize,
    ) -> BoxFuture<'_, Result<Vec<TrackSummary>, ProviderError>>;
}
