use std::sync::Arc;
use tracing::{debug, warn};
use wanderwave_domain::{GeocodedPlace, NearbyPlace, WeatherData, WeightedPrompt};

use crate::history::history_style_prompts;
use crate::provider::{ListeningHistory, PlacesProvider, WeatherProvider};

const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Everything the resolver managed to learn about one location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSnapshot {
    pub weather: Option<WeatherData>,
    pub geocoded: Option<GeocodedPlace>,
    /// Closest nearby place, if any.
    pub nearby: Option<NearbyPlace>,
    pub history_styles: Vec<WeightedPrompt>,
}

/// Runs every configured provider concurrently. A failing provider is
/// logged and contributes nothing.
#[derive(Clone, Default)]
pub struct ContextResolver {
    weather: Option<Arc<dyn WeatherProvider>>,
    places: Option<Arc<dyn PlacesProvider>>,
    history: Option<Arc<dyn ListeningHistory>>,
    history_limit: usize,
}

impl ContextResolver {
    pub fn new() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            ..Self::default()
        }
    }

    pub fn with_weather(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }

    pub fn with_places(mut self, provider: Arc<dyn PlacesProvider>) -> Self {
        self.places = Some(provider);
        self
    }

    pub fn with_history(mut self, provider: Arc<dyn ListeningHistory>, limit: usize) -> Self {
        self.history = Some(provider);
        self.history_limit = limit;
        self
    }

    /// Style descriptors from listening history alone. Needs no location.
    pub async fn history_styles(&self) -> Vec<WeightedPrompt> {
        let Some(provider) = self.history.as_ref() else {
            return Vec::new();
        };
        match provider.recent_tracks(self.history_limit).await {
            Ok(tracks) => history_style_prompts(&tracks),
            Err(e) => {
                warn!("listening history lookup failed: {e}");
                Vec::new()
            }
        }
    }

    pub async fn resolve(&self, lat: f64, lon: f64) -> ContextSnapshot {
        let weather = async {
            let provider = self.weather.as_ref()?;
            provider
                .current_weather(lat, lon)
                .await
                .inspect_err(|e| warn!("weather lookup failed: {e}"))
                .ok()
        };
        let geocoded = async {
            let provider = self.places.as_ref()?;
            provider
                .reverse_geocode(lat, lon)
                .await
                .inspect_err(|e| warn!("reverse geocoding failed: {e}"))
                .ok()
                .flatten()
        };
        let nearby = async {
            let provider = self.places.as_ref()?;
            provider
                .search_nearby(lat, lon)
                .await
                .inspect_err(|e| warn!("nearby search failed: {e}"))
                .ok()
                .and_then(|places| places.into_iter().next())
        };
        let (weather, geocoded, nearby, history_styles) =
            tokio::join!(weather, geocoded, nearby, self.history_styles());

        debug!(
            weather = weather.is_some(),
            geocoded = geocoded.is_some(),
            nearby = nearby.is_some(),
            styles = history_styles.len(),
            "context resolved"
        );

        ContextSnapshot {
            weather,
            geocoded,
            nearby,
            history_styles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use futures::future::BoxFuture;
    use wanderwave_domain::{TrackSource, TrackSummary, WeatherCondition};

    struct FixedWeather;

    impl WeatherProvider for FixedWeather {
        fn current_weather(
            &self,
            _: f64,
            _: f64,
        ) -> BoxFuture<'_, Result<WeatherData, ProviderError>> {
            Box::pin(async { Ok(WeatherData::new(WeatherCondition::Rainy, 12.0)) })
        }
    }

    struct BrokenPlaces;

    impl PlacesProvider for BrokenPlaces {
        fn reverse_geocode(
            &self,
            _: f64,
            _: f64,
        ) -> BoxFuture<'_, Result<Option<GeocodedPlace>, ProviderError>> {
            Box::pin(async { Err(ProviderError::MissingApiKey("google places")) })
        }

        fn search_nearby(
            &self,
            _: f64,
            _: f64,
        ) -> BoxFuture<'_, Result<Vec<NearbyPlace>, ProviderError>> {
            Box::pin(async {
                Err(ProviderError::Decode {
                    service: "places",
                    reason: "truncated body".to_string(),
                })
            })
        }
    }

    struct TwoPlaces;

    impl PlacesProvider for TwoPlaces {
        fn reverse_geocode(
            &self,
            _: f64,
            _: f64,
        ) -> BoxFuture<'_, Result<Option<GeocodedPlace>, ProviderError>> {
            Box::pin(async { Ok(None) })
        }

        fn search_nearby(
            &self,
            _: f64,
            _: f64,
        ) -> BoxFuture<'_, Result<Vec<NearbyPlace>, ProviderError>> {
            Box::pin(async {
                Ok(vec![
                    NearbyPlace {
                        name: "first".to_string(),
                        ..NearbyPlace::default()
                    },
                    NearbyPlace {
                        name: "second".to_string(),
                        ..NearbyPlace::default()
                    },
                ])
            })
        }
    }

    struct History;

    impl ListeningHistory for History {
        fn recent_tracks(
            &self,
            limit: usize,
        ) -> BoxFuture<'_, Result<Vec<TrackSummary>, ProviderError>> {
            Box::pin(async move {
                assert_eq!(limit, 5);
                Ok(vec![TrackSummary {
                    name: "Kiara".to_string(),
                    artist: "Bonobo".to_string(),
                    source: TrackSource::Liked,
                }])
            })
        }
    }

    #[tokio::test]
    async fn no_providers_yields_empty_snapshot() {
        let snapshot = ContextResolver::new().resolve(51.5, -0.1).await;
        assert_eq!(snapshot, ContextSnapshot::default());
    }

    #[tokio::test]
    async fn failures_degrade_to_empty() {
        let resolver = ContextResolver::new()
            .with_weather(Arc::new(FixedWeather))
            .with_places(Arc::new(BrokenPlaces));
        let snapshot = resolver.resolve(51.5, -0.1).await;
        assert_eq!(
            snapshot.weather.map(|w| w.condition),
            Some(WeatherCondition::Rainy)
        );
        assert!(snapshot.geocoded.is_none());
        assert!(snapshot.nearby.is_none());
    }

    #[tokio::test]
    async fn closest_place_and_history_styles() {
        let resolver = ContextResolver::new()
            .with_places(Arc::new(TwoPlaces))
            .with_history(Arc::new(History), 5);
        let snapshot = resolver.resolve(0.0, 0.0).await;
        assert_eq!(snapshot.nearby.map(|p| p.name).as_deref(), Some("first"));
        assert_eq!(snapshot.history_styles.len(), 1);
        assert_eq!(snapshot.history_styles[0].text, "in the style of Bonobo");
    }

    #[tokio::test]
    async fn history_resolves_without_a_location() {
        let resolver = ContextResolver::new().with_history(Arc::new(History), 5);
        let styles = resolver.history_styles().await;
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].text, "in the style of Bonobo");

        assert!(ContextResolver::new().history_styles().await.is_empty());
    }
}
