//! Open-Meteo weather and city geocoding. No API key required.

use futures::future::BoxFuture;
use serde::Deserialize;
use std::time::Duration;
use wanderwave_domain::{WeatherCondition, WeatherData};

use crate::error::ProviderError;
use crate::provider::WeatherProvider;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";

/// Calm-sky conditions at or above this wind speed are reported as windy.
pub const WINDY_THRESHOLD_KMH: f32 = 40.0;

/// Map a WMO weather interpretation code to a condition.
pub fn condition_from_wmo(code: u32) -> WeatherCondition {
    match code {
        0 | 1 => WeatherCondition::Sunny,
        2 | 3 => WeatherCondition::Cloudy,
        45 | 48 => WeatherCondition::Foggy,
        51..=67 | 80..=82 => WeatherCondition::Rainy,
        71..=77 | 85 | 86 => WeatherCondition::Snowy,
        95..=99 => WeatherCondition::Stormy,
        _ => WeatherCondition::Clear,
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f32,
    #[serde(default)]
    relative_humidity_2m: f32,
    #[serde(default)]
    weather_code: u32,
    #[serde(default)]
    wind_speed_10m: f32,
}

impl From<CurrentConditions> for WeatherData {
    fn from(current: CurrentConditions) -> Self {
        let mut condition = condition_from_wmo(current.weather_code);
        if current.wind_speed_10m >= WINDY_THRESHOLD_KMH
            && matches!(
                condition,
                WeatherCondition::Sunny | WeatherCondition::Clear | WeatherCondition::Cloudy
            )
        {
            condition = WeatherCondition::Windy;
        }
        WeatherData {
            temperature_c: current.temperature_2m,
            condition,
            description: condition.describe().to_string(),
            humidity: current.relative_humidity_2m,
            wind_speed_kmh: current.wind_speed_10m,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: reqwest::Client,
}

impl OpenMeteo {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Resolve a city name to `(lat, lon)`. `None` when nothing matched.
    pub async fn geocode_city(&self, city: &str) -> Result<Option<(f64, f64)>, ProviderError> {
        let response: GeocodingResponse = self
            .http
            .get(GEOCODING_URL)
            .query(&[("name", city), ("count", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response
            .results
            .into_iter()
            .next()
            .map(|r| (r.latitude, r.longitude)))
    }

    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherData, ProviderError> {
        let response: ForecastResponse = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.current.into())
    }
}

impl WeatherProvider for OpenMeteo {
    fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> BoxFuture<'_, Result<WeatherData, ProviderError>> {
        Box::pin(self.fetch_weather(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmo_codes() {
        assert_eq!(condition_from_wmo(0), WeatherCondition::Sunny);
        assert_eq!(condition_from_wmo(3), WeatherCondition::Cloudy);
        assert_eq!(condition_from_wmo(48), WeatherCondition::Foggy);
        assert_eq!(condition_from_wmo(81), WeatherCondition::Rainy);
        assert_eq!(condition_from_wmo(86), WeatherCondition::Snowy);
        assert_eq!(condition_from_wmo(99), WeatherCondition::Stormy);
        assert_eq!(condition_from_wmo(42), WeatherCondition::Clear);
    }

    #[test]
    fn parses_forecast() {
        let body = r#"{
            "latitude": 40.7,
            "longitude": -74.0,
            "current": {
                "time": "2024-01-01T12:00",
                "temperature_2m": -3.5,
                "relative_humidity_2m": 81,
                "weather_code": 73,
                "wind_speed_10m": 12.4
            }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(body).expect("fixture parses");
        let weather = WeatherData::from(parsed.current);
        assert_eq!(weather.condition, WeatherCondition::Snowy);
        assert_eq!(weather.description, "snowy");
        assert_eq!(weather.temperature_c, -3.5);
    }

    #[test]
    fn strong_wind_under_clear_sky_is_windy() {
        let current = CurrentConditions {
            temperature_2m: 14.0,
            relative_humidity_2m: 40.0,
            weather_code: 1,
            wind_speed_10m: 55.0,
        };
        assert_eq!(WeatherData::from(current).condition, WeatherCondition::Windy);

        let stormy = CurrentConditions {
            temperature_2m: 14.0,
            relative_humidity_2m: 90.0,
            weather_code: 95,
            wind_speed_10m: 80.0,
        };
        assert_eq!(WeatherData::from(stormy).condition, WeatherCondition::Stormy);
    }

    #[test]
    fn empty_geocoding_results() {
        let parsed: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms": 0.5}"#)
            .expect("fixture parses");
        assert!(parsed.results.is_empty());
    }
}
