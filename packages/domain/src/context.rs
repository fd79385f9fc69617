//! Context signals resolved by external providers.
//!
//! Each provider either returns one of these plain structs or fails; the
//! composer treats a missing value as an empty contribution.

use serde::{Deserialize, Serialize};

/// Coarse weather classification used for descriptor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Clear,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Foggy,
    Windy,
    Other,
}

impl WeatherCondition {
    /// Human readable summary shown by control surfaces.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Sunny | Self::Clear => "sunny and clear",
            Self::Cloudy => "cloudy and overcast",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Stormy => "stormy with thunder",
            Self::Foggy => "foggy and misty",
            Self::Windy => "windy",
            Self::Other => "clear",
        }
    }
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f32,
    pub condition: WeatherCondition,
    pub description: String,
    /// Relative humidity in percent.
    pub humidity: f32,
    pub wind_speed_kmh: f32,
}

impl WeatherData {
    pub fn new(condition: WeatherCondition, temperature_c: f32) -> Self {
        Self {
            temperature_c,
            condition,
            description: condition.describe().to_string(),
            humidity: 0.0,
            wind_speed_kmh: 0.0,
        }
    }
}

/// High-level geographic context resolved from coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub formatted_address: String,
    pub place_types: Vec<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2.
    pub country_code: Option<String>,
}

/// A specific place near a set of coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    pub place_id: String,
    pub primary_type: Option<String>,
    pub types: Vec<String>,
    /// `(latitude, longitude)`
    pub location: (f64, f64),
    pub editorial_summary: Option<String>,
    pub neighborhood_summary: Option<String>,
    pub live_music: Option<bool>,
    pub good_for_watching_sports: Option<bool>,
    pub currently_open: Option<bool>,
    pub price_level: Option<String>,
}

/// Where a listening-history entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSource {
    RecentlyPlayed,
    Liked,
}

/// Minimal view of one track from the listener's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub name: String,
    pub artist: String,
    pub source: TrackSource,
}
