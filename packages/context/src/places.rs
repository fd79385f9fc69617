//! Google Geocoding and Places (New) nearby search.

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use wanderwave_domain::{GeocodedPlace, NearbyPlace};

use crate::error::ProviderError;
use crate::provider::PlacesProvider;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const NEARBY_URL: &str = "https://places.googleapis.com/v1/places:searchNearby";
const NEARBY_FIELD_MASK: &str = "places.displayName,places.types,places.primaryType,\
places.location,places.id,places.editorialSummary,places.neighborhoodSummary,\
places.liveMusic,places.goodForWatchingSports,places.currentOpeningHours,places.priceLevel";

pub const DEFAULT_RADIUS_M: u32 = 100;
pub const DEFAULT_MAX_RESULTS: u32 = 3;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

impl GeocodeResult {
    fn component(&self, kind: &str, short: bool) -> Option<String> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
            .map(|c| {
                if short {
                    c.short_name.clone()
                } else {
                    c.long_name.clone()
                }
            })
    }

    fn into_place(self) -> GeocodedPlace {
        GeocodedPlace {
            neighborhood: self.component("neighborhood", false),
            city: self
                .component("locality", false)
                .or_else(|| self.component("administrative_area_level_1", false)),
            country: self.component("country", false),
            country_code: self.component("country", true),
            formatted_address: self.formatted_address,
            place_types: self.types,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LocalizedText {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct LatLng {
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OpeningHours {
    #[serde(rename = "openNow")]
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlace {
    #[serde(default)]
    id: String,
    display_name: Option<LocalizedText>,
    primary_type: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    location: Option<LatLng>,
    editorial_summary: Option<LocalizedText>,
    neighborhood_summary: Option<LocalizedText>,
    live_music: Option<bool>,
    good_for_watching_sports: Option<bool>,
    current_opening_hours: Option<OpeningHours>,
    price_level: Option<String>,
}

impl From<RawPlace> for NearbyPlace {
    fn from(raw: RawPlace) -> Self {
        let location = raw.location.unwrap_or_default();
        NearbyPlace {
            name: raw.display_name.unwrap_or_default().text,
            place_id: raw.id,
            primary_type: raw.primary_type,
            types: raw.types,
            location: (location.latitude, location.longitude),
            editorial_summary: raw.editorial_summary.map(|t| t.text),
            neighborhood_summary: raw.neighborhood_summary.map(|t| t.text),
            live_music: raw.live_music,
            good_for_watching_sports: raw.good_for_watching_sports,
            currently_open: raw.current_opening_hours.and_then(|h| h.open_now),
            price_level: raw.price_level,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    places: Vec<RawPlace>,
}

fn parse_geocode(response: GeocodeResponse) -> Result<Option<GeocodedPlace>, ProviderError> {
    match response.status.as_str() {
        "OK" => Ok(response.results.into_iter().next().map(GeocodeResult::into_place)),
        "ZERO_RESULTS" => Ok(None),
        other => Err(ProviderError::Status {
            service: "geocoding",
            status: other.to_string(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct GooglePlaces {
    http: reqwest::Client,
    api_key: String,
    radius_m: u32,
    max_results: u32,
}

impl GooglePlaces {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey("google places"));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            radius_m: DEFAULT_RADIUS_M,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub async fn geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Option<GeocodedPlace>, ProviderError> {
        let response: GeocodeResponse = self
            .http
            .get(GEOCODE_URL)
            .query(&[("latlng", format!("{lat},{lon}")), ("key", self.api_key.clone())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_geocode(response)
    }

    pub async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<NearbyPlace>, ProviderError> {
        let body = json!({
            "maxResultCount": self.max_results,
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": lat, "longitude": lon },
                    "radius": self.radius_m,
                }
            }
        });
        let response: NearbyResponse = self
            .http
            .post(NEARBY_URL)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", NEARBY_FIELD_MASK)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.places.into_iter().map(NearbyPlace::from).collect())
    }
}

impl PlacesProvider for GooglePlaces {
    fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> BoxFuture<'_, Result<Option<GeocodedPlace>, ProviderError>> {
        Box::pin(self.geocode(lat, lon))
    }

    fn search_nearby(
        &self,
        lat: f64,
        lon: f64,
    ) -> BoxFuture<'_, Result<Vec<NearbyPlace>, ProviderError>> {
        Box::pin(self.nearby(lat, lon))
    }
}
