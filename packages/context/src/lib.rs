//! # Wanderwave Context
//!
//! Providers for the signals that feed prompt composition: current weather,
//! reverse-geocoded place context, nearby places and listening history
//! (Spotify recently played and saved tracks).
//!
//! Every provider may fail. [`ContextResolver`] runs them concurrently and
//! turns each failure into an empty contribution, so a flaky lookup never
//! blocks a session from starting.

mod error;
mod history;
mod open_meteo;
mod places;
mod provider;
mod resolver;
mod spotify;

pub use error::ProviderError;
pub use history::{MAX_HISTORY_STYLES, history_style_prompts};
pub use open_meteo::{OpenMeteo, WINDY_THRESHOLD_KMH, condition_from_wmo};
pub use places::GooglePlaces;
pub use provider::{ListeningHistory, PlacesProvider, WeatherProvider};
pub use resolver::{ContextResolver, ContextSnapshot};
pub use spotify::SpotifyHistory;
