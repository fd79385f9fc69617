//! # Wanderwave Domain
//!
//! Shared domain objects and collaborator traits for the wanderwave session
//! engine.
//!
//! This crate holds the value types that flow between the prompt composer,
//! the context providers, the remote stream adapter and the session core,
//! so none of those crates has to depend on another just to share a type.

pub mod audio_frame;
pub mod context;
pub mod device;
pub mod generation_config;
pub mod stream;
pub mod tempo;
pub mod weighted_prompt;

// Re-export core types
pub use audio_frame::{AudioFrame, BYTES_PER_SAMPLE, CHANNELS, SAMPLE_RATE};
pub use context::{
    GeocodedPlace, NearbyPlace, TrackSource, TrackSummary, WeatherCondition, WeatherData,
};
pub use device::{AudioDevice, DeviceError, DeviceSpec};
pub use generation_config::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationConfig};
pub use stream::{MusicConnector, MusicControl, MusicReceiver, ServerMessage, TransportError};
pub use tempo::{Tempo, TempoError};
pub use weighted_prompt::{PromptWeightError, WeightedPrompt};

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        AudioDevice, AudioFrame, DeviceError, GenerationConfig, GeocodedPlace, MusicConnector,
        MusicControl, MusicReceiver, NearbyPlace, ServerMessage, Tempo, TempoError, TrackSummary,
        TransportError, WeatherCondition, WeatherData, WeightedPrompt,
    };
}
