//! Generation parameters pushed to the remote stream.

use crate::tempo::Tempo;
use serde::{Deserialize, Serialize};

/// Sampling temperature used unless configured otherwise.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Generator model requested unless configured otherwise.
pub const DEFAULT_MODEL: &str = "models/lyria-realtime-exp";

/// Bidirectional music generation endpoint. The API key goes in the `key`
/// query parameter.
pub const DEFAULT_ENDPOINT: &str = concat!(
    "wss://generativelanguage.googleapis.com/ws/",
    "google.ai.generativelanguage.v1alpha.GenerativeService.BidiGenerateMusic"
);

/// `(tempo, temperature)` pair. Derived from session state on every detected
/// change, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub tempo: Tempo,
    pub temperature: f32,
}

impl GenerationConfig {
    pub fn new(tempo: Tempo, temperature: f32) -> Self {
        Self { tempo, temperature }
    }
}
