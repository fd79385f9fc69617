//! Runtime configuration.
//!
//! Loaded from an optional TOML file, then overridden from the environment,
//! then validated. API keys only ever come from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use wanderwave_domain::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE, Tempo};

use crate::error::ConfigError;
use crate::orchestrator::OrchestratorConfig;

pub const GENERATION_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];
pub const PLACES_KEY_VAR: &str = "GOOGLE_PLACES_API_KEY";
/// User access token for listening history lookups.
pub const SPOTIFY_TOKEN_VAR: &str = "SPOTIFY_ACCESS_TOKEN";
pub const MODEL_VAR: &str = "WANDERWAVE_MODEL";
pub const OUTPUT_DEVICE_VAR: &str = "WANDERWAVE_OUTPUT_DEVICE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub initial_tempo: u32,
    pub poll_interval_ms: u64,
    pub shutdown_grace_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            initial_tempo: Tempo::default().bpm(),
            poll_interval_ms: 500,
            shutdown_grace_secs: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// `None` selects the host default.
    pub output_device: Option<String>,
    pub ring_buffer_ms: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            output_device: None,
            ring_buffer_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    pub nearby_radius_m: u32,
    pub nearby_max_results: u32,
    pub http_timeout_secs: u64,
    /// Tracks requested from each listening-history endpoint.
    pub history_limit: usize,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            nearby_radius_m: 100,
            nearby_max_results: 3,
            http_timeout_secs: 5,
            history_limit: 20,
        }
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    pub generation_key: Option<String>,
    pub places_key: Option<String>,
    pub spotify_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("generation_key", &self.generation_key.as_ref().map(|_| "<redacted>"))
            .field("places_key", &self.places_key.as_ref().map(|_| "<redacted>"))
            .field("spotify_token", &self.spotify_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    pub session: SessionSettings,
    pub audio: AudioSettings,
    pub context: ContextSettings,
    #[serde(skip)]
    pub credentials: Credentials,
}

impl WanderConfig {
    /// File (when given), then process environment, then validation.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    tokio::fs::read_to_string(path)
                        .await
                        .map_err(|source| ConfigError::Read {
                            path: path.to_path_buf(),
                            source,
                        })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from `lookup`. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = GENERATION_KEY_VARS.iter().find_map(|&var| get(var)) {
            self.credentials.generation_key = Some(key);
        }
        if let Some(key) = get(PLACES_KEY_VAR).or_else(|| get(GENERATION_KEY_VARS[0])) {
            self.credentials.places_key = Some(key);
        }
        if let Some(token) = get(SPOTIFY_TOKEN_VAR) {
            self.credentials.spotify_token = Some(token);
        }
        if let Some(model) = get(MODEL_VAR) {
            self.session.model = model;
        }
        if let Some(device) = get(OUTPUT_DEVICE_VAR) {
            self.audio.output_device = Some(device);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Tempo::new(self.session.initial_tempo).map_err(|e| ConfigError::Invalid {
            field: "session.initial_tempo",
            reason: e.to_string(),
        })?;
        if self.session.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "session.poll_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.session.temperature <= 0.0 || self.session.temperature.is_nan() {
            return Err(ConfigError::Invalid {
                field: "session.temperature",
                reason: format!("must be positive, got {}", self.session.temperature),
            });
        }
        if self.session.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "session.model",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn initial_tempo(&self) -> Tempo {
        Tempo::new(self.session.initial_tempo).unwrap_or_default()
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            model: self.session.model.clone(),
            temperature: self.session.temperature,
            poll_interval: Duration::from_millis(self.session.poll_interval_ms),
            shutdown_grace: Duration::from_secs(self.session.shutdown_grace_secs),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.context.http_timeout_secs)
    }
}
