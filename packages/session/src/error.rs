//! Error types for session orchestration, control and configuration.

use std::path::PathBuf;

use thiserror::Error;
use wanderwave_domain::{TempoError, TransportError};

/// Why a session ended abnormally. Stored on the session state, so it is
/// `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("no generation API key configured")]
    MissingCredential,

    #[error("playback error: {0}")]
    Playback(String),
}

/// Rejected control-surface requests. State is never modified when one of
/// these is returned.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("invalid tempo: {0}")]
    InvalidTempo(#[from] TempoError),

    #[error("a session is already running")]
    AlreadyRunning,

    #[error("no generation API key configured")]
    MissingCredential,

    #[error("session task failed: {0}")]
    Join(String),

    #[error("session failed: {0}")]
    Session(#[from] SessionError),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
