//! # Wanderwave Session
//!
//! The session core: shared state, the playback sink adapter, the
//! two-loop orchestrator, the runner that ties them together, and the
//! control-surface API on top.
//!
//! ```text
//! control surface ──► SessionState ──► orchestrator ──► generator
//!                                          │
//!                         playback sink ◄──┘ frames
//!                              │
//!                        playback thread ──► audio device
//! ```

pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod playback;
pub mod runner;
pub mod state;

pub use config::{AudioSettings, ContextSettings, Credentials, SessionSettings, WanderConfig};
pub use controller::{Preferences, SessionController, compose_input};
pub use device::{CpalDevice, default_output_device_name, list_output_devices};
pub use error::{ConfigError, ControlError, SessionError};
pub use orchestrator::{
    DEFAULT_POLL_INTERVAL, DEFAULT_SHUTDOWN_GRACE, OrchestratorConfig, orchestrate,
};
pub use playback::{
    DeviceOpener, PlaybackConsumer, PlaybackItem, PlaybackReport, PlaybackSink, spawn_playback,
};
pub use runner::{SessionReport, run};
pub use state::{SessionPhase, SessionState, SessionStatus};
