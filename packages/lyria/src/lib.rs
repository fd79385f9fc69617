//! # Wanderwave Lyria
//!
//! WebSocket adapter for the Lyria RealTime music generation service.
//!
//! [`LyriaConnector`] performs the setup handshake and splits the socket
//! into a [`LyriaControl`] half for configuration pushes and a
//! [`LyriaReceiver`] half that yields decoded PCM frames.

mod client;
mod protocol;

pub use client::{DEFAULT_HANDSHAKE_TIMEOUT, LyriaConnector, LyriaControl, LyriaReceiver};
pub use wanderwave_domain::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use protocol::{ClientMessage, Inbound, PlaybackControl, decode};
