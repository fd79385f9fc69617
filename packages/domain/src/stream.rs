//! Remote generation stream contract.
//!
//! A connection is split into a control half, used by the config loop, and a
//! receive half, used by the audio loop, so both can run concurrently over
//! the same underlying socket.

use crate::audio_frame::AudioFrame;
use crate::generation_config::GenerationConfig;
use crate::weighted_prompt::WeightedPrompt;
use std::future::Future;
use thiserror::Error;

/// Failures of the remote connection. Any of these is fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("send failed: {0}")]
    Send(String),
    #[error("receive failed: {0}")]
    Receive(String),
    #[error("protocol violation: {0}")]
    Protocol(String),
    #[error("connection closed by server: {0}")]
    Closed(String),
}

/// One message from the server. May carry zero, one, or a batch of frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerMessage {
    pub frames: Vec<AudioFrame>,
}

impl ServerMessage {
    pub fn new(frames: Vec<AudioFrame>) -> Self {
        Self { frames }
    }

    /// Message without audio (warnings, filtered prompts, keepalives).
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Opens sessions against the remote generator.
pub trait MusicConnector: Send + Sync {
    type Control: MusicControl + 'static;
    type Receiver: MusicReceiver + 'static;

    fn connect(
        &self,
        model: &str,
        credential: &str,
    ) -> impl Future<Output = Result<(Self::Control, Self::Receiver), TransportError>> + Send;
}

/// Outbound half of a session.
pub trait MusicControl: Send {
    fn set_config(
        &mut self,
        config: &GenerationConfig,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Drop the generator's accumulated context so new settings apply
    /// immediately instead of drifting in.
    fn reset_context(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;

    fn set_prompts(
        &mut self,
        prompts: &[WeightedPrompt],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    fn play(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;

    fn close(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Inbound half of a session.
pub trait MusicReceiver: Send {
    /// Next server message, or `None` once the server ended the stream.
    fn receive(&mut self)
    -> impl Future<Output = Result<Option<ServerMessage>, TransportError>> + Send;
}
