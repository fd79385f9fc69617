//! JSON wire messages of the BidiGenerateMusic service.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wanderwave_domain::{
    AudioFrame, GenerationConfig, ServerMessage, TransportError, WeightedPrompt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackControl {
    Play,
    Pause,
    Stop,
    ResetContext,
}

/// Client to server messages. Externally tagged, so each serializes as a
/// single-key object such as `{"playbackControl":"PLAY"}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientMessage<'a> {
    Setup {
        model: &'a str,
    },
    ClientContent {
        #[serde(rename = "weightedPrompts")]
        weighted_prompts: &'a [WeightedPrompt],
    },
    MusicGenerationConfig {
        bpm: u32,
        temperature: f32,
    },
    PlaybackControl(PlaybackControl),
}

impl<'a> ClientMessage<'a> {
    pub fn config(config: &GenerationConfig) -> Self {
        Self::MusicGenerationConfig {
            bpm: config.tempo.bpm(),
            temperature: config.temperature,
        }
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::Send(e.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawServerMessage {
    setup_complete: Option<serde_json::Value>,
    server_content: Option<ServerContent>,
    filtered_prompt: Option<serde_json::Value>,
    warning: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerContent {
    #[serde(default)]
    audio_chunks: Vec<AudioChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioChunk {
    #[serde(default)]
    data: String,
    mime_type: Option<String>,
}

/// A decoded server frame.
#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    SetupComplete,
    Content(ServerMessage),
}

pub fn decode(raw: &[u8]) -> Result<Inbound, TransportError> {
    let message: RawServerMessage =
        serde_json::from_slice(raw).map_err(|e| TransportError::Protocol(e.to_string()))?;

    if message.setup_complete.is_some() {
        return Ok(Inbound::SetupComplete);
    }
    if let Some(filtered) = message.filtered_prompt {
        warn!("generator filtered a prompt: {filtered}");
    }
    if let Some(warning) = message.warning {
        warn!("generator warning: {warning}");
    }

    let Some(content) = message.server_content else {
        return Ok(Inbound::Content(ServerMessage::empty()));
    };

    let mut frames = Vec::with_capacity(content.audio_chunks.len());
    for chunk in content.audio_chunks {
        if chunk.data.is_empty() {
            continue;
        }
        let pcm = STANDARD
            .decode(chunk.data.as_bytes())
            .map_err(|e| TransportError::Protocol(format!("bad audio chunk: {e}")))?;
        if let Some(mime) = chunk.mime_type.as_deref() {
            debug!(mime, bytes = pcm.len(), "audio chunk");
        }
        frames.push(AudioFrame::from(pcm));
    }
    Ok(Inbound::Content(ServerMessage::new(frames)))
}
