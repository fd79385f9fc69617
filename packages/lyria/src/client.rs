use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info};
use wanderwave_domain::{
    DEFAULT_ENDPOINT, GenerationConfig, MusicConnector, MusicControl, MusicReceiver,
    ServerMessage, TransportError, WeightedPrompt,
};

use crate::protocol::{ClientMessage, Inbound, PlaybackControl, decode};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound for dialing plus the `setup` / `setupComplete` exchange.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);

/// Opens Lyria RealTime sessions over a WebSocket.
#[derive(Debug, Clone)]
pub struct LyriaConnector {
    endpoint: String,
    handshake_timeout: Duration,
}

impl Default for LyriaConnector {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl LyriaConnector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn qualified_model(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

/// Wait for `setupComplete`, ignoring anything else the server sends first.
async fn await_setup(socket: &mut Socket) -> Result<(), TransportError> {
    while let Some(next) = socket.next().await {
        let message = next.map_err(|e| TransportError::Connect(e.to_string()))?;
        let inbound = match message {
            Message::Text(text) => decode(text.as_bytes())?,
            Message::Binary(data) => decode(&data)?,
            Message::Close(frame) => {
                let reason = frame.map(|f| f.reason.to_string()).unwrap_or_default();
                return Err(TransportError::Closed(reason));
            }
            _ => continue,
        };
        if inbound == Inbound::SetupComplete {
            return Ok(());
        }
    }
    Err(TransportError::Closed("stream ended during setup".to_string()))
}

/// Dial, send `setup` and wait for the server to accept it.
async fn handshake(url: &str, model: &str) -> Result<Socket, TransportError> {
    let (mut socket, _) = connect_async(url)
        .await
        .map_err(|e| TransportError::Connect(e.to_string()))?;

    let setup = ClientMessage::Setup { model }.to_json()?;
    socket
        .send(Message::text(setup))
        .await
        .map_err(|e| TransportError::Connect(e.to_string()))?;
    await_setup(&mut socket).await?;
    Ok(socket)
}

impl MusicConnector for LyriaConnector {
    type Control = LyriaControl;
    type Receiver = LyriaReceiver;

    async fn connect(
        &self,
        model: &str,
        credential: &str,
    ) -> Result<(LyriaControl, LyriaReceiver), TransportError> {
        if credential.trim().is_empty() {
            return Err(TransportError::Connect("missing API key".to_string()));
        }

        let url = format!("{}?key={}", self.endpoint, credential);
        let model = qualified_model(model);
        let socket = tokio::time::timeout(self.handshake_timeout, handshake(&url, &model))
            .await
            .map_err(|_| {
                TransportError::Connect(format!(
                    "handshake timed out after {:?}",
                    self.handshake_timeout
                ))
            })??;
        info!(%model, "generation session established");

        let (sink, stream) = socket.split();
        Ok((LyriaControl { sink }, LyriaReceiver { stream }))
    }
}

/// Outbound half of a Lyria session.
pub struct LyriaControl {
    sink: SplitSink<Socket, Message>,
}

impl LyriaControl {
    async fn send(&mut self, message: ClientMessage<'_>) -> Result<(), TransportError> {
        let json = message.to_json()?;
        self.sink
            .send(Message::text(json))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}

impl MusicControl for LyriaControl {
    async fn set_config(&mut self, config: &GenerationConfig) -> Result<(), TransportError> {
        debug!(bpm = config.tempo.bpm(), temperature = config.temperature, "push config");
        self.send(ClientMessage::config(config)).await
    }

    async fn reset_context(&mut self) -> Result<(), TransportError> {
        self.send(ClientMessage::PlaybackControl(PlaybackControl::ResetContext))
            .await
    }

    async fn set_prompts(&mut self, prompts: &[WeightedPrompt]) -> Result<(), TransportError> {
        debug!(count = prompts.len(), "push prompts");
        self.send(ClientMessage::ClientContent {
            weighted_prompts: prompts,
        })
        .await
    }

    async fn play(&mut self) -> Result<(), TransportError> {
        self.send(ClientMessage::PlaybackControl(PlaybackControl::Play))
            .await
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.send(ClientMessage::PlaybackControl(PlaybackControl::Stop))
            .await?;
        self.sink
            .close()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}

/// Inbound half of a Lyria session.
pub struct LyriaReceiver {
    stream: SplitStream<Socket>,
}

impl MusicReceiver for LyriaReceiver {
    async fn receive(&mut self) -> Result<Option<ServerMessage>, TransportError> {
        loop {
            let Some(next) = self.stream.next().await else {
                return Ok(None);
            };
            let message = next.map_err(|e| TransportError::Receive(e.to_string()))?;
            let inbound = match message {
                Message::Text(text) => decode(text.as_bytes())?,
                Message::Binary(data) => decode(&data)?,
                Message::Close(Some(frame)) if frame.code != CloseCode::Normal => {
                    return Err(TransportError::Closed(format!(
                        "{}: {}",
                        u16::from(frame.code),
                        frame.reason
                    )));
                }
                Message::Close(_) => return Ok(None),
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            };
            return Ok(Some(match inbound {
                Inbound::Content(message) => message,
                Inbound::SetupComplete => ServerMessage::empty(),
            }));
        }
    }
}
