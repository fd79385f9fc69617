#![allow(dead_code)]

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use wanderwave_domain::{
    AudioDevice, AudioFrame, DeviceError, GenerationConfig, MusicConnector, MusicControl,
    MusicReceiver, ServerMessage, TransportError, WeightedPrompt,
};
use wanderwave_session::{DeviceOpener, OrchestratorConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum ControlCall {
    Config(u32),
    Reset,
    Prompts(Vec<String>),
    Play,
    Close,
}

pub type CallLog = Arc<Mutex<Vec<ControlCall>>>;
pub type ServerFeed = mpsc::UnboundedSender<Result<Option<ServerMessage>, TransportError>>;

pub struct FakeControl {
    calls: CallLog,
    config_calls: usize,
    fail_config_on_call: Option<usize>,
}

impl MusicControl for FakeControl {
    async fn set_config(&mut self, config: &GenerationConfig) -> Result<(), TransportError> {
        self.config_calls += 1;
        if self.fail_config_on_call == Some(self.config_calls) {
            return Err(TransportError::Send("socket reset".to_string()));
        }
        self.calls.lock().push(ControlCall::Config(config.tempo.bpm()));
        Ok(())
    }

    async fn reset_context(&mut self) -> Result<(), TransportError> {
        self.calls.lock().push(ControlCall::Reset);
        Ok(())
    }

    async fn set_prompts(&mut self, prompts: &[WeightedPrompt]) -> Result<(), TransportError> {
        let texts = prompts.iter().map(|p| p.text.clone()).collect();
        self.calls.lock().push(ControlCall::Prompts(texts));
        Ok(())
    }

    async fn play(&mut self) -> Result<(), TransportError> {
        self.calls.lock().push(ControlCall::Play);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.calls.lock().push(ControlCall::Close);
        Ok(())
    }
}

/// Yields whatever the test feeds it; pending while the feed is empty.
pub struct FakeReceiver {
    feed: mpsc::UnboundedReceiver<Result<Option<ServerMessage>, TransportError>>,
}

impl MusicReceiver for FakeReceiver {
    async fn receive(&mut self) -> Result<Option<ServerMessage>, TransportError> {
        match self.feed.recv().await {
            Some(item) => item,
            None => Ok(None),
        }
    }
}

/// How long `connect` takes before answering.
#[derive(Debug, Clone, Copy, Default)]
pub enum ConnectLatency {
    #[default]
    Immediate,
    Delayed(Duration),
    Never,
}

pub struct FakeConnector {
    halves: Mutex<Option<(FakeControl, FakeReceiver)>>,
    connect_error: Option<TransportError>,
    latency: ConnectLatency,
    pub connects: Arc<Mutex<usize>>,
}

impl MusicConnector for FakeConnector {
    type Control = FakeControl;
    type Receiver = FakeReceiver;

    async fn connect(
        &self,
        _model: &str,
        _credential: &str,
    ) -> Result<(FakeControl, FakeReceiver), TransportError> {
        *self.connects.lock() += 1;
        match self.latency {
            ConnectLatency::Immediate => {}
            ConnectLatency::Delayed(delay) => tokio::time::sleep(delay).await,
            ConnectLatency::Never => std::future::pending::<()>().await,
        }
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }
        self.halves
            .lock()
            .take()
            .ok_or_else(|| TransportError::Connect("already connected".to_string()))
    }
}

pub struct Harness {
    pub connector: FakeConnector,
    pub calls: CallLog,
    pub feed: ServerFeed,
}

impl Harness {
    pub fn with_latency(mut self, latency: ConnectLatency) -> Self {
        self.connector.latency = latency;
        self
    }
}

pub fn harness() -> Harness {
    harness_with(None, None)
}

pub fn harness_with(
    fail_config_on_call: Option<usize>,
    connect_error: Option<TransportError>,
) -> Harness {
    let calls = CallLog::default();
    let (feed, rx) = mpsc::unbounded_channel();
    let control = FakeControl {
        calls: Arc::clone(&calls),
        config_calls: 0,
        fail_config_on_call,
    };
    let connector = FakeConnector {
        halves: Mutex::new(Some((control, FakeReceiver { feed: rx }))),
        connect_error,
        latency: ConnectLatency::Immediate,
        connects: Arc::default(),
    };
    Harness {
        connector,
        calls,
        feed,
    }
}

pub fn frames(payloads: &[&str]) -> ServerMessage {
    ServerMessage::new(
        payloads
            .iter()
            .map(|p| AudioFrame::from(p.as_bytes().to_vec()))
            .collect(),
    )
}

#[derive(Debug, Default)]
pub struct DeviceLog {
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
    pub closes: usize,
}

pub struct RecordingDevice {
    log: Arc<Mutex<DeviceLog>>,
}

impl AudioDevice for RecordingDevice {
    fn write(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        self.log.lock().writes.push(bytes.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        self.log.lock().flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.log.lock().closes += 1;
        Ok(())
    }
}

pub fn recording_device() -> (
    Arc<Mutex<DeviceLog>>,
    impl FnOnce() -> Result<RecordingDevice, DeviceError> + Send + 'static,
) {
    let log = Arc::new(Mutex::new(DeviceLog::default()));
    let shared = Arc::clone(&log);
    (log, move || Ok(RecordingDevice { log: shared }))
}

/// Shared opener for controller-driven sessions, which may open the
/// device more than once.
pub fn recording_opener() -> (Arc<Mutex<DeviceLog>>, DeviceOpener) {
    let log = Arc::new(Mutex::new(DeviceLog::default()));
    let shared = Arc::clone(&log);
    let opener: DeviceOpener = Arc::new(move || {
        Ok(Box::new(RecordingDevice {
            log: Arc::clone(&shared),
        }) as Box<dyn AudioDevice>)
    });
    (log, opener)
}

pub fn fast_config() -> OrchestratorConfig {
    OrchestratorConfig {
        poll_interval: Duration::from_millis(20),
        shutdown_grace: Duration::from_millis(100),
        ..OrchestratorConfig::default()
    }
}

/// Poll `condition` until it holds, panicking after two seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

pub async fn within<F: Future>(future: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(3), future)
        .await
        .expect("finished in time")
}

pub fn calls_after_play(calls: &CallLog) -> Vec<ControlCall> {
    let calls = calls.lock();
    let start = calls
        .iter()
        .position(|c| *c == ControlCall::Play)
        .map_or(calls.len(), |i| i + 1);
    calls[start..].to_vec()
}
