//! Session runner: playback consumer plus orchestrator, joined together.

use scopeguard::defer;
use tracing::{info, warn};
use wanderwave_domain::{AudioDevice, DeviceError, MusicConnector};

use crate::error::SessionError;
use crate::orchestrator::{OrchestratorConfig, orchestrate};
use crate::playback::{PlaybackReport, spawn_playback};
use crate::state::{SessionPhase, SessionState};

/// Outcome of a session that ended without a transport failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub frames_received: u64,
    pub playback: PlaybackReport,
}

/// Run one session to completion.
///
/// The caller starts the attempt with [`SessionState::begin`]; a state that
/// was stopped before this runs ends immediately. `running` is false again
/// on every exit path, including this future being dropped.
pub async fn run<C, F, D>(
    connector: &C,
    credential: &str,
    state: &SessionState,
    open_device: F,
    config: &OrchestratorConfig,
) -> Result<SessionReport, SessionError>
where
    C: MusicConnector,
    F: FnOnce() -> Result<D, DeviceError> + Send + 'static,
    D: AudioDevice,
{
    defer! {
        state.stop();
    }

    if !state.is_running() {
        info!("session stopped before it started");
        state.set_phase(SessionPhase::Closed);
        return Ok(SessionReport::default());
    }
    if credential.trim().is_empty() {
        state.record_error(SessionError::MissingCredential);
        state.set_phase(SessionPhase::Closed);
        return Err(SessionError::MissingCredential);
    }

    let (sink, consumer) = spawn_playback(open_device)?;
    let outcome = orchestrate(connector, credential, state, sink, config).await;

    let playback = match tokio::task::spawn_blocking(move || consumer.join()).await {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            warn!("{e}");
            PlaybackReport::default()
        }
        Err(e) => {
            warn!("failed to join playback thread: {e}");
            PlaybackReport::default()
        }
    };

    outcome.map(|()| SessionReport {
        frames_received: state.frames_received(),
        playback,
    })
}
