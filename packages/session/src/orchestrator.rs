//! Session orchestrator.
//!
//! Opens the remote stream and runs two loops over its halves:
//!
//! * receive-and-enqueue: pulls server messages and hands every frame to
//!   the playback sink in arrival order;
//! * observe-and-push: watches tempo and prompts on [`SessionState`] and
//!   pushes only what changed, tempo always before prompts.
//!
//! A transport failure in either loop is recorded once and flips `running`
//! off, which ends the other loop cooperatively. A stop request is honored
//! in every phase, including while the connection is still being opened.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use wanderwave_composer::session_prompts;
use wanderwave_domain::{
    DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationConfig, MusicConnector, MusicControl,
    MusicReceiver, Tempo, TransportError, WeightedPrompt,
};

use crate::error::SessionError;
use crate::playback::PlaybackSink;
use crate::state::{SessionPhase, SessionState};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    pub model: String,
    pub temperature: f32,
    /// Upper bound between two checks for tempo or prompt changes.
    pub poll_interval: Duration,
    /// How long an in-flight connect or receive may run on after a stop
    /// request.
    pub shutdown_grace: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

/// Values last sent upstream.
struct Pushed {
    tempo: Tempo,
    prompts: Arc<[WeightedPrompt]>,
}

/// Record a transport failure and stop the session.
fn fail(state: &SessionState, err: TransportError) -> SessionError {
    error!("session transport failure: {err}");
    let err = SessionError::Transport(err);
    state.record_error(err.clone());
    state.stop();
    err
}

/// Terminal bookkeeping for a session that never reached `Streaming`.
fn abort_startup(state: &SessionState, sink: PlaybackSink, err: TransportError) -> SessionError {
    let err = fail(state, err);
    state.set_phase(SessionPhase::Failed);
    sink.finish();
    state.set_phase(SessionPhase::Closed);
    err
}

async fn stopped(running: &mut watch::Receiver<bool>) {
    // The sender lives as long as the state, so an error here cannot happen
    // while anyone is still waiting.
    let _ = running.wait_for(|running| !*running).await;
}

/// Run one session to completion. Consumes the sink so the end-of-stream
/// sentinel goes out on every path.
pub async fn orchestrate<C: MusicConnector>(
    connector: &C,
    credential: &str,
    state: &SessionState,
    sink: PlaybackSink,
    config: &OrchestratorConfig,
) -> Result<(), SessionError> {
    state.set_phase(SessionPhase::Connecting);
    info!(model = %config.model, "connecting to generator");

    let mut running = state.subscribe_running();
    let connect = connector.connect(&config.model, credential);
    tokio::pin!(connect);

    let connected = tokio::select! {
        result = &mut connect => Some(result),
        () = stopped(&mut running) => {
            state.mark_draining();
            let grace = config.shutdown_grace;
            match tokio::time::timeout(grace, &mut connect).await {
                Ok(result) => Some(result),
                Err(_) => {
                    warn!(?grace, "abandoning connect after stop");
                    None
                }
            }
        }
    };

    let (mut control, mut receiver) = match connected {
        Some(Ok(halves)) => halves,
        Some(Err(e)) => return Err(abort_startup(state, sink, e)),
        None => {
            sink.finish();
            state.set_phase(SessionPhase::Closed);
            info!("session stopped before the stream opened");
            return Ok(());
        }
    };

    if !state.is_running() {
        state.mark_draining();
        sink.finish();
        close_quietly(&mut control).await;
        state.set_phase(SessionPhase::Closed);
        info!("session stopped before the stream opened");
        return Ok(());
    }

    let seed = match start_stream(&mut control, state, config).await {
        Ok(seed) => seed,
        Err(e) => {
            close_quietly(&mut control).await;
            return Err(abort_startup(state, sink, e));
        }
    };
    state.set_phase(SessionPhase::Streaming);
    info!(bpm = seed.tempo.bpm(), "streaming");

    let receive = async {
        if let Err(e) = receive_loop(&mut receiver, state, &sink, config.shutdown_grace).await {
            fail(state, e);
        }
        debug!("receive loop exited");
    };
    let push = async {
        if let Err(e) = config_loop(&mut control, state, config, seed).await {
            fail(state, e);
        }
        debug!("config loop exited");
    };
    tokio::join!(receive, push);

    let outcome = state.last_error();
    state.set_phase(if outcome.is_some() {
        SessionPhase::Failed
    } else {
        SessionPhase::Draining
    });

    sink.finish();
    close_quietly(&mut control).await;
    state.set_phase(SessionPhase::Closed);
    info!(frames = state.frames_received(), "session closed");

    match outcome {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Initial config, then prompts, then play.
async fn start_stream<C: MusicControl>(
    control: &mut C,
    state: &SessionState,
    config: &OrchestratorConfig,
) -> Result<Pushed, TransportError> {
    let tempo = state.tempo();
    let prompts = state.prompts();

    control
        .set_config(&GenerationConfig::new(tempo, config.temperature))
        .await?;
    state.set_last_applied_tempo(tempo);
    control.set_prompts(&session_prompts(&prompts, tempo)).await?;
    control.play().await?;

    Ok(Pushed { tempo, prompts })
}

async fn close_quietly<C: MusicControl>(control: &mut C) {
    if let Err(e) = control.close().await {
        debug!("closing generator stream: {e}");
    }
}

async fn receive_loop<R: MusicReceiver>(
    receiver: &mut R,
    state: &SessionState,
    sink: &PlaybackSink,
    grace: Duration,
) -> Result<(), TransportError> {
    let mut running = state.subscribe_running();
    while state.is_running() {
        let receive = receiver.receive();
        tokio::pin!(receive);

        let next = tokio::select! {
            result = &mut receive => result,
            () = stopped(&mut running) => {
                state.mark_draining();
                match tokio::time::timeout(grace, &mut receive).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(?grace, "abandoning in-flight receive after stop");
                        return Ok(());
                    }
                }
            }
        };

        match next? {
            Some(message) => {
                for frame in message.frames {
                    state.record_frame();
                    sink.enqueue(frame);
                }
            }
            None => {
                info!("generator ended the stream");
                state.stop();
            }
        }
    }
    Ok(())
}

async fn config_loop<C: MusicControl>(
    control: &mut C,
    state: &SessionState,
    config: &OrchestratorConfig,
    mut pushed: Pushed,
) -> Result<(), TransportError> {
    let mut running = state.subscribe_running();
    loop {
        tokio::select! {
            () = tokio::time::sleep(config.poll_interval) => {}
            () = state.changed() => {}
            () = stopped(&mut running) => {
                state.mark_draining();
                return Ok(());
            }
        }
        if !state.is_running() {
            return Ok(());
        }

        let tempo = state.tempo();
        let prompts = state.prompts();
        let mut push_prompts =
            !Arc::ptr_eq(&prompts, &pushed.prompts) && *prompts != *pushed.prompts;

        if tempo != pushed.tempo {
            control
                .set_config(&GenerationConfig::new(tempo, config.temperature))
                .await?;
            control.reset_context().await?;
            state.set_last_applied_tempo(tempo);
            info!(from = pushed.tempo.bpm(), to = tempo.bpm(), "tempo applied");
            pushed.tempo = tempo;
            push_prompts = true;
        }

        if push_prompts {
            let upstream = session_prompts(&prompts, tempo);
            control.set_prompts(&upstream).await?;
            debug!(count = upstream.len(), "prompts applied");
        }
        pushed.prompts = prompts;
    }
}
