//! Shared session state.
//!
//! One [`SessionState`] is shared between the control surface, which writes
//! tempo, prompts and stop requests, and the orchestrator, which writes
//! counters, errors and phase. Every logical update happens under one lock
//! or through an atomic, so readers never observe a half-applied change.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Notify, watch};
use tracing::warn;
use wanderwave_domain::{Tempo, WeightedPrompt};

use crate::error::SessionError;

/// Lifecycle of one session attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Connecting,
    Streaming,
    Draining,
    Failed,
    Closed,
}

#[derive(Debug)]
struct Inner {
    tempo: Tempo,
    prompts: Arc<[WeightedPrompt]>,
    last_error: Option<SessionError>,
    last_applied_tempo: Option<Tempo>,
    phase: SessionPhase,
}

/// Point-in-time view for control surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub running: bool,
    pub phase: SessionPhase,
    pub tempo: Tempo,
    pub last_applied_tempo: Option<Tempo>,
    pub prompts: Vec<WeightedPrompt>,
    pub frames_received: u64,
    pub last_error: Option<String>,
}

#[derive(Debug)]
pub struct SessionState {
    inner: Mutex<Inner>,
    frames_received: AtomicU64,
    running: watch::Sender<bool>,
    changed: Notify,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Tempo::default())
    }
}

impl SessionState {
    pub fn new(tempo: Tempo) -> Self {
        let (running, _) = watch::channel(false);
        Self {
            inner: Mutex::new(Inner {
                tempo,
                prompts: Arc::from(Vec::new()),
                last_error: None,
                last_applied_tempo: None,
                phase: SessionPhase::Idle,
            }),
            frames_received: AtomicU64::new(0),
            running,
            changed: Notify::new(),
        }
    }

    /// Mark a new session attempt as started and clear the previous
    /// attempt's diagnostics. Tempo and prompts carry over.
    pub fn begin(&self) {
        {
            let mut inner = self.inner.lock();
            inner.last_error = None;
            inner.last_applied_tempo = None;
            inner.phase = SessionPhase::Idle;
        }
        self.frames_received.store(0, Ordering::Relaxed);
        self.running.send_replace(true);
    }

    pub fn tempo(&self) -> Tempo {
        self.inner.lock().tempo
    }

    pub fn set_tempo(&self, tempo: Tempo) {
        self.inner.lock().tempo = tempo;
        self.changed.notify_one();
    }

    /// Current target prompt set. The returned slice is never mutated;
    /// publishing replaces it wholesale.
    pub fn prompts(&self) -> Arc<[WeightedPrompt]> {
        Arc::clone(&self.inner.lock().prompts)
    }

    /// Publish a new prompt set. Entries without a positive finite weight
    /// are dropped.
    pub fn set_prompts(&self, prompts: impl Into<Arc<[WeightedPrompt]>>) {
        let mut prompts = prompts.into();
        if !prompts.iter().all(WeightedPrompt::has_valid_weight) {
            let valid: Vec<_> = prompts
                .iter()
                .filter(|p| p.has_valid_weight())
                .cloned()
                .collect();
            warn!(
                dropped = prompts.len() - valid.len(),
                "ignoring prompts with invalid weights"
            );
            prompts = valid.into();
        }
        self.inner.lock().prompts = prompts;
        self.changed.notify_one();
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    pub fn subscribe_running(&self) -> watch::Receiver<bool> {
        self.running.subscribe()
    }

    /// Request the session to wind down. Idempotent.
    pub fn stop(&self) {
        self.running.send_replace(false);
        self.changed.notify_one();
    }

    /// Resolves once tempo or prompts were published since the last call.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }

    /// Record a session error. The first one wins; returns whether this one
    /// was stored.
    pub fn record_error(&self, error: SessionError) -> bool {
        let mut inner = self.inner.lock();
        if inner.last_error.is_some() {
            return false;
        }
        inner.last_error = Some(error);
        true
    }

    pub fn last_error(&self) -> Option<SessionError> {
        self.inner.lock().last_error.clone()
    }

    pub fn record_frame(&self) -> u64 {
        self.frames_received.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received.load(Ordering::Relaxed)
    }

    pub fn last_applied_tempo(&self) -> Option<Tempo> {
        self.inner.lock().last_applied_tempo
    }

    pub fn set_last_applied_tempo(&self, tempo: Tempo) {
        self.inner.lock().last_applied_tempo = Some(tempo);
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().phase
    }

    pub fn set_phase(&self, phase: SessionPhase) {
        self.inner.lock().phase = phase;
    }

    /// Record that a stop request was observed. Only a healthy connecting or
    /// streaming session moves to `Draining`; a failed one keeps its phase.
    pub fn mark_draining(&self) {
        let mut inner = self.inner.lock();
        if inner.last_error.is_none()
            && matches!(inner.phase, SessionPhase::Connecting | SessionPhase::Streaming)
        {
            inner.phase = SessionPhase::Draining;
        }
    }

    pub fn status(&self) -> SessionStatus {
        let running = self.is_running();
        let inner = self.inner.lock();
        SessionStatus {
            running,
            phase: inner.phase,
            tempo: inner.tempo,
            last_applied_tempo: inner.last_applied_tempo,
            prompts: inner.prompts.to_vec(),
            frames_received: self.frames_received(),
            last_error: inner.last_error.as_ref().map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wanderwave_domain::TransportError;

    #[test]
    fn starts_idle_and_stopped() {
        let state = SessionState::default();
        assert!(!state.is_running());
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.tempo(), Tempo::default());
        assert!(state.prompts().is_empty());
    }

    #[test]
    fn first_error_wins() {
        let state = SessionState::default();
        assert!(state.record_error(TransportError::Send("first".into()).into()));
        assert!(!state.record_error(TransportError::Receive("second".into()).into()));
        assert_eq!(
            state.last_error(),
            Some(SessionError::Transport(TransportError::Send("first".into())))
        );
    }

    #[test]
    fn begin_resets_diagnostics_but_keeps_targets() {
        let state = SessionState::new(Tempo::new(120).unwrap());
        state.set_prompts(vec![WeightedPrompt::new("dub techno", 1.0)]);
        state.record_frame();
        state.set_last_applied_tempo(Tempo::new(120).unwrap());
        state.record_error(SessionError::MissingCredential);

        state.begin();
        assert!(state.is_running());
        assert_eq!(state.frames_received(), 0);
        assert!(state.last_error().is_none());
        assert!(state.last_applied_tempo().is_none());
        assert_eq!(state.tempo().bpm(), 120);
        assert_eq!(state.prompts().len(), 1);
    }

    #[test]
    fn published_prompts_are_whole_snapshots() {
        let state = SessionState::default();
        state.set_prompts(vec![WeightedPrompt::new("a", 1.0)]);
        let before = state.prompts();
        state.set_prompts(vec![WeightedPrompt::new("b", 1.0), WeightedPrompt::new("c", 1.0)]);
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].text, "a");
        assert_eq!(state.prompts().len(), 2);
    }

    #[test]
    fn invalid_weights_never_reach_the_published_set() {
        let state = SessionState::default();
        state.set_prompts(vec![
            WeightedPrompt {
                text: "silence".into(),
                weight: 0.0,
            },
            WeightedPrompt::new("dub techno", 1.2),
            WeightedPrompt {
                text: "noise".into(),
                weight: f32::NAN,
            },
        ]);
        let prompts = state.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].text, "dub techno");
    }

    #[test]
    fn draining_only_follows_a_healthy_phase() {
        let state = SessionState::default();
        state.mark_draining();
        assert_eq!(state.phase(), SessionPhase::Idle);

        state.set_phase(SessionPhase::Streaming);
        state.mark_draining();
        assert_eq!(state.phase(), SessionPhase::Draining);

        state.set_phase(SessionPhase::Streaming);
        state.record_error(SessionError::MissingCredential);
        state.mark_draining();
        assert_eq!(state.phase(), SessionPhase::Streaming);
    }

    #[test]
    fn status_serializes_for_control_surfaces() {
        let state = SessionState::new(Tempo::new(95).unwrap());
        state.begin();
        state.record_frame();
        state.record_frame();
        let status = serde_json::to_value(state.status()).unwrap();
        assert_eq!(status["running"], true);
        assert_eq!(status["tempo"], 95);
        assert_eq!(status["phase"], "idle");
        assert_eq!(status["frames_received"], 2);
        assert!(status["last_error"].is_null());
    }

    #[tokio::test]
    async fn stop_wakes_running_watchers() {
        let state = Arc::new(SessionState::default());
        state.begin();
        let mut running = state.subscribe_running();
        let waiter = tokio::spawn(async move {
            running.wait_for(|r| !*r).await.map(|_| ()).unwrap();
        });
        state.stop();
        waiter.await.unwrap();
        assert!(!state.is_running());
    }

    #[tokio::test]
    async fn publishing_signals_change() {
        let state = SessionState::default();
        state.set_tempo(Tempo::new(140).unwrap());
        tokio_test::assert_ready!(tokio_test::task::spawn(state.changed()).poll());
    }
}
