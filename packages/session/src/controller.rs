//! Control-surface API over one [`SessionState`].
//!
//! At most one session runs per controller. Validation failures leave the
//! state untouched.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;
use wanderwave_composer::{ComposeInput, compose};
use wanderwave_context::ContextSnapshot;
use wanderwave_domain::{MusicConnector, Tempo, WeightedPrompt};

use crate::error::{ControlError, SessionError};
use crate::orchestrator::OrchestratorConfig;
use crate::playback::DeviceOpener;
use crate::runner::{SessionReport, run};
use crate::state::{SessionState, SessionStatus};

/// Listener preferences that outrank ambient context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub genre: Option<String>,
    pub experience: Option<String>,
}

type SessionTask = JoinHandle<Result<SessionReport, SessionError>>;

pub struct SessionController<C> {
    connector: Arc<C>,
    credential: Option<String>,
    config: OrchestratorConfig,
    open_device: DeviceOpener,
    state: Arc<SessionState>,
    task: Mutex<Option<SessionTask>>,
}

impl<C> SessionController<C>
where
    C: MusicConnector + 'static,
{
    pub fn new(
        connector: C,
        credential: Option<String>,
        config: OrchestratorConfig,
        open_device: DeviceOpener,
        initial_tempo: Tempo,
    ) -> Self {
        Self {
            connector: Arc::new(connector),
            credential,
            config,
            open_device,
            state: Arc::new(SessionState::new(initial_tempo)),
            task: Mutex::new(None),
        }
    }

    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    /// Validate and publish a new tempo. Out-of-range values leave the
    /// current tempo in place.
    pub fn set_tempo(&self, bpm: u32) -> Result<Tempo, ControlError> {
        let tempo = Tempo::new(bpm)?;
        self.state.set_tempo(tempo);
        Ok(tempo)
    }

    pub fn set_prompts(&self, prompts: Vec<WeightedPrompt>) {
        self.state.set_prompts(prompts);
    }

    /// Compose prompts for the current local hour and publish them.
    pub fn apply_context(
        &self,
        snapshot: &ContextSnapshot,
        preferences: &Preferences,
    ) -> Vec<WeightedPrompt> {
        let hour = ComposeInput::at_local_time(self.state.tempo()).hour;
        self.apply_context_at(hour, snapshot, preferences)
    }

    pub fn apply_context_at(
        &self,
        hour: u32,
        snapshot: &ContextSnapshot,
        preferences: &Preferences,
    ) -> Vec<WeightedPrompt> {
        let prompts = compose(&compose_input(
            hour,
            self.state.tempo(),
            snapshot,
            preferences,
        ));
        self.state.set_prompts(prompts.clone());
        prompts
    }

    /// Spawn the session on the current tokio runtime.
    pub fn start(&self) -> Result<(), ControlError> {
        let mut task = self.task.lock();
        if self.state.is_running() || task.as_ref().is_some_and(|t| !t.is_finished()) {
            return Err(ControlError::AlreadyRunning);
        }
        let credential = match self.credential.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(ControlError::MissingCredential),
        };

        self.state.begin();
        let connector = Arc::clone(&self.connector);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let open_device = Arc::clone(&self.open_device);
        *task = Some(tokio::spawn(async move {
            run(
                connector.as_ref(),
                &credential,
                &state,
                move || open_device(),
                &config,
            )
            .await
        }));
        info!("session started");
        Ok(())
    }

    pub fn stop(&self) {
        self.state.stop();
    }

    /// Wait for the running session to end. `Ok(None)` when nothing was
    /// started.
    pub async fn wait(&self) -> Result<Option<SessionReport>, ControlError> {
        let Some(task) = self.task.lock().take() else {
            return Ok(None);
        };
        let report = task
            .await
            .map_err(|e| ControlError::Join(e.to_string()))??;
        Ok(Some(report))
    }
}

/// Map a context snapshot and preferences onto composer input.
pub fn compose_input(
    hour: u32,
    tempo: Tempo,
    snapshot: &ContextSnapshot,
    preferences: &Preferences,
) -> ComposeInput {
    ComposeInput {
        hour,
        tempo,
        weather: snapshot.weather.clone(),
        geocoded: snapshot.geocoded.clone(),
        nearby: snapshot.nearby.clone(),
        genre: preferences.genre.clone(),
        experience: preferences.experience.clone(),
        history_styles: snapshot.history_styles.clone(),
    }
}
