//! The Wizard
//!
//! Headless state machine driving one script-to-video run:
//!
//! ```text
//! Script --submit--> Settings --generate--> Generating --completed--> Result
//!    ^                  |                                               |
//!    +------back--------+                                               |
//!    +---------------------------start over-----------------------------+
//! ```
//!
//! # Design Philosophy
//!
//! The Wizard owns all state. Surfaces send [`WizardEvent`]s and read
//! [`Wizard::state`]; they never mutate anything themselves.
//!
//! Network calls never run on the caller's task. `handle_event` spawns them
//! and returns immediately; their results come back as completions that
//! [`Wizard::poll`] (once per frame) or [`Wizard::settle`] (headless/tests)
//! folds into the state.
//!
//! # Stale results
//!
//! Each submission is tagged with the current epoch. `StartOver` bumps the
//! epoch, so a response that lands after a reset is dropped instead of
//! resurrecting the old run.

mod error;
mod state;

pub use error::WizardError;
pub use state::{
    WizardStage, WizardState, MSG_CREATE_FAILED, MSG_EMPTY_SCRIPT, MSG_GENERATION_FAILED,
    MSG_NO_PROJECT, MSG_START_FAILED, MSG_STARTING,
};

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::api::{
    CreateProjectRequest, GenerationStarted, ProjectCreated, StartGenerationRequest, StudioApi,
    SubmissionError,
};
use crate::channel::{ChannelConnector, ProgressEvent};
use crate::events::WizardEvent;
use crate::job::JobStatus;
use crate::subscriber::{ProgressSubscriber, ReconnectPolicy};
use crate::voice::{Voice, VoiceCatalog, VoiceId, FALLBACK_VOICE_ID};

/// Result of a spawned network call
enum Completion {
    Voices(Result<Vec<Voice>, SubmissionError>),
    ProjectCreated {
        epoch: u64,
        result: Result<ProjectCreated, SubmissionError>,
    },
    GenerationStarted {
        epoch: u64,
        result: Result<GenerationStarted, SubmissionError>,
    },
}

/// Script-to-video wizard
pub struct Wizard<A: StudioApi + 'static, C: ChannelConnector> {
    /// Studio backend
    api: Arc<A>,
    /// Push subscription for the running generation
    subscriber: ProgressSubscriber<C>,
    /// Everything the surface renders
    state: WizardState,
    /// Bumped by `StartOver`
    epoch: u64,
    /// Whether the voice catalog request has been issued
    voices_requested: bool,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    /// Spawned calls whose completion has not been received yet
    pending: usize,
}

impl<A: StudioApi + 'static, C: ChannelConnector> Wizard<A, C> {
    /// Create a wizard on the Script stage
    pub fn new(api: A, connector: C, reconnect: ReconnectPolicy) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            api: Arc::new(api),
            subscriber: ProgressSubscriber::new(connector, reconnect),
            state: WizardState::default(),
            epoch: 0,
            voices_requested: false,
            completion_tx,
            completion_rx,
            pending: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Push subscriber (read-only)
    pub fn subscriber(&self) -> &ProgressSubscriber<C> {
        &self.subscriber
    }

    /// Current epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether spawned calls are still outstanding
    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    /// Kick off startup work: a health check (logged only) and the voice catalog
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            if api.health_check().await {
                tracing::debug!(backend = %api.name(), "Backend reachable");
            } else {
                tracing::warn!(backend = %api.name(), "Backend not reachable, submissions will fail until it is");
            }
        });

        self.load_voices();
    }

    /// Request the voice catalog (once per wizard)
    pub fn load_voices(&mut self) {
        if self.voices_requested {
            return;
        }
        self.voices_requested = true;

        let api = Arc::clone(&self.api);
        self.spawn(async move { Completion::Voices(api.list_voices().await) });
    }

    /// Apply a user event
    ///
    /// Validation failures set the error banner as well as returning `Err`.
    pub fn handle_event(&mut self, event: WizardEvent) -> Result<(), WizardError> {
        let action = event.action();

        if event.edits_draft() && !self.state.draft_editable() {
            return Err(WizardError::DraftFrozen(self.state.stage));
        }

        let result = match event {
            WizardEvent::EditScript { script } => {
                self.state.draft.script = script;
                Ok(())
            }

            WizardEvent::SelectAspectRatio { aspect_ratio } => {
                self.state.draft.aspect_ratio = aspect_ratio;
                Ok(())
            }

            WizardEvent::SelectVoice { voice_id } => {
                if self.state.voices_loaded && !self.state.voices.contains(&voice_id) {
                    Err(WizardError::UnknownVoice(voice_id))
                } else {
                    self.state.draft.voice_id = voice_id;
                    Ok(())
                }
            }

            WizardEvent::SubmitScript => self.submit_script(action),

            WizardEvent::BackToScript => self.back_to_script(action),

            WizardEvent::StartGeneration => self.start_generation(action),

            WizardEvent::DismissError => {
                self.state.error = None;
                Ok(())
            }

            WizardEvent::StartOver => {
                self.start_over();
                Ok(())
            }
        };

        match &result {
            Err(e) => {
                if let Some(banner) = e.banner() {
                    self.state.error = Some(banner.to_string());
                }
                tracing::debug!(action, error = %e, "Rejected wizard event");
            }
            Ok(()) => self.sync_subscription(),
        }

        result
    }

    /// Fold in finished calls and pending push events (non-blocking)
    ///
    /// Call this regularly (e.g. once per frame).
    /// Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut activity = false;

        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion);
            activity = true;
        }

        self.poll_progress_at(Instant::now()) || activity
    }

    /// Wait for the next spawned call to finish and fold it in
    ///
    /// Returns false immediately when nothing is outstanding.
    pub async fn settle(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Fold in push events, treating `now` as the current time
    ///
    /// Returns true if any event was applied.
    pub fn poll_progress_at(&mut self, now: Instant) -> bool {
        let events = self.subscriber.poll_at(now);
        let mut applied = false;

        for event in events {
            // A terminal event disarms; whatever follows it is dropped
            if self.subscriber.armed_for().is_none() {
                break;
            }
            self.apply_progress_event(&event);
            applied = true;
        }

        applied
    }

    fn submit_script(&mut self, action: &'static str) -> Result<(), WizardError> {
        self.require_stage(WizardStage::Script, action)?;
        if self.state.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        if !self.state.draft.has_script() {
            return Err(WizardError::EmptyScript);
        }

        self.state.error = None;

        // project_id is set once per run; resubmitting just moves on
        if self.state.job.project_id.is_some() {
            self.set_stage(WizardStage::Settings);
            return Ok(());
        }

        // Catalog not folded in yet: submit with the reserved fallback voice
        if self.state.draft.voice_id.is_empty() {
            self.state.draft.voice_id = VoiceId::new(FALLBACK_VOICE_ID);
        }

        let request =
            CreateProjectRequest::from_draft(&self.state.draft, self.state.voice_name());
        self.state.submitting = true;

        let api = Arc::clone(&self.api);
        let epoch = self.epoch;
        self.spawn(async move {
            let result = api.create_project(&request).await;
            Completion::ProjectCreated { epoch, result }
        });

        Ok(())
    }

    fn back_to_script(&mut self, action: &'static str) -> Result<(), WizardError> {
        self.require_stage(WizardStage::Settings, action)?;
        if self.state.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        self.set_stage(WizardStage::Script);
        Ok(())
    }

    fn start_generation(&mut self, action: &'static str) -> Result<(), WizardError> {
        self.require_stage(WizardStage::Settings, action)?;
        if self.state.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        let Some(project_id) = self.state.job.project_id.clone() else {
            return Err(WizardError::MissingProject);
        };

        self.state.error = None;
        self.state.job.progress = 0.0;
        self.state.job.message = MSG_STARTING.to_string();

        let request = StartGenerationRequest::from_draft(project_id, &self.state.draft);
        self.state.submitting = true;

        let api = Arc::clone(&self.api);
        let epoch = self.epoch;
        self.spawn(async move {
            let result = api.start_generation(&request).await;
            Completion::GenerationStarted { epoch, result }
        });

        Ok(())
    }

    fn start_over(&mut self) {
        self.epoch += 1;
        self.subscriber.disarm();
        self.state.reset();
        tracing::info!(epoch = self.epoch, "Wizard reset");
    }

    fn apply_completion(&mut self, completion: Completion) {
        self.pending = self.pending.saturating_sub(1);

        match completion {
            Completion::Voices(result) => {
                self.state.voices = VoiceCatalog::from_result(result);
                self.state.voices_loaded = true;

                let selected = &self.state.draft.voice_id;
                if !self.state.voices.contains(selected) {
                    if let Some(voice) = self.state.voices.default_voice() {
                        self.state.draft.voice_id = voice.voice_id.clone();
                    }
                }
            }

            Completion::ProjectCreated { epoch, .. } | Completion::GenerationStarted { epoch, .. }
                if epoch != self.epoch =>
            {
                tracing::debug!(
                    epoch,
                    current = self.epoch,
                    "Discarding response from a previous run"
                );
            }

            Completion::ProjectCreated { result, .. } => {
                self.state.submitting = false;
                match result {
                    Ok(created) => {
                        tracing::info!(project_id = %created.project_id, "Project created");
                        self.state.job.project_id = Some(created.project_id);
                        self.set_stage(WizardStage::Settings);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Create project failed");
                        self.state.error = Some(MSG_CREATE_FAILED.to_string());
                    }
                }
            }

            Completion::GenerationStarted { result, .. } => {
                self.state.submitting = false;
                match result {
                    Ok(started) => {
                        tracing::info!(generation_id = %started.generation_id, "Generation started");
                        let job = &mut self.state.job;
                        job.generation_id = Some(started.generation_id);
                        job.status = JobStatus::from_wire(&started.status);
                        job.progress = 0.0;
                        job.message = MSG_STARTING.to_string();
                        self.state.is_generating = true;
                        self.set_stage(WizardStage::Generating);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Start generation failed");
                        self.state.is_generating = false;
                        self.state.error = Some(MSG_START_FAILED.to_string());
                    }
                }
            }
        }

        self.sync_subscription();
    }

    fn apply_progress_event(&mut self, event: &ProgressEvent) {
        let status = event.status();
        self.state
            .job
            .overwrite(status, event.progress(), event.message().to_string());

        match status {
            JobStatus::Completed => match event.video_url() {
                Some(url) => {
                    tracing::info!(url = %url, "Generation completed");
                    self.state.job.result_url = Some(url.to_string());
                    self.state.is_generating = false;
                    self.set_stage(WizardStage::Result);
                }
                None => {
                    tracing::debug!("Completed event without a video URL, still waiting");
                }
            },
            JobStatus::Failed => {
                let message = match event.message() {
                    "" => MSG_GENERATION_FAILED,
                    message => message,
                };
                tracing::warn!(message = %message, "Generation failed");
                self.state.error = Some(message.to_string());
                self.state.is_generating = false;
            }
            _ => {}
        }

        self.sync_subscription();
    }

    /// Arm exactly when a generation exists and is being followed
    fn sync_subscription(&mut self) {
        match (&self.state.job.generation_id, self.state.is_generating) {
            (Some(generation_id), true) => self.subscriber.arm(generation_id),
            _ => self.subscriber.disarm(),
        }
    }

    fn require_stage(&self, stage: WizardStage, action: &'static str) -> Result<(), WizardError> {
        if self.state.stage == stage {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                action,
                stage: self.state.stage,
            })
        }
    }

    fn set_stage(&mut self, stage: WizardStage) {
        if self.state.stage != stage {
            tracing::info!(from = %self.state.stage, to = %stage, "Wizard stage changed");
            self.state.stage = stage;
        }
    }

    fn spawn<F>(&mut self, call: F)
    where
        F: std::future::Future<Output = Completion> + Send + 'static,
    {
        let tx = self.completion_tx.clone();
        self.pending += 1;
        tokio::spawn(async move {
            // Receiver only goes away with the wizard
            let _ = tx.send(call.await);
        });
    }
}
