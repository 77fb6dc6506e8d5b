//! Playback controller for a generated step list.
//!
//! The controller is a synchronous state machine. Timers live elsewhere
//! (see [`crate::Scheduler`]); they hand the controller a [`Ticket`] on each
//! tick and the controller refuses any ticket issued before its most recent
//! transition. That guard is what keeps a tick that raced with `pause()` or
//! `reset()` from publishing a stale step.

use serde::{Deserialize, Serialize};
use sortscope_steps::{AlgorithmId, GeneratorRegistry, VisualizationStep};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::events::{StepHistory, StepSnapshot};
use crate::session::{ConfigUpdate, InputSource, SessionConfig};

/// Capacity of the snapshot channel.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 256;

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No steps loaded
    Idle,
    /// Cursor advancing on each tick
    Running,
    /// Cursor held
    Paused,
    /// Cursor at the last step
    Completed,
}

/// Authorisation for one tick, tied to the run that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
}

/// Result of [`PlaybackController::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new step list was generated; ticks must use the ticket.
    Started(Ticket),
    /// Paused playback resumed from the held cursor.
    Resumed(Ticket),
    /// Already running; nothing changed.
    Ignored,
}

impl StartOutcome {
    /// Ticket to schedule ticks with, if playback is now running.
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            StartOutcome::Started(ticket) | StartOutcome::Resumed(ticket) => Some(*ticket),
            StartOutcome::Ignored => None,
        }
    }
}

/// Result of [`PlaybackController::set_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    /// Nothing changed.
    Unchanged,
    /// Size changed while not running; the session was reset.
    Reset,
    /// Speed changed while running; reschedule ticks with the new ticket.
    Retimed(Ticket),
    /// Stored for later (size change while running, or speed change while
    /// stopped).
    Stored,
}

/// Owns one visualization session: the input, the step list and the cursor.
pub struct PlaybackController {
    registry: GeneratorRegistry,
    inputs: InputSource,
    input_array: Vec<i64>,
    steps: Vec<VisualizationStep>,
    cursor: usize,
    state: PlaybackState,
    algorithm: AlgorithmId,
    config: SessionConfig,
    resize_pending: bool,
    epoch: u64,
    publisher: broadcast::Sender<StepSnapshot>,
}

impl PlaybackController {
    /// Create an idle controller with a random input of `config.size()`.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_inputs(config, InputSource::from_entropy())
    }

    /// Create an idle controller drawing inputs from `inputs`.
    pub fn with_inputs(config: SessionConfig, mut inputs: InputSource) -> Self {
        let input_array = inputs.generate(config.size());
        let (publisher, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            registry: GeneratorRegistry::default(),
            inputs,
            input_array,
            steps: Vec::new(),
            cursor: 0,
            state: PlaybackState::Idle,
            algorithm: AlgorithmId::default(),
            config,
            resize_pending: false,
            epoch: 0,
            publisher,
        }
    }

    /// Replace the generator registry used by subsequent runs.
    #[must_use]
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Select the initial algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Receive a snapshot on every tick and state change.
    pub fn subscribe(&self) -> broadcast::Receiver<StepSnapshot> {
        self.publisher.subscribe()
    }

    /// Start or resume playback.
    ///
    /// From `Idle` or `Completed` a fresh step list is generated from the
    /// current input and algorithm. From `Paused` the held cursor resumes.
    /// While `Running` this is a no-op.
    pub fn start(&mut self) -> StartOutcome {
        match self.state {
            PlaybackState::Running => {
                trace!("start ignored: already running");
                StartOutcome::Ignored
            }
            PlaybackState::Paused => {
                self.state = PlaybackState::Running;
                let ticket = self.next_ticket();
                debug!(cursor = self.cursor, "playback resumed");
                self.publish();
                StartOutcome::Resumed(ticket)
            }
            PlaybackState::Idle | PlaybackState::Completed => {
                self.steps = self.registry.generate(&self.input_array, self.algorithm);
                self.cursor = 0;
                self.state = PlaybackState::Running;
                let ticket = self.next_ticket();
                debug!(
                    algorithm = %self.algorithm,
                    steps = self.steps.len(),
                    "playback started"
                );
                self.publish();
                StartOutcome::Started(ticket)
            }
        }
    }

    /// Advance one step if `ticket` belongs to the current run.
    ///
    /// Returns the published snapshot, or `None` when the tick is stale or
    /// playback is not running.
    pub fn tick(&mut self, ticket: Ticket) -> Option<StepSnapshot> {
        if self.state != PlaybackState::Running || ticket.epoch != self.epoch {
            trace!(
                ticket = ticket.epoch,
                epoch = self.epoch,
                "discarding stale tick"
            );
            return None;
        }

        self.cursor += 1;
        if self.cursor + 1 >= self.steps.len() {
            self.cursor = self.steps.len().saturating_sub(1);
            self.state = PlaybackState::Completed;
            self.epoch += 1;
            debug!(steps = self.steps.len(), "playback completed");
            if std::mem::take(&mut self.resize_pending) {
                // the completed run stays on screen; the next start uses the new size
                self.input_array = self.inputs.generate(self.config.size());
                debug!(size = self.config.size(), "deferred resize applied");
            }
        }
        Some(self.publish())
    }

    /// Hold the cursor. Only valid while running; returns whether it paused.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.epoch += 1;
        debug!(cursor = self.cursor, "playback paused");
        self.publish();
        true
    }

    /// Discard the run, draw a new input and return to `Idle`.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.resize_pending = false;
        self.steps.clear();
        self.cursor = 0;
        self.input_array = self.inputs.generate(self.config.size());
        self.state = PlaybackState::Idle;
        debug!(size = self.config.size(), "playback reset");
        self.publish();
    }

    /// Choose the algorithm for the next generated run.
    pub fn set_algorithm(&mut self, algorithm: AlgorithmId) {
        self.algorithm = algorithm;
    }

    /// Apply a configuration change.
    pub fn set_config(&mut self, update: ConfigUpdate) -> ConfigChange {
        let previous = self.config;
        self.config = previous.apply(update);

        let size_changed = self.config.size() != previous.size();
        let speed_changed = self.config.speed() != previous.speed();
        let running = self.state == PlaybackState::Running;

        if size_changed && !running {
            self.reset();
            ConfigChange::Reset
        } else if speed_changed && running {
            debug!(speed = self.config.speed(), "playback retimed");
            ConfigChange::Retimed(self.next_ticket())
        } else if size_changed || speed_changed {
            self.resize_pending |= size_changed;
            ConfigChange::Stored
        } else {
            ConfigChange::Unchanged
        }
    }

    /// Ticket for the current run while running.
    pub fn ticket(&self) -> Option<Ticket> {
        (self.state == PlaybackState::Running).then_some(Ticket { epoch: self.epoch })
    }

    /// Get the current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the loaded step list (empty when idle).
    pub fn steps(&self) -> &[VisualizationStep] {
        &self.steps
    }

    /// Get the unsorted input of the session.
    pub fn input_array(&self) -> &[i64] {
        &self.input_array
    }

    /// Get the selected algorithm.
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Get the session configuration.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Step at the cursor, if a run is loaded.
    pub fn current_step(&self) -> Option<&VisualizationStep> {
        self.steps.get(self.cursor)
    }

    /// Snapshot of what the renderer should currently show.
    pub fn snapshot(&self) -> StepSnapshot {
        match self.current_step() {
            Some(step) => StepSnapshot::from_step(step, self.cursor, self.steps.len(), self.state),
            None => StepSnapshot::idle(&self.input_array),
        }
    }

    /// Descriptions of every step in the current run.
    pub fn history(&self) -> StepHistory {
        StepHistory {
            cursor: self.cursor,
            descriptions: self.steps.iter().map(|s| s.description.clone()).collect(),
        }
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            (self.cursor + 1) as f64 / self.steps.len() as f64
        }
    }

    /// "Ready" before a run, otherwise "current/total" counting from one.
    pub fn label(&self) -> String {
        if self.steps.is_empty() {
            "Ready".to_string()
        } else {
            format!("{}/{}", self.cursor + 1, self.steps.len())
        }
    }

    fn next_ticket(&mut self) -> Ticket {
        self.epoch += 1;
        Ticket { epoch: self.epoch }
    }

    fn publish(&self) -> StepSnapshot {
        let snapshot = self.snapshot();
        // no subscribers is fine
        let _ = self.publisher.send(snapshot.clone());
        snapshot
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("algorithm", &self.algorithm)
            .field("config", &self.config)
            .field("cursor", &self.cursor)
            .field("steps", &self.steps.len())
            .field("epoch", &self.epoch)
            .finish()
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub algorithm: AlgorithmId,
    pub size: usize,
    pub speed: u32,
    pub interval_ms: u64,
    pub step_index: usize,
    pub total_steps: usize,
    pub progress: f64,
    pub label: String,
}

impl From<&PlaybackController> for PlaybackStatus {
    fn from(controller: &PlaybackController) -> Self {
        Self {
            state: controller.state,
            algorithm: controller.algorithm,
            size: controller.config.size(),
            speed: controller.config.speed(),
            interval_ms: controller.config.tick_interval().as_millis() as u64,
            step_index: controller.cursor,
            total_steps: controller.steps.len(),
            progress: controller.progress(),
            label: controller.label(),
        }
    }
}
