//! Snapshots published to the rendering layer.

use serde::{Deserialize, Serialize};
use sortscope_steps::VisualizationStep;

use crate::playback::PlaybackState;

/// What the renderer draws after each tick or state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub array: Vec<i64>,
    pub comparisons: u64,
    pub swaps: u64,
    pub highlighted: Vec<usize>,
    pub description: String,
    /// Cursor position (0 when no steps are loaded)
    pub step_index: usize,
    /// Length of the loaded step list (0 when idle)
    pub total_steps: usize,
    pub state: PlaybackState,
}

impl StepSnapshot {
    /// Snapshot of step `index` in a loaded run.
    pub fn from_step(
        step: &VisualizationStep,
        index: usize,
        total_steps: usize,
        state: PlaybackState,
    ) -> Self {
        Self {
            array: step.array.clone(),
            comparisons: step.comparisons,
            swaps: step.swaps,
            highlighted: step.highlighted.clone(),
            description: step.description.clone(),
            step_index: index,
            total_steps,
            state,
        }
    }

    /// Snapshot of a session with no steps loaded.
    pub fn idle(input: &[i64]) -> Self {
        Self {
            array: input.to_vec(),
            comparisons: 0,
            swaps: 0,
            highlighted: Vec::new(),
            description: "Ready".to_string(),
            step_index: 0,
            total_steps: 0,
            state: PlaybackState::Idle,
        }
    }

}

/// Narration of every step in the current run, for the progress list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepHistory {
    pub cursor: usize,
    pub descriptions: Vec<String>,
}
