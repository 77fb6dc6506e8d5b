//! Visualization steps and the recorder that emits them.

use crate::AlgorithmId;

/// One discrete moment in a simulated sort.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualizationStep {
    /// Snapshot of the values at this step
    pub array: Vec<i64>,
    /// Cumulative comparisons, including this step
    pub comparisons: u64,
    /// Cumulative element exchanges, including this step
    pub swaps: u64,
    /// Indices under examination (empty on the first and last step)
    pub highlighted: Vec<usize>,
    /// Narration of the operation
    pub description: String,
}

impl VisualizationStep {
    /// Whether `index` is highlighted in this step.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }
}

/// Accumulates steps while a generator walks through a sort.
///
/// The recorder owns the cumulative counters so every emitted step carries
/// totals that never decrease. It always opens with a "starting" step and
/// [`finish`](Self::finish) always closes with a "completed" step.
#[derive(Debug)]
pub struct StepRecorder {
    algorithm: AlgorithmId,
    steps: Vec<VisualizationStep>,
    comparisons: u64,
    swaps: u64,
}

impl StepRecorder {
    /// Begin a trace, recording the starting step for `input`.
    pub fn start(algorithm: AlgorithmId, input: &[i64]) -> Self {
        let starting = VisualizationStep {
            array: input.to_vec(),
            comparisons: 0,
            swaps: 0,
            highlighted: Vec::new(),
            description: format!(
                "Starting {} on array of {} elements",
                algorithm.name(),
                input.len()
            ),
        };
        Self {
            algorithm,
            steps: vec![starting],
            comparisons: 0,
            swaps: 0,
        }
    }

    /// Count one comparison. Takes effect on the next emitted step.
    pub fn compare(&mut self) {
        self.comparisons += 1;
    }

    /// Count one exchange. Takes effect on the next emitted step.
    pub fn swap(&mut self) {
        self.swaps += 1;
    }

    /// Emit a step with the current counters.
    pub fn emit(&mut self, array: &[i64], highlighted: Vec<usize>, description: String) {
        self.steps.push(VisualizationStep {
            array: array.to_vec(),
            comparisons: self.comparisons,
            swaps: self.swaps,
            highlighted,
            description,
        });
    }

    /// Close the trace with the completed step and return all steps.
    pub fn finish(mut self, array: &[i64]) -> Vec<VisualizationStep> {
        let description = format!("{} completed! Array is now sorted.", self.algorithm.name());
        self.steps.push(VisualizationStep {
            array: array.to_vec(),
            comparisons: self.comparisons,
            swaps: self.swaps,
            highlighted: Vec::new(),
            description,
        });
        self.steps
    }
}
