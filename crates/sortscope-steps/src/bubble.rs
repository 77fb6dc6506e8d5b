//! Bubble sort trace.

use crate::{AlgorithmId, StepGenerator, StepRecorder, VisualizationStep};

/// Adjacent-pair bubble sort over a shrinking unsorted suffix.
///
/// Emits one step per comparison and one more per swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl StepGenerator for BubbleSort {
    fn generate(&self, input: &[i64]) -> Vec<VisualizationStep> {
        let mut rec = StepRecorder::start(AlgorithmId::BubbleSort, input);
        let mut work = input.to_vec();
        let n = work.len();

        for pass in 0..n.saturating_sub(1) {
            for j in 0..n - pass - 1 {
                rec.compare();
                rec.emit(
                    &work,
                    vec![j, j + 1],
                    format!("Comparing {} and {}", work[j], work[j + 1]),
                );

                if work[j] > work[j + 1] {
                    work.swap(j, j + 1);
                    rec.swap();
                    rec.emit(
                        &work,
                        vec![j, j + 1],
                        format!("Swapped {} and {}", work[j + 1], work[j]),
                    );
                }
            }
        }

        rec.finish(&work)
    }
}
