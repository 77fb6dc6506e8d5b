//! Insertion sort trace.

use crate::{AlgorithmId, StepGenerator, StepRecorder, VisualizationStep};

/// Insertion sort with element shifting.
///
/// Each key gets an "inserting" step; each leftward shift counts as one
/// comparison and one swap and gets a "shifting" step highlighting the
/// source and destination slots. Placing the key emits nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl StepGenerator for InsertionSort {
    fn generate(&self, input: &[i64]) -> Vec<VisualizationStep> {
        let mut rec = StepRecorder::start(AlgorithmId::InsertionSort, input);
        let mut work = input.to_vec();

        for i in 1..work.len() {
            let key = work[i];
            rec.emit(&work, vec![i], format!("Inserting {key} into sorted portion"));

            let mut j = i;
            while j > 0 && work[j - 1] > key {
                rec.compare();
                rec.swap();
                work[j] = work[j - 1];
                rec.emit(
                    &work,
                    vec![j - 1, j],
                    format!("Shifting {} to make room", work[j]),
                );
                j -= 1;
            }
            work[j] = key;
        }

        rec.finish(&work)
    }
}
