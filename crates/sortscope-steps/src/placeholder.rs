//! Fallback trace for algorithms without a dedicated generator.

use crate::{AlgorithmId, StepGenerator, StepRecorder, VisualizationStep};

/// Sorts up front and replays each output position being placed.
///
/// The counters are synthetic: one comparison per placement and one swap
/// every second placement. They approximate cost and must not be read as
/// a trace of `algorithm`.
#[derive(Debug, Clone, Copy)]
pub struct Placeholder {
    algorithm: AlgorithmId,
}

impl Placeholder {
    /// Placeholder narrated as `algorithm`.
    pub fn new(algorithm: AlgorithmId) -> Self {
        Self { algorithm }
    }
}

impl StepGenerator for Placeholder {
    fn generate(&self, input: &[i64]) -> Vec<VisualizationStep> {
        let mut rec = StepRecorder::start(self.algorithm, input);
        let mut sorted = input.to_vec();
        sorted.sort_unstable();
        let mut work = input.to_vec();

        for (i, &value) in sorted.iter().enumerate() {
            work[i] = value;
            rec.compare();
            if (i + 1) % 2 == 0 {
                rec.swap();
            }
            rec.emit(
                &work,
                vec![i],
                format!(
                    "{}: Placing {} in position {}",
                    self.algorithm.name(),
                    value,
                    i + 1
                ),
            );
        }

        rec.finish(&work)
    }

    fn is_faithful(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_per_position() {
        let steps = Placeholder::new(AlgorithmId::QuickSort).generate(&[9, 4, 7, 1]);

        assert_eq!(steps.len(), 4 + 2);
        assert_eq!(steps[1].array, vec![1, 4, 7, 1]);
        assert_eq!(steps[1].highlighted, vec![0]);
        assert_eq!(steps[1].description, "Quick Sort: Placing 1 in position 1");
        assert_eq!(steps[4].highlighted, vec![3]);
        assert_eq!(steps[5].array, vec![1, 4, 7, 9]);
    }

    #[test]
    fn synthetic_counters() {
        let steps = Placeholder::new(AlgorithmId::HeapSort).generate(&[5, 4, 3, 2, 1]);
        let counters: Vec<_> = steps.iter().map(|s| (s.comparisons, s.swaps)).collect();

        assert_eq!(
            counters,
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2), (5, 2)]
        );
    }

    #[test]
    fn not_faithful() {
        assert!(!Placeholder::new(AlgorithmId::MergeSort).is_faithful());
    }
}
