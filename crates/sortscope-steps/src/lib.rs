//! Sortscope Step Generation
//!
//! Turns an input array and an algorithm choice into the ordered list of
//! [`VisualizationStep`]s that a playback controller replays.
//!
//! # Trace shape
//!
//! Every list produced here has the same frame:
//! - Step 0 is the "starting" state: original array, zero counters, no highlight
//! - Step N−1 is the "completed" state: sorted array, no highlight
//! - `comparisons` and `swaps` are cumulative and never decrease
//!
//! # Generators
//!
//! One [`StepGenerator`] per algorithm, selected through a
//! [`GeneratorRegistry`]. The default registry simulates bubble sort and
//! insertion sort faithfully; the remaining catalogue entries replay a
//! [`Placeholder`] trace with approximate counters.
//! [`GeneratorRegistry::faithful`] swaps in real quick, merge and heap sort
//! traces.

mod algorithm;
mod bubble;
mod error;
mod generator;
mod heap;
mod insertion;
mod merge;
mod placeholder;
mod quick;
mod step;

pub use algorithm::{catalog, AlgorithmId, AlgorithmInfo};
pub use bubble::BubbleSort;
pub use error::{Error, Result};
pub use generator::{generate, GeneratorRegistry, StepGenerator};
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use placeholder::Placeholder;
pub use quick::QuickSort;
pub use step::{StepRecorder, VisualizationStep};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubble_example_counts() {
        let steps = generate(&[5, 3, 1], AlgorithmId::BubbleSort);
        assert_eq!(steps.len(), 8);

        let last = steps.last().unwrap();
        assert_eq!(last.array, vec![1, 3, 5]);
        assert_eq!(last.comparisons, 3);
        assert_eq!(last.swaps, 3);
    }

    #[test]
    fn default_generate_falls_back_for_quick_sort() {
        let steps = generate(&[2, 1], AlgorithmId::QuickSort);
        assert!(steps[1].description.starts_with("Quick Sort: Placing"));
    }

    #[test]
    fn every_algorithm_brackets_empty_input() {
        let faithful = GeneratorRegistry::faithful();
        for id in AlgorithmId::ALL {
            for steps in [generate(&[], id), faithful.generate(&[], id)] {
                assert_eq!(steps.len(), 2, "{id}");
                assert!(steps.iter().all(|s| s.array.is_empty()));
                assert!(steps.iter().all(|s| s.highlighted.is_empty()));
            }
        }
    }
}
