//! Trace invariants that must hold for every generator and every input.

use proptest::prelude::*;
use sortscope_steps::{AlgorithmId, GeneratorRegistry, VisualizationStep};

fn sorted(input: &[i64]) -> Vec<i64> {
    let mut v = input.to_vec();
    v.sort();
    v
}

fn assert_trace_shape(input: &[i64], steps: &[VisualizationStep]) -> Result<(), TestCaseError> {
    prop_assert!(steps.len() >= 2);

    let first = &steps[0];
    prop_assert_eq!(&first.array, &input.to_vec());
    prop_assert_eq!((first.comparisons, first.swaps), (0, 0));
    prop_assert!(first.highlighted.is_empty());

    let last = &steps[steps.len() - 1];
    prop_assert_eq!(&last.array, &sorted(input));
    prop_assert!(last.highlighted.is_empty());

    for pair in steps.windows(2) {
        prop_assert!(pair[0].comparisons <= pair[1].comparisons);
        prop_assert!(pair[0].swaps <= pair[1].swaps);
    }
    for step in &steps[1..steps.len() - 1] {
        prop_assert!(!step.highlighted.is_empty());
        prop_assert_eq!(step.array.len(), input.len());
        prop_assert!(step.highlighted.iter().all(|&i| i < input.len()));
    }
    Ok(())
}

proptest! {
    #[test]
    fn default_registry_traces_are_well_formed(
        input in prop::collection::vec(-1000i64..1000, 0..40),
        index in 0usize..5,
    ) {
        let algorithm = AlgorithmId::from_index(index).unwrap();
        let steps = GeneratorRegistry::default().generate(&input, algorithm);
        assert_trace_shape(&input, &steps)?;
    }

    #[test]
    fn faithful_registry_traces_are_well_formed(
        input in prop::collection::vec(-1000i64..1000, 0..40),
        index in 0usize..5,
    ) {
        let algorithm = AlgorithmId::from_index(index).unwrap();
        let steps = GeneratorRegistry::faithful().generate(&input, algorithm);
        assert_trace_shape(&input, &steps)?;
    }

    #[test]
    fn bubble_sort_on_sorted_input_only_compares(
        input in prop::collection::vec(0i64..100, 1..30),
    ) {
        let input = sorted(&input);
        let n = input.len();
        let steps = sortscope_steps::generate(&input, AlgorithmId::BubbleSort);

        prop_assert_eq!(steps.len(), n * (n - 1) / 2 + 2);
        prop_assert_eq!(steps[steps.len() - 1].swaps, 0);
    }

    #[test]
    fn quadratic_generators_stay_bounded(
        input in prop::collection::vec(any::<i64>(), 0..30),
    ) {
        let n = input.len();
        let bound = n * n + 2;
        for algorithm in [AlgorithmId::BubbleSort, AlgorithmId::InsertionSort] {
            let steps = sortscope_steps::generate(&input, algorithm);
            prop_assert!(steps.len() <= bound);
        }
        let placeholder = sortscope_steps::generate(&input, AlgorithmId::HeapSort);
        prop_assert_eq!(placeholder.len(), n + 2);
    }

    #[test]
    fn bubble_and_insertion_agree_on_swap_count(
        input in prop::collection::vec(0i64..20, 0..25),
    ) {
        // both count inversions: one swap or shift per inverted pair
        let bubble = sortscope_steps::generate(&input, AlgorithmId::BubbleSort);
        let insertion = sortscope_steps::generate(&input, AlgorithmId::InsertionSort);
        prop_assert_eq!(
            bubble[bubble.len() - 1].swaps,
            insertion[insertion.len() - 1].swaps
        );
    }
}
