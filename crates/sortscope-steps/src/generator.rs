//! The step-generation contract and the lookup table that selects an
//! implementation per algorithm.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::{
    AlgorithmId, BubbleSort, HeapSort, InsertionSort, MergeSort, Placeholder, QuickSort,
    VisualizationStep,
};

/// Produces the ordered step list for one algorithm.
///
/// Implementations must return a list that starts with a "starting" step
/// (original array, zero counters, no highlight) and ends with a "completed"
/// step (sorted array, no highlight), with counters that never decrease.
pub trait StepGenerator: Send + Sync {
    /// Trace the algorithm over `input`.
    fn generate(&self, input: &[i64]) -> Vec<VisualizationStep>;

    /// Whether the counters are a faithful trace of the algorithm.
    fn is_faithful(&self) -> bool {
        true
    }
}

/// Maps algorithm identifiers to step generators.
///
/// Identifiers without a registered generator fall back to [`Placeholder`],
/// whose counters are approximate.
pub struct GeneratorRegistry {
    generators: HashMap<AlgorithmId, Box<dyn StepGenerator>>,
}

impl GeneratorRegistry {
    /// An empty registry; every algorithm uses the placeholder.
    pub fn empty() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Faithful generators for every catalogued algorithm.
    pub fn faithful() -> Self {
        let mut registry = Self::default();
        registry.register(AlgorithmId::QuickSort, QuickSort);
        registry.register(AlgorithmId::MergeSort, MergeSort);
        registry.register(AlgorithmId::HeapSort, HeapSort);
        registry
    }

    /// Register (or replace) the generator for `algorithm`.
    pub fn register<G>(&mut self, algorithm: AlgorithmId, generator: G)
    where
        G: StepGenerator + 'static,
    {
        self.generators.insert(algorithm, Box::new(generator));
    }

    /// Whether `algorithm` has a faithful generator registered.
    pub fn is_faithful(&self, algorithm: AlgorithmId) -> bool {
        self.generators
            .get(&algorithm)
            .is_some_and(|g| g.is_faithful())
    }

    /// Generate the step list for `algorithm` over `input`.
    pub fn generate(&self, input: &[i64], algorithm: AlgorithmId) -> Vec<VisualizationStep> {
        match self.generators.get(&algorithm) {
            Some(generator) => generator.generate(input),
            None => Placeholder::new(algorithm).generate(input),
        }
    }
}

impl Default for GeneratorRegistry {
    /// Bubble and insertion sort are simulated; everything else uses the
    /// placeholder.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(AlgorithmId::BubbleSort, BubbleSort);
        registry.register(AlgorithmId::InsertionSort, InsertionSort);
        registry
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut registered: Vec<_> = self.generators.keys().collect();
        registered.sort();
        f.debug_struct("GeneratorRegistry")
            .field("registered", &registered)
            .finish()
    }
}

/// Generate steps with the default registry.
///
/// # Examples
///
/// ```
/// use sortscope_steps::{generate, AlgorithmId};
///
/// let steps = generate(&[5, 3, 1], AlgorithmId::BubbleSort);
/// let last = steps.last().unwrap();
/// assert_eq!(last.array, vec![1, 3, 5]);
/// assert_eq!((last.comparisons, last.swaps), (3, 3));
/// ```
pub fn generate(input: &[i64], algorithm: AlgorithmId) -> Vec<VisualizationStep> {
    static DEFAULT: OnceLock<GeneratorRegistry> = OnceLock::new();
    DEFAULT
        .get_or_init(GeneratorRegistry::default)
        .generate(input, algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_simulates_bubble_and_insertion() {
        let registry = GeneratorRegistry::default();
        assert!(registry.is_faithful(AlgorithmId::BubbleSort));
        assert!(registry.is_faithful(AlgorithmId::InsertionSort));
        assert!(!registry.is_faithful(AlgorithmId::QuickSort));
        assert!(!registry.is_faithful(AlgorithmId::MergeSort));
        assert!(!registry.is_faithful(AlgorithmId::HeapSort));
    }

    #[test]
    fn faithful_registry_covers_catalog() {
        let registry = GeneratorRegistry::faithful();
        for id in AlgorithmId::ALL {
            assert!(registry.is_faithful(id), "{id} should be faithful");
        }
    }

    #[test]
    fn unregistered_algorithm_uses_placeholder() {
        let registry = GeneratorRegistry::empty();
        let steps = registry.generate(&[3, 1, 2], AlgorithmId::BubbleSort);

        // starting + one per placed element + completed
        assert_eq!(steps.len(), 5);
        assert!(steps[1].description.starts_with("Bubble Sort: Placing"));
    }

    #[test]
    fn registration_replaces_existing() {
        let mut registry = GeneratorRegistry::default();
        registry.register(AlgorithmId::BubbleSort, Placeholder::new(AlgorithmId::BubbleSort));
        assert!(!registry.is_faithful(AlgorithmId::BubbleSort));
    }
}
