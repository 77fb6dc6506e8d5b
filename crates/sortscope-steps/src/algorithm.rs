//! Algorithm identifiers and the catalog shown alongside the visualization.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identifies which step generator to apply.
///
/// Variants are listed in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AlgorithmId {
    #[default]
    BubbleSort,
    QuickSort,
    MergeSort,
    HeapSort,
    InsertionSort,
}

impl AlgorithmId {
    /// Every algorithm, in catalog order.
    pub const ALL: [AlgorithmId; 5] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::QuickSort,
        AlgorithmId::MergeSort,
        AlgorithmId::HeapSort,
        AlgorithmId::InsertionSort,
    ];

    /// Look up an algorithm by its catalog position.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::AlgorithmIndexOutOfRange(index))
    }

    /// Position of this algorithm in the catalog.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable name, as used in step narration.
    pub const fn name(&self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "Bubble Sort",
            AlgorithmId::QuickSort => "Quick Sort",
            AlgorithmId::MergeSort => "Merge Sort",
            AlgorithmId::HeapSort => "Heap Sort",
            AlgorithmId::InsertionSort => "Insertion Sort",
        }
    }

    /// Short machine-friendly name.
    pub const fn slug(&self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "bubble-sort",
            AlgorithmId::QuickSort => "quick-sort",
            AlgorithmId::MergeSort => "merge-sort",
            AlgorithmId::HeapSort => "heap-sort",
            AlgorithmId::InsertionSort => "insertion-sort",
        }
    }

    /// Catalog metadata for this algorithm.
    pub const fn info(&self) -> AlgorithmInfo {
        match self {
            AlgorithmId::BubbleSort => AlgorithmInfo {
                id: *self,
                name: self.name(),
                description: "Simple comparison-based sorting algorithm",
                time_complexity: "O(n²)",
                space_complexity: "O(1)",
                stable: true,
            },
            AlgorithmId::QuickSort => AlgorithmInfo {
                id: *self,
                name: self.name(),
                description: "Efficient divide-and-conquer sorting algorithm",
                time_complexity: "O(n log n)",
                space_complexity: "O(log n)",
                stable: false,
            },
            AlgorithmId::MergeSort => AlgorithmInfo {
                id: *self,
                name: self.name(),
                description: "Stable divide-and-conquer sorting algorithm",
                time_complexity: "O(n log n)",
                space_complexity: "O(n)",
                stable: true,
            },
            AlgorithmId::HeapSort => AlgorithmInfo {
                id: *self,
                name: self.name(),
                description: "Comparison-based sorting using binary heap",
                time_complexity: "O(n log n)",
                space_complexity: "O(1)",
                stable: false,
            },
            AlgorithmId::InsertionSort => AlgorithmInfo {
                id: *self,
                name: self.name(),
                description: "Simple sorting algorithm for small datasets",
                time_complexity: "O(n²)",
                space_complexity: "O(1)",
                stable: true,
            },
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    /// Accepts display names ("Bubble Sort"), slugs ("bubble-sort") and bare
    /// stems ("bubble"), case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        let stem = normalized.strip_suffix("-sort").unwrap_or(&normalized);

        match stem {
            "bubble" => Ok(AlgorithmId::BubbleSort),
            "quick" => Ok(AlgorithmId::QuickSort),
            "merge" => Ok(AlgorithmId::MergeSort),
            "heap" => Ok(AlgorithmId::HeapSort),
            "insertion" => Ok(AlgorithmId::InsertionSort),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Catalog entry describing an algorithm's cost profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub stable: bool,
}

/// The full catalog, in display order.
pub fn catalog() -> Vec<AlgorithmInfo> {
    AlgorithmId::ALL.iter().map(AlgorithmId::info).collect()
}
