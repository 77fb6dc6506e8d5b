//! Quick sort trace (Lomuto partition).

use crate::{AlgorithmId, StepGenerator, StepRecorder, VisualizationStep};

/// Quick sort with the last element of each range as pivot.
///
/// Ranges are processed from an explicit stack, left partition first.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl StepGenerator for QuickSort {
    fn generate(&self, input: &[i64]) -> Vec<VisualizationStep> {
        let mut rec = StepRecorder::start(AlgorithmId::QuickSort, input);
        let mut work = input.to_vec();

        // half-open ranges
        let mut ranges = vec![(0usize, work.len())];
        while let Some((lo, hi)) = ranges.pop() {
            if hi.saturating_sub(lo) < 2 {
                continue;
            }
            let store = partition(&mut work, lo, hi, &mut rec);
            ranges.push((store + 1, hi));
            ranges.push((lo, store));
        }

        rec.finish(&work)
    }
}

/// Partition `work[lo..hi]` around its last element; returns the pivot's
/// final position.
fn partition(work: &mut [i64], lo: usize, hi: usize, rec: &mut StepRecorder) -> usize {
    let pivot_at = hi - 1;
    let pivot = work[pivot_at];
    rec.emit(work, vec![pivot_at], format!("Partitioning around pivot {pivot}"));

    let mut store = lo;
    for j in lo..pivot_at {
        rec.compare();
        rec.emit(
            work,
            vec![j, pivot_at],
            format!("Comparing {} with pivot {pivot}", work[j]),
        );
        if work[j] < pivot {
            if j != store {
                work.swap(store, j);
                rec.swap();
                rec.emit(
                    work,
                    vec![store, j],
                    format!("Swapped {} and {}", work[store], work[j]),
                );
            }
            store += 1;
        }
    }

    if store != pivot_at {
        work.swap(store, pivot_at);
        rec.swap();
        rec.emit(
            work,
            vec![store, pivot_at],
            format!("Moved pivot {pivot} to position {}", store + 1),
        );
    }
    store
}
