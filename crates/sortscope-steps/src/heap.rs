//! Heap sort trace.

use crate::{AlgorithmId, StepGenerator, StepRecorder, VisualizationStep};

/// Heap sort over an in-place binary max-heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl StepGenerator for HeapSort {
    fn generate(&self, input: &[i64]) -> Vec<VisualizationStep> {
        let mut rec = StepRecorder::start(AlgorithmId::HeapSort, input);
        let mut work = input.to_vec();
        let n = work.len();

        for root in (0..n / 2).rev() {
            sift_down(&mut work, root, n, &mut rec);
        }

        for end in (1..n).rev() {
            work.swap(0, end);
            rec.swap();
            rec.emit(
                &work,
                vec![0, end],
                format!("Moved max {} to position {}", work[end], end + 1),
            );
            sift_down(&mut work, 0, end, &mut rec);
        }

        rec.finish(&work)
    }
}

/// Restore the heap property below `root` within `work[..end]`.
fn sift_down(work: &mut [i64], mut root: usize, end: usize, rec: &mut StepRecorder) {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return;
        }

        let mut largest = root;
        for child in [left, left + 1] {
            if child >= end {
                break;
            }
            rec.compare();
            rec.emit(
                work,
                vec![largest, child],
                format!("Comparing {} and {}", work[largest], work[child]),
            );
            if work[child] > work[largest] {
                largest = child;
            }
        }

        if largest == root {
            return;
        }
        work.swap(root, largest);
        rec.swap();
        rec.emit(
            work,
            vec![root, largest],
            format!("Swapped {} and {}", work[largest], work[root]),
        );
        root = largest;
    }
}
