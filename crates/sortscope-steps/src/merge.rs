//! Merge sort trace (bottom-up).

use crate::{AlgorithmId, StepGenerator, StepRecorder, VisualizationStep};

/// Bottom-up merge sort.
///
/// Each write back into the array counts as a swap, so the swap counter
/// measures data movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl StepGenerator for MergeSort {
    fn generate(&self, input: &[i64]) -> Vec<VisualizationStep> {
        let mut rec = StepRecorder::start(AlgorithmId::MergeSort, input);
        let mut work = input.to_vec();
        let n = work.len();

        let mut width = 1;
        while width < n {
            let mut lo = 0;
            while lo < n {
                let mid = (lo + width).min(n);
                let hi = (lo + 2 * width).min(n);
                if mid < hi {
                    merge(&mut work, lo, mid, hi, &mut rec);
                }
                lo += 2 * width;
            }
            width *= 2;
        }

        rec.finish(&work)
    }
}

/// Merges `work[lo..mid]` with `work[mid..hi]` in place.
///
/// Unmerged elements of both runs stay visible: `work[lo..l]` is merged
/// output, `work[l..r]` the rest of the left run and `work[r..hi]` the rest
/// of the right run. Taking from the right rotates its head into slot `l`.
fn merge(work: &mut [i64], lo: usize, mid: usize, hi: usize, rec: &mut StepRecorder) {
    let (mut l, mut r) = (lo, mid);

    while l < r && r < hi {
        rec.compare();
        rec.emit(
            work,
            vec![l, r],
            format!("Comparing {} and {}", work[l], work[r]),
        );
        // ties take from the left run to stay stable
        if work[r] < work[l] {
            work[l..=r].rotate_right(1);
            r += 1;
        }
        write(work, l, rec);
        l += 1;
    }

    for at in l..hi {
        write(work, at, rec);
    }
}

fn write(work: &[i64], at: usize, rec: &mut StepRecorder) {
    rec.swap();
    rec.emit(
        work,
        vec![at],
        format!("Writing {} to position {}", work[at], at + 1),
    );
}
