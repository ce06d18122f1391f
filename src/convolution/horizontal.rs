use rayon::prelude::*;

use super::taps::TapPlan;
use super::Execution;
use crate::pixels::Component;

/// Filter every row of one plane in place.
///
/// Rows are independent, so the parallel strategy distributes them over
/// the rayon pool with one scratch buffer per worker; the per-row
/// arithmetic is shared, which keeps both strategies bit-identical.
pub(crate) fn filter_rows<T: Component>(
    data: &mut [T],
    width: usize,
    k: &[f32],
    plan: &TapPlan,
    execution: Execution,
) {
    if width == 0 {
        return;
    }
    let padded_len = width + k.len() - 1;
    match execution {
        Execution::Sequential => {
            let mut scratch = vec![0.0f32; padded_len];
            for row in data.chunks_exact_mut(width) {
                filter_row(row, k, plan, &mut scratch);
            }
        }
        Execution::Parallel => {
            data.par_chunks_exact_mut(width)
                .for_each_init(|| vec![0.0f32; padded_len], |scratch, row| {
                    filter_row(row, k, plan, scratch);
                });
        }
    }
}

/// One row: zero the pads, copy the samples through `f32`, run the kernel
/// application at the buffer's front, copy the results back.
fn filter_row<T: Component>(row: &mut [T], k: &[f32], plan: &TapPlan, scratch: &mut [f32]) {
    let width = row.len();
    let radius = k.len() / 2;
    scratch[..radius].fill(0.0);
    for (slot, s) in scratch[radius..radius + width].iter_mut().zip(row.iter()) {
        *slot = s.to_f32();
    }
    scratch[radius + width..].fill(0.0);

    plan.apply(scratch, width, k);

    for (d, &s) in row.iter_mut().zip(scratch[..width].iter()) {
        *d = T::from_f32(s);
    }
}
