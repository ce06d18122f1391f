use rayon::prelude::*;

use super::taps::TapPlan;
use crate::pixels::Component;
use crate::threading;

/// Columns gathered per block.
const LANES: usize = 8;

/// Filter every column of one plane in place: 8 columns at a time are
/// gathered into padded scratch lanes, filtered, and scattered back.
/// Trades scratch memory for cache-friendly column access.
pub(crate) fn filter_cols_in_place<T: Component>(
    data: &mut [T],
    width: usize,
    height: usize,
    k: &[f32],
    plan: &TapPlan,
) {
    if width == 0 || height == 0 {
        return;
    }
    let radius = k.len() / 2;
    let padded_len = height + k.len() - 1;
    let mut lanes = vec![0.0f32; LANES * padded_len];

    let mut x0 = 0;
    while x0 < width {
        let block = LANES.min(width - x0);
        for (j, lane) in lanes.chunks_exact_mut(padded_len).take(block).enumerate() {
            gather_column(data, width, height, x0 + j, radius, lane);
        }
        for lane in lanes.chunks_exact_mut(padded_len).take(block) {
            plan.apply(lane, height, k);
        }
        for (j, lane) in lanes.chunks_exact(padded_len).take(block).enumerate() {
            let x = x0 + j;
            for (y, &v) in lane[..height].iter().enumerate() {
                data[y * width + x] = T::from_f32(v);
            }
        }
        x0 += block;
    }
}

fn gather_column<T: Component>(
    data: &[T],
    width: usize,
    height: usize,
    x: usize,
    radius: usize,
    lane: &mut [f32],
) {
    lane[..radius].fill(0.0);
    for y in 0..height {
        lane[radius + y] = data[y * width + x].to_f32();
    }
    lane[radius + height..].fill(0.0);
}

/// Parallel out-of-place variant: disjoint row bands of the destination
/// are filled by workers reading the shared source. Each band gathers the
/// segment of the zero-padded column it needs, so the per-sample windows
/// (and therefore the output bits) match the in-place strategy exactly.
pub(crate) fn filter_cols_par<T: Component>(
    src: &[T],
    dst: &mut [T],
    width: usize,
    height: usize,
    k: &[f32],
    plan: &TapPlan,
) {
    if width == 0 || height == 0 {
        return;
    }
    let radius = k.len() / 2;
    let band = threading::band_height(width, height);

    dst.par_chunks_mut(band * width)
        .enumerate()
        .for_each(|(band_index, out)| {
            let y0 = band_index * band;
            let rows = out.len() / width;
            let padded_len = rows + k.len() - 1;
            let mut lanes = vec![0.0f32; LANES * padded_len];

            let mut x0 = 0;
            while x0 < width {
                let block = LANES.min(width - x0);
                for (j, lane) in lanes.chunks_exact_mut(padded_len).take(block).enumerate() {
                    gather_band_column(src, width, height, x0 + j, y0, radius, lane);
                }
                for lane in lanes.chunks_exact_mut(padded_len).take(block) {
                    plan.apply(lane, rows, k);
                }
                for (j, lane) in lanes.chunks_exact(padded_len).take(block).enumerate() {
                    let x = x0 + j;
                    for (i, &v) in lane[..rows].iter().enumerate() {
                        out[i * width + x] = T::from_f32(v);
                    }
                }
                x0 += block;
            }
        });
}

/// Segment of the zero-padded column a band needs: padded index `y0 + i`
/// maps to source row `y0 + i - radius`, or zero outside the raster.
fn gather_band_column<T: Component>(
    src: &[T],
    width: usize,
    height: usize,
    x: usize,
    y0: usize,
    radius: usize,
    lane: &mut [f32],
) {
    for (i, slot) in lane.iter_mut().enumerate() {
        let y = (y0 + i) as isize - radius as isize;
        *slot = if y >= 0 && (y as usize) < height {
            src[y as usize * width + x].to_f32()
        } else {
            0.0
        };
    }
}
