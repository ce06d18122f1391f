use rayon::current_num_threads;

/// Height of one destination band for parallel vertical filtering.
///
/// It is not optimal to split an image into too many small parts. For
/// small images the minimal band is `constant / area`, for tall images it
/// is `height / 256`; the band count is additionally capped by the size
/// of the rayon pool.
pub(crate) fn band_height(width: usize, height: usize) -> usize {
    if height == 0 {
        return 1;
    }
    let area = height * height.max(width);
    let min_band = ((1 << 14) / area.max(1)).max(height / 256).max(1);
    let parts = (height / min_band).clamp(1, current_num_threads().max(1));
    height.div_ceil(parts)
}
