//! Pairwise conversion graph between the six raster type tags.
//!
//! Four structural kernels cover the whole graph: element cast, layout
//! reorder, luma reduction and gray expansion. Pairs that differ on more
//! than one axis compose two kernels through an intermediate tag: cast
//! before reorder when widening, reorder before cast when narrowing, and
//! channel-count changes always run at the source element type first (so
//! a `u8` source is quantized before any widening).
//!
//! The dispatch is one total match over the tag pair; a combination
//! without a path cannot be expressed.

mod cast;
mod expand;
mod layout;
mod luma;

use crate::pixels::RasterType;
use crate::raster::Raster;

pub(crate) fn convert_to(src: &Raster, target: RasterType) -> Raster {
    use RasterType::*;
    match (src.raster_type(), target) {
        // same tag: plain deep copy
        (U8Gray, U8Gray)
        | (F32Gray, F32Gray)
        | (U8Rgb, U8Rgb)
        | (F32Rgb, F32Rgb)
        | (U8PlanarRgb, U8PlanarRgb)
        | (F32PlanarRgb, F32PlanarRgb) => src.clone(),

        // element cast at fixed shape
        (U8Gray, F32Gray)
        | (U8Rgb, F32Rgb)
        | (U8PlanarRgb, F32PlanarRgb)
        | (F32Gray, U8Gray)
        | (F32Rgb, U8Rgb)
        | (F32PlanarRgb, U8PlanarRgb) => cast::cast(src, target),

        // layout reorder at fixed element type
        (U8Rgb, U8PlanarRgb) | (U8PlanarRgb, U8Rgb) | (F32Rgb, F32PlanarRgb)
        | (F32PlanarRgb, F32Rgb) => layout::reorder(src, target),

        // luma reduction at fixed element type
        (U8Rgb, U8Gray) | (U8PlanarRgb, U8Gray) => luma::to_gray(src, target),
        (F32Rgb, F32Gray) | (F32PlanarRgb, F32Gray) => luma::to_gray(src, target),

        // gray expansion at fixed element type
        (U8Gray, U8Rgb) | (U8Gray, U8PlanarRgb) => expand::to_rgb(src, target),
        (F32Gray, F32Rgb) | (F32Gray, F32PlanarRgb) => expand::to_rgb(src, target),

        // luma with an element change: reduce at the source element type,
        // then cast
        (U8Rgb, F32Gray) | (U8PlanarRgb, F32Gray) => {
            cast::cast(&luma::to_gray(src, U8Gray), target)
        }
        (F32Rgb, U8Gray) | (F32PlanarRgb, U8Gray) => {
            cast::cast(&luma::to_gray(src, F32Gray), target)
        }

        // expansion with an element change: cast first when widening,
        // expand first when narrowing
        (U8Gray, F32Rgb) => expand::to_rgb(&cast::cast(src, F32Gray), F32Rgb),
        (U8Gray, F32PlanarRgb) => expand::to_rgb(&cast::cast(src, F32Gray), F32PlanarRgb),
        (F32Gray, U8Rgb) => cast::cast(&expand::to_rgb(src, F32Rgb), U8Rgb),
        (F32Gray, U8PlanarRgb) => cast::cast(&expand::to_rgb(src, F32PlanarRgb), U8PlanarRgb),

        // layout and element both change: cast before reorder when
        // widening, reorder before cast when narrowing
        (U8Rgb, F32PlanarRgb) => layout::reorder(&cast::cast(src, F32Rgb), F32PlanarRgb),
        (U8PlanarRgb, F32Rgb) => layout::reorder(&cast::cast(src, F32PlanarRgb), F32Rgb),
        (F32Rgb, U8PlanarRgb) => cast::cast(&layout::reorder(src, F32PlanarRgb), U8PlanarRgb),
        (F32PlanarRgb, U8Rgb) => cast::cast(&layout::reorder(src, F32Rgb), U8Rgb),
    }
}
