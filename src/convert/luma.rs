use crate::pixels::{ChannelLayout, Component, ElementType, RasterType};
use crate::raster::Raster;

pub(crate) const LUMA_R: f32 = 0.299;
pub(crate) const LUMA_G: f32 = 0.587;
pub(crate) const LUMA_B: f32 = 0.114;

/// BT.601 luma weighting, always computed in floating point.
#[inline(always)]
pub(crate) fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Luma reduction to gray at fixed element type; `u8` destinations round
/// half-up.
pub(crate) fn to_gray(src: &Raster, target: RasterType) -> Raster {
    debug_assert_eq!(src.element_type(), target.element_type());
    debug_assert_eq!(src.channel_count(), 3);
    debug_assert_eq!(target.channel_count(), 1);
    let mut dst = Raster::create(src.width(), src.height(), target);
    match src.element_type() {
        ElementType::U8 => run::<u8>(src, &mut dst),
        ElementType::F32 => run::<f32>(src, &mut dst),
    }
    dst
}

fn run<T: Component>(src: &Raster, dst: &mut Raster) {
    let count = src.width() * src.height();
    let out = dst.as_components_mut::<T>();
    match src.raster_type().layout() {
        ChannelLayout::Interleaved => {
            for (slot, pixel) in out.iter_mut().zip(src.as_components::<T>().chunks_exact(3)) {
                *slot = T::from_f32(luma(
                    pixel[0].to_f32(),
                    pixel[1].to_f32(),
                    pixel[2].to_f32(),
                ));
            }
        }
        ChannelLayout::Planar => {
            let planes = src.as_components::<T>();
            let (r, rest) = planes.split_at(count);
            let (g, b) = rest.split_at(count);
            for (((slot, &r), &g), &b) in out.iter_mut().zip(r).zip(g).zip(b) {
                *slot = T::from_f32(luma(r.to_f32(), g.to_f32(), b.to_f32()));
            }
        }
    }
}
