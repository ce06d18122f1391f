use crate::pixels::{ChannelLayout, Component, ElementType, RasterType};
use crate::raster::Raster;

/// Interleaved ↔ planar reorder at fixed element type: a per-pixel
/// gather/scatter between the two addressing rules.
pub(crate) fn reorder(src: &Raster, target: RasterType) -> Raster {
    debug_assert_eq!(src.element_type(), target.element_type());
    debug_assert_eq!(src.channel_count(), 3);
    debug_assert_eq!(target.channel_count(), 3);
    let mut dst = Raster::create(src.width(), src.height(), target);
    match src.element_type() {
        ElementType::U8 => run::<u8>(src, &mut dst),
        ElementType::F32 => run::<f32>(src, &mut dst),
    }
    dst
}

fn run<T: Component>(src: &Raster, dst: &mut Raster) {
    let count = src.width() * src.height();
    match (src.raster_type().layout(), dst.raster_type().layout()) {
        (ChannelLayout::Interleaved, ChannelLayout::Planar) => {
            let pixels = src.as_components::<T>();
            let planes = dst.as_components_mut::<T>();
            for c in 0..3 {
                let plane = &mut planes[c * count..(c + 1) * count];
                for (slot, pixel) in plane.iter_mut().zip(pixels.chunks_exact(3)) {
                    *slot = pixel[c];
                }
            }
        }
        (ChannelLayout::Planar, ChannelLayout::Interleaved) => {
            let planes = src.as_components::<T>();
            let pixels = dst.as_components_mut::<T>();
            for c in 0..3 {
                let plane = &planes[c * count..(c + 1) * count];
                for (pixel, &v) in pixels.chunks_exact_mut(3).zip(plane) {
                    pixel[c] = v;
                }
            }
        }
        _ => unreachable!("reorder requires a layout change"),
    }
}
