use crate::pixels::{ChannelLayout, Component, ElementType, RasterType};
use crate::raster::Raster;

/// Gray expansion: broadcast the single channel into all three channels of
/// the destination layout, element type unchanged.
pub(crate) fn to_rgb(src: &Raster, target: RasterType) -> Raster {
    debug_assert_eq!(src.element_type(), target.element_type());
    debug_assert_eq!(src.channel_count(), 1);
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
    let gray = src.as_components::<T>();
    match dst.raster_type().layout() {
        ChannelLayout::Interleaved => {
            for (pixel, &v) in dst.as_components_mut::<T>().chunks_exact_mut(3).zip(gray) {
                pixel.fill(v);
            }
        }
        ChannelLayout::Planar => {
            let planes = dst.as_components_mut::<T>();
            for c in 0..3 {
                planes[c * count..(c + 1) * count].copy_from_slice(gray);
            }
        }
    }
}
