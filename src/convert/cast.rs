use crate::pixels::{Component, ElementType, RasterType};
use crate::raster::Raster;

/// Element-type cast at fixed shape: `u8` widens exactly, `f32` narrows
/// with round-half-up and clamp.
pub(crate) fn cast(src: &Raster, target: RasterType) -> Raster {
    debug_assert_eq!(src.channel_count(), target.channel_count());
    debug_assert_eq!(src.raster_type().layout(), target.layout());
    let mut dst = Raster::create(src.width(), src.height(), target);
    match (src.element_type(), target.element_type()) {
        (ElementType::U8, ElementType::F32) => run::<u8, f32>(src, &mut dst),
        (ElementType::F32, ElementType::U8) => run::<f32, u8>(src, &mut dst),
        (ElementType::U8, ElementType::U8) => run::<u8, u8>(src, &mut dst),
        (ElementType::F32, ElementType::F32) => run::<f32, f32>(src, &mut dst),
    }
    dst
}

fn run<S: Component, D: Component>(src: &Raster, dst: &mut Raster) {
    for (d, s) in dst
        .as_components_mut::<D>()
        .iter_mut()
        .zip(src.as_components::<S>())
    {
        *d = D::from_f32(s.to_f32());
    }
}
