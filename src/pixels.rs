use std::mem::size_of;

use bytemuck::Pod;
use num_traits::AsPrimitive;

/// Scalar storage type of one raster element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    U8,
    F32,
}

impl ElementType {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::U8 => size_of::<u8>(),
            Self::F32 => size_of::<f32>(),
        }
    }
}

/// Storage order of the three channels of an RGB raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// `r,g,b,r,g,b,...`: the channels of one pixel are contiguous.
    Interleaved,
    /// All red values, then all green, then all blue.
    Planar,
}

/// Type tag of a raster: element type, channel count and channel layout.
///
/// The six variants are the only supported pixel encodings; every dispatch
/// on a tag is a total match, so an unhandled combination is a compile
/// error rather than a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterType {
    U8Gray,
    F32Gray,
    U8Rgb,
    F32Rgb,
    U8PlanarRgb,
    F32PlanarRgb,
}

impl RasterType {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::U8Gray | Self::U8Rgb | Self::U8PlanarRgb => ElementType::U8,
            Self::F32Gray | Self::F32Rgb | Self::F32PlanarRgb => ElementType::F32,
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Self::U8Gray | Self::F32Gray => 1,
            Self::U8Rgb | Self::F32Rgb | Self::U8PlanarRgb | Self::F32PlanarRgb => 3,
        }
    }

    /// Channel layout. Single-channel rasters report `Planar`; the two
    /// layouts coincide for one channel.
    pub fn layout(&self) -> ChannelLayout {
        match self {
            Self::U8Rgb | Self::F32Rgb => ChannelLayout::Interleaved,
            Self::U8Gray | Self::F32Gray | Self::U8PlanarRgb | Self::F32PlanarRgb => {
                ChannelLayout::Planar
            }
        }
    }

    pub fn is_planar(&self) -> bool {
        self.layout() == ChannelLayout::Planar
    }

    /// Bytes occupied by one pixel (all channels).
    pub fn pixel_size(&self) -> usize {
        self.element_type().size() * self.channel_count()
    }

    /// Stable numeric code used by the tagged raw stream format.
    pub(crate) fn code(&self) -> i32 {
        match self {
            Self::U8Gray => 0,
            Self::F32Gray => 1,
            Self::U8Rgb => 2,
            Self::F32Rgb => 3,
            Self::U8PlanarRgb => 4,
            Self::F32PlanarRgb => 5,
        }
    }

    pub(crate) fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::U8Gray),
            1 => Some(Self::F32Gray),
            2 => Some(Self::U8Rgb),
            3 => Some(Self::F32Rgb),
            4 => Some(Self::U8PlanarRgb),
            5 => Some(Self::F32PlanarRgb),
            _ => None,
        }
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for f32 {}
}

/// Scalar element of a raster. The seam every element-generic algorithm
/// goes through: widening to `f32` is exact, narrowing to `u8` rounds
/// half-up and clamps.
pub trait Component: Copy + Pod + Send + Sync + private::Sealed + 'static {
    const ELEMENT: ElementType;

    fn to_f32(self) -> f32;
    fn from_f32(v: f32) -> Self;
}

impl Component for u8 {
    const ELEMENT: ElementType = ElementType::U8;

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self.as_()
    }

    #[inline(always)]
    fn from_f32(v: f32) -> Self {
        clamp_round_u8(v)
    }
}

impl Component for f32 {
    const ELEMENT: ElementType = ElementType::F32;

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline(always)]
    fn from_f32(v: f32) -> Self {
        v
    }
}

/// Round half-up (add 0.5, truncate) and clamp to the `u8` range.
#[inline(always)]
pub(crate) fn clamp_round_u8(v: f32) -> u8 {
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        (v + 0.5) as u8
    }
}
