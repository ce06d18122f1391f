#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

#[macro_use]
mod report;

mod alignment;
mod arena;
mod convert;
mod convolution;
mod errors;
pub mod io;
mod pixels;
mod raster;
mod sampling;
mod threading;
mod view;

pub use alignment::Alignment;
pub use arena::Arena;
pub use convolution::{
    filter_horizontal, filter_horizontal_par, filter_separable, filter_separable_par,
    filter_vertical, filter_vertical_par, gaussian_blur, gaussian_blur_par, Convolver, Execution,
    Kernel,
};
pub use errors::{CodecError, RasterBufferError};
pub use pixels::{ChannelLayout, Component, ElementType, RasterType};
pub use raster::{Raster, MAX_DIMENSION};
pub use view::{ChannelView, ChannelViewMut};
