//! PNG/JPEG/PNM container support through the `image` crate.

use std::path::Path;

use image::{DynamicImage, ExtendedColorType};

use crate::errors::CodecError;
use crate::pixels::RasterType;
use crate::raster::Raster;

pub(crate) fn load(path: &Path) -> Result<Raster, CodecError> {
    let dynamic = image::open(path)?;
    let raster = match dynamic {
        DynamicImage::ImageLuma8(img) => {
            let (width, height) = img.dimensions();
            Raster::from_vec(
                width as usize,
                height as usize,
                RasterType::U8Gray,
                img.into_raw(),
            )?
        }
        DynamicImage::ImageRgb8(img) => {
            let (width, height) = img.dimensions();
            Raster::from_vec(
                width as usize,
                height as usize,
                RasterType::U8Rgb,
                img.into_raw(),
            )?
        }
        other => {
            let img = other.to_rgb8();
            let (width, height) = img.dimensions();
            Raster::from_vec(
                width as usize,
                height as usize,
                RasterType::U8Rgb,
                img.into_raw(),
            )?
        }
    };
    Ok(raster)
}

pub(crate) fn save(path: &Path, raster: &Raster) -> Result<(), CodecError> {
    // containers store interleaved u8; other tags go through the
    // conversion graph on a copy
    let (target, color) = match raster.channel_count() {
        1 => (RasterType::U8Gray, ExtendedColorType::L8),
        _ => (RasterType::U8Rgb, ExtendedColorType::Rgb8),
    };
    let width = raster.width() as u32;
    let height = raster.height() as u32;
    if raster.raster_type() == target {
        image::save_buffer(path, raster.as_bytes(), width, height, color)?;
    } else {
        let mut converted = raster.clone();
        converted.convert(target);
        image::save_buffer(path, converted.as_bytes(), width, height, color)?;
    }
    Ok(())
}
