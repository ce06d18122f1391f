//! Codec boundary: rasters enter and leave the crate through
//! extension-dispatched load/save.
//!
//! The tagged raw format (`.srb`) is always available; PNG, JPEG and PNM
//! containers are handled by the `image` crate behind the `image`
//! feature.

mod raw;

#[cfg(feature = "image")]
mod image_crate;

use std::path::Path;

use crate::errors::CodecError;
use crate::raster::Raster;

/// Load a raster from `path`; the codec is picked by file extension.
pub fn load(path: impl AsRef<Path>) -> Result<Raster, CodecError> {
    let path = path.as_ref();
    log::debug!("loading raster from {}", path.display());
    match extension(path)?.as_str() {
        "srb" => raw::load(path),
        #[cfg(feature = "image")]
        "png" | "jpg" | "jpeg" | "pnm" | "pgm" | "ppm" | "pbm" => image_crate::load(path),
        ext => Err(CodecError::UnknownExtension(ext.to_string())),
    }
}

/// Save a raster to `path`; the codec is picked by file extension.
pub fn save(path: impl AsRef<Path>, raster: &Raster) -> Result<(), CodecError> {
    let path = path.as_ref();
    if raster.is_empty() {
        fatal!("cannot save an empty raster");
    }
    log::debug!(
        "saving {}x{} {:?} raster to {}",
        raster.width(),
        raster.height(),
        raster.raster_type(),
        path.display()
    );
    match extension(path)?.as_str() {
        "srb" => raw::save(path, raster),
        #[cfg(feature = "image")]
        "png" | "jpg" | "jpeg" | "pnm" | "pgm" | "ppm" | "pbm" => image_crate::save(path, raster),
        ext => Err(CodecError::UnknownExtension(ext.to_string())),
    }
}

fn extension(path: &Path) -> Result<String, CodecError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| CodecError::UnknownExtension(path.display().to_string()))
}
