use thiserror::Error;

/// Errors of the recoverable buffer-adoption boundary
/// ([`Raster::from_vec`](crate::Raster::from_vec) and
/// [`Raster::probe`](crate::Raster::probe)).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterBufferError {
    #[error("size of the buffer does not match the raster dimensions")]
    InvalidBufferSize,
    #[error("raster dimensions must be non-zero")]
    ZeroDimension,
    #[error("raster dimension exceeds the supported maximum")]
    DimensionTooLarge,
}

/// Errors of the codec boundary ([`io::load`](crate::io::load) and
/// [`io::save`](crate::io::save)).
#[derive(Error, Debug)]
pub enum CodecError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no codec is registered for the '{0}' extension")]
    UnknownExtension(String),
    #[error("stream is corrupted: bad {0} sentinel")]
    CorruptStream(&'static str),
    #[error("stream header carries an unknown raster type code {0}")]
    UnknownTypeTag(i32),
    #[error("stream header carries invalid dimensions {0}x{1}")]
    InvalidHeader(i32, i32),
    #[error(transparent)]
    Buffer(#[from] RasterBufferError),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
