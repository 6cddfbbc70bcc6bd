use crate::PixelFormat;
use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    UnsupportedFormat(PixelFormat),
    InvalidFrame(String),
    InvalidRotation(i32),
    Tensor(transit_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::UnsupportedFormat(format) => {
                write!(f, "unsupported pixel format: {format:?} (expected {:?})", PixelFormat::Yuv420)
            }
            ImageError::InvalidFrame(msg) => write!(f, "invalid frame: {msg}"),
            ImageError::InvalidRotation(degrees) => {
                write!(f, "rotation must be a multiple of 90 degrees, got {degrees}")
            }
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<transit_base::TensorError> for ImageError {
    fn from(err: transit_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
