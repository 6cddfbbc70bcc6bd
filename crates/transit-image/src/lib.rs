//! Frame conversion for the transit pipeline.
//!
//! Turns raw planar camera frames into upright RGB rasters of the model's
//! input size, and rasters into normalized channel-first tensors.
//!
//! Rasters use HWC layout `[height, width, 3]`; encoded tensors use CHW
//! layout `[3, height, width]`.

pub mod convert;
pub mod encode;
pub mod error;
pub mod frame;
pub mod pixelformat;
pub mod raster;

pub use convert::{rotate, yuv420_to_rgb, FrameConverter, MODEL_INPUT_SIZE};
pub use encode::{TensorEncoder, IMAGENET_MEAN, IMAGENET_STD};
pub use error::ImageError;
pub use frame::{Plane, RawFrame, Rotation};
pub use pixelformat::PixelFormat;
pub use raster::RgbRaster;
