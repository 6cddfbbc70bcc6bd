use crate::pixelformat::yuv_to_rgb;
use crate::{ImageError, RawFrame, RgbRaster, Rotation};
use image::imageops::{self, FilterType};

/// Side length of the square raster the recognition model expects.
pub const MODEL_INPUT_SIZE: usize = 512;

/// Converts planar YUV 4:2:0 camera frames into upright square RGB rasters.
#[derive(Debug, Clone)]
pub struct FrameConverter {
    size: usize,
}

impl Default for FrameConverter {
    fn default() -> Self {
        Self::new(MODEL_INPUT_SIZE)
    }
}

impl FrameConverter {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Decode, rotate upright and resize a frame to `size` x `size`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::UnsupportedFormat` unless the frame is `Yuv420`,
    /// and `ImageError::InvalidFrame` if its planes do not cover its geometry.
    pub fn convert(&self, frame: &RawFrame) -> Result<RgbRaster, ImageError> {
        let rgb = yuv420_to_rgb(frame)?;
        let upright = rotate(rgb, frame.rotation)?;

        if upright.width() == self.size && upright.height() == self.size {
            return Ok(upright);
        }

        // Triangle is bilinear; the model was trained on smoothly resized input.
        let resized = imageops::resize(
            &upright.into_image()?,
            self.size as u32,
            self.size as u32,
            FilterType::Triangle,
        );
        RgbRaster::from_image(resized)
    }
}

/// BT.601 conversion of a `Yuv420` frame at its native size and orientation.
///
/// Honors each plane's row and pixel stride, so both fully planar and
/// semi-planar (interleaved chroma, pixel stride 2) layouts work.
pub fn yuv420_to_rgb(frame: &RawFrame) -> Result<RgbRaster, ImageError> {
    frame.format.ensure_supported()?;
    frame.validate()?;

    let (width, height) = (frame.width, frame.height);
    let luma = &frame.planes[0];
    let cb = &frame.planes[1];
    let cr = &frame.planes[2];

    let mut rgb = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        for col in 0..width {
            let y = luma.sample(col, row);
            let u = cb.sample(col / 2, row / 2);
            let v = cr.sample(col / 2, row / 2);
            rgb.extend_from_slice(&yuv_to_rgb(y, u, v));
        }
    }

    RgbRaster::new(width, height, rgb)
}

/// Rotate a raster clockwise by whole quadrants.
pub fn rotate(raster: RgbRaster, rotation: Rotation) -> Result<RgbRaster, ImageError> {
    match rotation {
        Rotation::Deg0 => Ok(raster),
        Rotation::Deg90 => RgbRaster::from_image(imageops::rotate90(&raster.into_image()?)),
        Rotation::Deg180 => RgbRaster::from_image(imageops::rotate180(&raster.into_image()?)),
        Rotation::Deg270 => RgbRaster::from_image(imageops::rotate270(&raster.into_image()?)),
    }
}
