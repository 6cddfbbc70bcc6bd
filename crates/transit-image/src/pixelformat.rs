use crate::ImageError;

/// Pixel layout tag carried by a raw frame.
///
/// Only `Yuv420` (three planes: luma, Cb, Cr, with per-plane strides) is
/// accepted by the converter; the other tags exist so capture sources can
/// report what they actually delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Yuv420,
    Nv21,
    Rgba8,
    Jpeg,
}

impl PixelFormat {
    pub fn ensure_supported(&self) -> Result<(), ImageError> {
        if *self != PixelFormat::Yuv420 {
            return Err(ImageError::UnsupportedFormat(*self));
        }
        Ok(())
    }
}

// BT.601 full-range YUV-to-RGB for a single pixel (fixed-point, shift 8)
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    [r, g, b]
}
