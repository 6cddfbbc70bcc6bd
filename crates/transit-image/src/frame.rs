use crate::{ImageError, PixelFormat};

/// Clockwise rotation needed to make a frame upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accepts any multiple of 90, including negative values and full turns.
    pub fn from_degrees(degrees: i32) -> Result<Self, ImageError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ImageError::InvalidRotation(degrees)),
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True when width and height trade places.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// One image plane with its memory layout.
///
/// Sample `(col, row)` of the plane lives at `row * row_stride + col * pixel_stride`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub data: Vec<u8>,
    pub row_stride: usize,
    pub pixel_stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            data,
            row_stride,
            pixel_stride,
        }
    }

    /// Bytes needed to address a `cols` x `rows` grid of samples.
    pub fn required_len(&self, cols: usize, rows: usize) -> usize {
        if cols == 0 || rows == 0 {
            return 0;
        }
        (rows - 1) * self.row_stride + (cols - 1) * self.pixel_stride + 1
    }

    #[inline]
    pub(crate) fn sample(&self, col: usize, row: usize) -> u8 {
        self.data[row * self.row_stride + col * self.pixel_stride]
    }
}

/// A camera frame as delivered by the capture source.
///
/// For `PixelFormat::Yuv420` the planes are, in order: luma (Y) at full
/// resolution, then Cb (U) and Cr (V) at half resolution in both axes,
/// rounded up.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub rotation: Rotation,
    pub planes: Vec<Plane>,
}

impl RawFrame {
    pub fn new(
        width: usize,
        height: usize,
        format: PixelFormat,
        rotation: Rotation,
        planes: Vec<Plane>,
    ) -> Self {
        Self {
            width,
            height,
            format,
            rotation,
            planes,
        }
    }

    /// Size in bytes of a contiguous I420 image.
    pub fn i420_len(width: usize, height: usize) -> usize {
        let (cw, ch) = chroma_size(width, height);
        width * height + 2 * cw * ch
    }

    /// Split a contiguous I420 buffer (Y, then U, then V) into three planes.
    pub fn from_i420(
        width: usize,
        height: usize,
        rotation: Rotation,
        data: &[u8],
    ) -> Result<Self, ImageError> {
        let expected = Self::i420_len(width, height);
        if data.len() < expected {
            return Err(ImageError::InvalidFrame(format!(
                "I420 buffer too short: got {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        let (cw, ch) = chroma_size(width, height);
        let luma_len = width * height;
        let chroma_len = cw * ch;
        let planes = vec![
            Plane::new(data[..luma_len].to_vec(), width, 1),
            Plane::new(data[luma_len..luma_len + chroma_len].to_vec(), cw, 1),
            Plane::new(data[luma_len + chroma_len..expected].to_vec(), cw, 1),
        ];
        Ok(Self::new(width, height, PixelFormat::Yuv420, rotation, planes))
    }

    /// Check that the planes cover the declared geometry.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::InvalidFrame(format!(
                "empty frame {}x{}",
                self.width, self.height
            )));
        }
        if self.planes.len() < 3 {
            return Err(ImageError::InvalidFrame(format!(
                "expected 3 planes, got {}",
                self.planes.len()
            )));
        }

        let (cw, ch) = chroma_size(self.width, self.height);
        let grids = [(self.width, self.height), (cw, ch), (cw, ch)];
        for (index, (plane, (cols, rows))) in self.planes.iter().zip(grids).enumerate() {
            if plane.pixel_stride == 0 || plane.row_stride < (cols - 1) * plane.pixel_stride + 1 {
                return Err(ImageError::InvalidFrame(format!(
                    "plane {index} has invalid strides (row {}, pixel {})",
                    plane.row_stride, plane.pixel_stride
                )));
            }
            let required = plane.required_len(cols, rows);
            if plane.data.len() < required {
                return Err(ImageError::InvalidFrame(format!(
                    "plane {index} too short: got {} bytes, expected at least {required}",
                    plane.data.len()
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn chroma_size(width: usize, height: usize) -> (usize, usize) {
    (width.div_ceil(2), height.div_ceil(2))
}
