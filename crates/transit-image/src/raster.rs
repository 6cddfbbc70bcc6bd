use crate::ImageError;
use image::RgbImage;
use transit_base::Tensor;

/// Upright interleaved RGB image, stored as a `Tensor<u8>` with shape `[height, width, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbRaster {
    tensor: Tensor<u8>,
}

impl RgbRaster {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        Ok(Self {
            tensor: Tensor::new(vec![height, width, 3], data)?,
        })
    }

    /// Wrap an HWC tensor; the last dimension must be 3.
    pub fn from_tensor(tensor: Tensor<u8>) -> Result<Self, ImageError> {
        if tensor.ndim() != 3 || tensor.shape[2] != 3 {
            return Err(ImageError::InvalidFrame(format!(
                "expected [H, W, 3] raster, got {:?}",
                tensor.shape
            )));
        }
        Ok(Self { tensor })
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn data(&self) -> &[u8] {
        &self.tensor.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width() + x) * 3;
        [self.tensor.data[i], self.tensor.data[i + 1], self.tensor.data[i + 2]]
    }

    pub fn as_tensor(&self) -> &Tensor<u8> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.tensor
    }

    pub(crate) fn from_image(image: RgbImage) -> Result<Self, ImageError> {
        let (width, height) = image.dimensions();
        Self::new(width as usize, height as usize, image.into_raw())
    }

    pub(crate) fn into_image(self) -> Result<RgbImage, ImageError> {
        let (width, height) = (self.width() as u32, self.height() as u32);
        RgbImage::from_raw(width, height, self.tensor.data).ok_or_else(|| {
            ImageError::InvalidFrame(format!("raster buffer does not match {width}x{height}"))
        })
    }
}
