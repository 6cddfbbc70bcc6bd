use crate::{MODEL_INPUT_SIZE, RgbRaster};
use transit_base::Tensor;

/// Per-channel RGB mean used by torchvision-trained models.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// Per-channel RGB standard deviation used by torchvision-trained models.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Maps an RGB raster to a normalized `[3, H, W]` float tensor.
///
/// Each value is `(raw / 255 - mean[c]) / std[c]`; nothing is clamped.
#[derive(Debug, Clone)]
pub struct TensorEncoder {
    size: usize,
    mean: [f32; 3],
    std: [f32; 3],
}

impl Default for TensorEncoder {
    fn default() -> Self {
        Self::new(MODEL_INPUT_SIZE)
    }
}

impl TensorEncoder {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            mean: IMAGENET_MEAN,
            std: IMAGENET_STD,
        }
    }

    pub fn with_normalization(mut self, mean: [f32; 3], std: [f32; 3]) -> Self {
        self.mean = mean;
        self.std = std;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mean(&self) -> [f32; 3] {
        self.mean
    }

    pub fn std(&self) -> [f32; 3] {
        self.std
    }

    /// Encode `raster` channel-first.
    ///
    /// # Panics
    ///
    /// Panics if the raster is not `size` x `size`; callers get rasters from a
    /// `FrameConverter` configured with the same size.
    pub fn encode(&self, raster: &RgbRaster) -> Tensor<f32> {
        assert!(
            raster.width() == self.size && raster.height() == self.size,
            "raster is {}x{}, encoder expects {}x{}",
            raster.width(),
            raster.height(),
            self.size,
            self.size
        );

        let plane = self.size * self.size;
        let mut data = vec![0.0f32; 3 * plane];
        for (i, pixel) in raster.data().chunks_exact(3).enumerate() {
            for c in 0..3 {
                data[c * plane + i] = (pixel[c] as f32 / 255.0 - self.mean[c]) / self.std[c];
            }
        }

        Tensor {
            shape: vec![3, self.size, self.size],
            data,
        }
    }
}
