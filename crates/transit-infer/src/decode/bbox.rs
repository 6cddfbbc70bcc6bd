use std::fmt;
use transit_base::Tensor;

/// Plate corners in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    /// The first four values as `x1, y1, x2, y2`; extra values are ignored.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [x1, y1, x2, y2, ..] => Some(Self {
                x1: *x1,
                y1: *y1,
                x2: *x2,
                y2: *y2,
            }),
            _ => None,
        }
    }

    pub fn from_tensor(tensor: &Tensor<f32>) -> Option<Self> {
        Self::from_slice(&tensor.data)
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Координаты: ({:.2}, {:.2}) - ({:.2}, {:.2})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Renders the box head as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BBoxDecoder;

impl BBoxDecoder {
    /// Empty string when the tensor holds fewer than four values.
    pub fn decode(&self, bbox: &Tensor<f32>) -> String {
        BoundingBox::from_tensor(bbox).map_or_else(String::new, |b| b.to_string())
    }
}
