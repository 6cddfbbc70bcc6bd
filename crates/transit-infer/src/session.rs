use crate::InferError;
use transit_base::Tensor;

/// One named model input, borrowed.
///
/// `shape` may differ from the shape of the tensor the data came from (a
/// leading batch axis, say) as long as the element count matches.
#[derive(Debug, Clone, Copy)]
pub struct SessionInput<'a> {
    pub name: &'a str,
    pub shape: &'a [usize],
    pub data: &'a [f32],
}

impl<'a> SessionInput<'a> {
    pub fn new(name: &'a str, tensor: &'a Tensor<f32>) -> Self {
        Self {
            name,
            shape: &tensor.shape,
            data: &tensor.data,
        }
    }

    pub fn with_shape(mut self, shape: &'a [usize]) -> Self {
        self.shape = shape;
        self
    }
}

/// A loaded model.
///
/// `run` returns every output the model declares, in declaration order.
pub trait Session: Send {
    fn run(&mut self, inputs: &[SessionInput<'_>])
    -> Result<Vec<(String, Tensor<f32>)>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
