use crate::Device;
use std::fmt;
use transit_base::TensorError;

#[derive(Debug)]
pub enum InferError {
    /// No model is loaded.
    ModelUnavailable,
    ModelLoad(String),
    /// The runtime failed while executing the model.
    Inference(String),
    /// The model produced the wrong number of outputs.
    MalformedOutput { expected: usize, got: usize },
    /// A tensor does not have the rank a decoder needs.
    MalformedShape { expected_rank: usize, shape: Vec<usize> },
    InvalidInput { name: String, expected_names: Vec<String> },
    UnsupportedDevice(Device),
    Tensor(TensorError),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelUnavailable => write!(f, "model unavailable"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Inference(msg) => write!(f, "inference error: {msg}"),
            InferError::MalformedOutput { expected, got } => {
                write!(f, "malformed output: expected {expected} outputs, got {got}")
            }
            InferError::MalformedShape {
                expected_rank,
                shape,
            } => write!(
                f,
                "malformed shape: expected rank {expected_rank}, got {shape:?}"
            ),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', model expects one of {expected_names:?}"
            ),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Tensor(err)
    }
}
