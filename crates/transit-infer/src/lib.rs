//! Model invocation and output decoding.
//!
//! A `ModelInvoker` runs a three-head model (class logits, bounding box,
//! character probabilities) through a `Session`; the decoders in `decode`
//! turn each head into text.

pub mod backend;
pub mod backends;
pub mod decode;
pub mod device;
pub mod error;
pub mod invoker;
pub mod modelsource;
pub mod session;

pub use backend::Backend;
pub use decode::{
    argmax, BBoxDecoder, BoundingBox, ClassDecoder, ClassLabels, CtcDecoder, Vocabulary,
    DEFAULT_ALPHABET, DEFAULT_LABELS, DEFAULT_UNKNOWN_LABEL,
};
pub use device::{Device, ParseDeviceError};
pub use error::InferError;
pub use invoker::{InferenceInvoker, ModelInvoker, ModelOutputs, MODEL_OUTPUT_COUNT};
pub use modelsource::ModelSource;
pub use session::{Session, SessionInput};

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;
