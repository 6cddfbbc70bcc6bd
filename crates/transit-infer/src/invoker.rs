use crate::{Backend, Device, InferError, ModelSource, Session, SessionInput};
use transit_base::Tensor;

/// Number of heads the transport model produces.
pub const MODEL_OUTPUT_COUNT: usize = 3;

/// The three heads of one model run.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutputs {
    /// Class scores, `(num_classes,)`.
    pub logits: Tensor<f32>,
    /// Plate box `x1, y1, x2, y2`, `(4,)`.
    pub bbox: Tensor<f32>,
    /// Per-step character scores, `(seq_len, vocab_size)`.
    pub char_probs: Tensor<f32>,
}

/// Runs the model on one encoded frame.
pub trait InferenceInvoker: Send {
    /// Run the model on `input`, a `[3, H, W]` tensor. The input is only borrowed.
    fn infer(&mut self, input: &Tensor<f32>) -> Result<ModelOutputs, InferError>;

    /// Whether a model is loaded at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// `InferenceInvoker` over a `Session`.
///
/// With `batched` on (the default) the input is handed over as `[1, 3, H, W]`
/// without copying it, and an output one rank above its head's rank loses a
/// leading axis of 1. Outputs already at their head's rank pass through, so a
/// single-step `(1, vocab_size)` character head stays two-dimensional.
pub struct ModelInvoker {
    session: Option<Box<dyn Session>>,
    batched: bool,
}

impl std::fmt::Debug for ModelInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelInvoker")
            .field("session", &self.session.as_ref().map(|s| s.input_names().to_vec()))
            .field("batched", &self.batched)
            .finish()
    }
}

impl ModelInvoker {
    pub fn new(session: Box<dyn Session>) -> Self {
        Self {
            session: Some(session),
            batched: true,
        }
    }

    /// An invoker with no model; every call fails with `ModelUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            session: None,
            batched: true,
        }
    }

    /// Load `source` through `backend`.
    pub fn load(
        source: ModelSource,
        backend: &dyn Backend,
        device: Device,
    ) -> Result<Self, InferError> {
        log::info!("loading model {source} with {} on {device}", backend.name());
        let session = backend.load_model(source, device)?;
        Ok(Self::new(session))
    }

    /// Like `load`, but a failure is logged and yields an unavailable invoker.
    pub fn load_or_unavailable(source: ModelSource, backend: &dyn Backend, device: Device) -> Self {
        match Self::load(source, backend, device) {
            Ok(invoker) => invoker,
            Err(e) => {
                log::error!("model failed to load, running without it: {e}");
                Self::unavailable()
            }
        }
    }

    pub fn with_batched(mut self, batched: bool) -> Self {
        self.batched = batched;
        self
    }

    pub fn batched(&self) -> bool {
        self.batched
    }
}

impl InferenceInvoker for ModelInvoker {
    fn infer(&mut self, input: &Tensor<f32>) -> Result<ModelOutputs, InferError> {
        let session = self.session.as_mut().ok_or(InferError::ModelUnavailable)?;
        let input_name = session
            .input_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::Inference("model declares no inputs".to_string()))?;

        let outputs = if self.batched {
            let mut shape = Vec::with_capacity(input.ndim() + 1);
            shape.push(1);
            shape.extend_from_slice(&input.shape);
            session.run(&[SessionInput::new(&input_name, input).with_shape(&shape)])?
        } else {
            session.run(&[SessionInput::new(&input_name, input)])?
        };

        let heads: [(String, Tensor<f32>); MODEL_OUTPUT_COUNT] =
            outputs.try_into().map_err(|outputs: Vec<_>| InferError::MalformedOutput {
                expected: MODEL_OUTPUT_COUNT,
                got: outputs.len(),
            })?;
        let [(_, logits), (_, bbox), (_, char_probs)] = heads;
        let batched = self.batched;
        let unbatch = |tensor: Tensor<f32>, rank: usize| if batched { strip_batch(tensor, rank) } else { tensor };

        Ok(ModelOutputs {
            logits: unbatch(logits, 1),
            bbox: unbatch(bbox, 1),
            char_probs: unbatch(char_probs, 2),
        })
    }

    fn is_available(&self) -> bool {
        self.session.is_some()
    }
}

/// Drop a leading axis of 1 from a tensor one rank above `rank`.
fn strip_batch(mut tensor: Tensor<f32>, rank: usize) -> Tensor<f32> {
    if tensor.ndim() == rank + 1 && tensor.shape[0] == 1 {
        tensor.shape.remove(0);
    }
    tensor
}
