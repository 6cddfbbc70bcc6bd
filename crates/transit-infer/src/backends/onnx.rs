use crate::{Backend, Device, InferError, ModelSource, Session, SessionInput};
use ndarray::{ArrayViewD, IxDyn};
use ort::session::{Session as OrtSession, SessionInputValue};
use ort::value::TensorRef;
use std::borrow::Cow;
use transit_base::Tensor;

/// ONNX Runtime backend.
pub struct OnnxBackend;

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(
        &self,
        model: ModelSource,
        device: Device,
    ) -> Result<Box<dyn Session>, InferError> {
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::ModelLoad(format!("failed to create session builder: {e}"))
        })?;

        builder = match &device {
            Device::Cpu => {
                log::info!("onnx: using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                log::info!("onnx: using CUDA execution provider (device_id={device_id})");
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
            #[cfg(feature = "tensorrt")]
            Device::TensorRt { device_id, fp16 } => {
                use ort::execution_providers::TensorRTExecutionProvider;
                log::info!(
                    "onnx: using TensorRT execution provider (device_id={device_id}, fp16={fp16})"
                );
                let ep = TensorRTExecutionProvider::default()
                    .with_device_id(*device_id)
                    .with_fp16(*fp16);
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "tensorrt"))]
            Device::TensorRt { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from {}: {e}", path.display()))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let input_names: Vec<String> = session.inputs().iter().map(|i| i.name().to_string()).collect();
        let output_names: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();
        log::debug!("onnx: inputs {input_names:?}, outputs {output_names:?}");

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[SessionInput<'_>],
    ) -> Result<Vec<(String, Tensor<f32>)>, InferError> {
        for input in inputs {
            if !self.input_names.iter().any(|n| n == input.name) {
                return Err(InferError::InvalidInput {
                    name: input.name.to_string(),
                    expected_names: self.input_names.clone(),
                });
            }
        }

        let views = inputs
            .iter()
            .map(|input| shaped_view(input.shape, input.data))
            .collect::<Result<Vec<_>, _>>()?;
        let mut session_inputs: Vec<(Cow<'_, str>, SessionInputValue<'_>)> =
            Vec::with_capacity(inputs.len());
        for (input, view) in inputs.iter().zip(views) {
            let tensor_ref = TensorRef::from_array_view(view).map_err(|e| {
                InferError::Inference(format!("failed to wrap input '{}': {e}", input.name))
            })?;
            session_inputs.push((Cow::Borrowed(input.name), tensor_ref.into()));
        }

        let outputs = self
            .session
            .run(session_inputs)
            .map_err(|e| InferError::Inference(e.to_string()))?;

        let mut result = Vec::with_capacity(self.output_names.len());
        for output_name in &self.output_names {
            let array = outputs[output_name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| {
                    InferError::Inference(format!("output '{output_name}' is not f32: {e}"))
                })?;
            result.push((output_name.clone(), ndarray_to_tensor(array)?));
        }
        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

/// Borrow a `Tensor<f32>` as an ndarray view without copying.
pub fn tensor_view(tensor: &Tensor<f32>) -> Result<ArrayViewD<'_, f32>, InferError> {
    shaped_view(&tensor.shape, &tensor.data)
}

/// Borrow `data` under `shape` without copying.
pub fn shaped_view<'a>(shape: &[usize], data: &'a [f32]) -> Result<ArrayViewD<'a, f32>, InferError> {
    ArrayViewD::from_shape(IxDyn(shape), data).map_err(|e| {
        InferError::Inference(format!("tensor shape {shape:?} does not fit its data: {e}"))
    })
}

pub fn ndarray_to_tensor(array: ArrayViewD<'_, f32>) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
