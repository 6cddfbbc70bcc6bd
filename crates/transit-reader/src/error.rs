use std::fmt;
use transit_camera::CameraError;
use transit_image::ImageError;
use transit_infer::InferError;

#[derive(Debug)]
pub enum PipelineError {
    Image(ImageError),
    Infer(InferError),
    Camera(CameraError),
    /// The blocking worker running a frame panicked or was cancelled.
    Worker(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Image(err) => write!(f, "image error: {err}"),
            PipelineError::Infer(err) => write!(f, "inference error: {err}"),
            PipelineError::Camera(err) => write!(f, "camera error: {err}"),
            PipelineError::Worker(msg) => write!(f, "worker error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<ImageError> for PipelineError {
    fn from(err: ImageError) -> Self {
        PipelineError::Image(err)
    }
}

impl From<InferError> for PipelineError {
    fn from(err: InferError) -> Self {
        PipelineError::Infer(err)
    }
}

impl From<CameraError> for PipelineError {
    fn from(err: CameraError) -> Self {
        PipelineError::Camera(err)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config io error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
