use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use transit_camera::CameraConfig;
use transit_image::{IMAGENET_MEAN, IMAGENET_STD, MODEL_INPUT_SIZE, Rotation};
use transit_infer::{
    ClassLabels, Device, Vocabulary, DEFAULT_ALPHABET, DEFAULT_LABELS, DEFAULT_UNKNOWN_LABEL,
};

/// Overrides `model_path`.
pub const MODEL_PATH_ENV: &str = "TRANSIT_MODEL_PATH";
/// Overrides `source`.
pub const SOURCE_ENV: &str = "TRANSIT_SOURCE";

/// Reader settings, loaded from JSON. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub model_path: PathBuf,
    /// `cpu`, `cuda:<id>` or `tensorrt:<id>[:fp16]`.
    pub device: String,
    /// Add and strip a batch axis of 1 around the model call.
    pub batched_input: bool,
    pub input_size: usize,
    pub labels: Vec<String>,
    pub unknown_label: String,
    pub alphabet: String,
    pub mean: [f32; 3],
    pub std: [f32; 3],
    /// Raw I420 file to replay.
    pub source: PathBuf,
    pub frame_width: usize,
    pub frame_height: usize,
    pub fps: u32,
    /// Clockwise degrees to make frames upright.
    pub rotation: i32,
    pub loop_source: bool,
    pub buffer_count: usize,
    /// Log to daily files here instead of stdout.
    pub log_dir: Option<PathBuf>,
    /// External TTS command line, e.g. `espeak-ng -v ru`. Unset logs utterances.
    pub speech_command: Option<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/transport_model.onnx"),
            device: "cpu".to_string(),
            batched_input: true,
            input_size: MODEL_INPUT_SIZE,
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
            alphabet: DEFAULT_ALPHABET.to_string(),
            mean: IMAGENET_MEAN,
            std: IMAGENET_STD,
            source: PathBuf::from("frames.yuv"),
            frame_width: 640,
            frame_height: 480,
            fps: 30,
            rotation: 0,
            loop_source: false,
            buffer_count: 4,
            log_dir: None,
            speech_command: None,
        }
    }
}

impl ReaderConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `TRANSIT_MODEL_PATH` and `TRANSIT_SOURCE` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(MODEL_PATH_ENV).filter(|v| !v.is_empty()) {
            self.model_path = PathBuf::from(path);
        }
        if let Some(source) = lookup(SOURCE_ENV).filter(|v| !v.is_empty()) {
            self.source = PathBuf::from(source);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::Invalid("alphabet must not be empty".to_string()));
        }
        if self.input_size == 0 {
            return Err(ConfigError::Invalid("input_size must be positive".to_string()));
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame size must be positive, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if self.buffer_count == 0 {
            return Err(ConfigError::Invalid("buffer_count must be at least 1".to_string()));
        }
        if let Some(std) = self.std.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "std values must be positive, got {std}"
            )));
        }
        self.rotation()?;
        self.device()?;
        Ok(())
    }

    pub fn rotation(&self) -> Result<Rotation, ConfigError> {
        Rotation::from_degrees(self.rotation).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn device(&self) -> Result<Device, ConfigError> {
        self.device
            .parse()
            .map_err(|e: transit_infer::ParseDeviceError| ConfigError::Invalid(e.to_string()))
    }

    pub fn class_labels(&self) -> ClassLabels {
        ClassLabels::new(self.labels.iter().cloned(), self.unknown_label.clone())
    }

    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(&self.alphabet)
    }

    pub fn camera_config(&self) -> Result<CameraConfig, ConfigError> {
        Ok(CameraConfig::default()
            .with_device(self.source.to_string_lossy())
            .with_width(self.frame_width)
            .with_height(self.frame_height)
            .with_fps(self.fps)
            .with_rotation(self.rotation()?)
            .with_buffer_count(self.buffer_count)
            .with_looping(self.loop_source))
    }
}
