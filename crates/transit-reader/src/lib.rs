//! Transport and plate reader: camera frames in, spoken results out.

pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;

pub use config::{ReaderConfig, MODEL_PATH_ENV, SOURCE_ENV};
pub use display::{ResultDisplay, StdoutDisplay, STATUS_MODEL_ERROR, STATUS_READY};
pub use error::{ConfigError, PipelineError};
pub use pipeline::{DecodedResult, Pipeline, RunSummary};
