use crate::{PipelineError, ReaderConfig, ResultDisplay, STATUS_MODEL_ERROR, STATUS_READY};
use std::fmt;
use transit_camera::{Camera, CameraError, Frame};
use transit_image::{FrameConverter, TensorEncoder};
use transit_infer::{
    BBoxDecoder, BoundingBox, ClassDecoder, CtcDecoder, InferError, InferenceInvoker,
};
use transit_speak::{AnnouncementGate, Speaker};

/// What one frame decoded to.
#[derive(Debug)]
pub struct DecodedResult {
    pub label: String,
    /// Recognized plate text; empty when nothing was read.
    pub text: String,
    pub bbox: Option<BoundingBox>,
    /// The box rendered for display, empty without a box.
    pub coordinates: String,
    /// Why the plate head was unusable, if it was.
    pub ocr_error: Option<InferError>,
    /// Whether this result was sent to the speaker.
    pub announced: bool,
}

impl DecodedResult {
    /// `"<label>\n<text>"`, the string that is shown and spoken.
    pub fn composed(&self) -> String {
        format!("{}\n{}", self.label, self.text)
    }
}

/// Counters for one `Pipeline::run`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub decoded: usize,
    pub failed: usize,
    pub announced: usize,
    /// Frames decoded without plate text because the plate head was malformed.
    pub ocr_degraded: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames: {} decoded, {} failed, {} announced, {} without plate text",
            self.frames, self.decoded, self.failed, self.announced, self.ocr_degraded
        )
    }
}

/// Frame to announcement, one frame at a time.
pub struct Pipeline {
    converter: FrameConverter,
    encoder: TensorEncoder,
    invoker: Box<dyn InferenceInvoker>,
    classes: ClassDecoder,
    bbox: BBoxDecoder,
    ctc: CtcDecoder,
    gate: AnnouncementGate,
    speaker: Box<dyn Speaker>,
    display: Box<dyn ResultDisplay>,
    model_missing: bool,
}

impl Pipeline {
    /// A pipeline with the default input size, labels and alphabet.
    ///
    /// The display status is set right away from the invoker's availability.
    pub fn new(
        invoker: Box<dyn InferenceInvoker>,
        speaker: Box<dyn Speaker>,
        mut display: Box<dyn ResultDisplay>,
    ) -> Self {
        let model_missing = !invoker.is_available();
        display.set_status(if model_missing {
            STATUS_MODEL_ERROR
        } else {
            STATUS_READY
        });
        Self {
            converter: FrameConverter::default(),
            encoder: TensorEncoder::default(),
            invoker,
            classes: ClassDecoder::default(),
            bbox: BBoxDecoder,
            ctc: CtcDecoder::default(),
            gate: AnnouncementGate::new(),
            speaker,
            display,
            model_missing,
        }
    }

    pub fn from_config(
        config: &ReaderConfig,
        invoker: Box<dyn InferenceInvoker>,
        speaker: Box<dyn Speaker>,
        display: Box<dyn ResultDisplay>,
    ) -> Self {
        Self::new(invoker, speaker, display)
            .with_input_size(config.input_size)
            .with_normalization(config.mean, config.std)
            .with_class_decoder(ClassDecoder::new(config.class_labels()))
            .with_ctc_decoder(CtcDecoder::new(config.vocabulary()))
    }

    /// Resize frames to `size` x `size` and encode at that size.
    pub fn with_input_size(mut self, size: usize) -> Self {
        let encoder = TensorEncoder::new(size);
        self.encoder = encoder.with_normalization(self.encoder.mean(), self.encoder.std());
        self.converter = FrameConverter::new(size);
        self
    }

    pub fn with_normalization(mut self, mean: [f32; 3], std: [f32; 3]) -> Self {
        self.encoder = self.encoder.with_normalization(mean, std);
        self
    }

    pub fn with_class_decoder(mut self, classes: ClassDecoder) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_ctc_decoder(mut self, ctc: CtcDecoder) -> Self {
        self.ctc = ctc;
        self
    }

    /// Run one frame through the whole chain.
    ///
    /// The frame is released as soon as its pixels are converted. A malformed
    /// plate head still yields a result with empty text; every other failure
    /// drops the frame.
    pub fn process(&mut self, frame: Frame) -> Result<DecodedResult, PipelineError> {
        let raster = self.converter.convert(frame.raw());
        drop(frame);
        let input = self.encoder.encode(&raster?);

        let outputs = match self.invoker.infer(&input) {
            Ok(outputs) => outputs,
            Err(InferError::ModelUnavailable) => {
                self.model_unavailable();
                return Err(InferError::ModelUnavailable.into());
            }
            Err(e) => return Err(e.into()),
        };
        drop(input);
        self.model_available();

        let label = self.classes.decode(&outputs.logits).to_string();
        let coordinates = self.bbox.decode(&outputs.bbox);
        let bbox = BoundingBox::from_tensor(&outputs.bbox);
        let (text, ocr_error) = match self.ctc.decode(&outputs.char_probs) {
            Ok(text) => (text, None),
            Err(e) => {
                log::warn!("plate text unavailable: {e}");
                (String::new(), Some(e))
            }
        };

        let mut result = DecodedResult {
            label,
            text,
            bbox,
            coordinates,
            ocr_error,
            announced: false,
        };
        self.display.show(&result);

        let composed = result.composed();
        if self.gate.should_announce(&composed) {
            result.announced = true;
            if let Err(e) = self.speaker.speak(&composed) {
                log::warn!("announcement failed: {e}");
            }
        }
        Ok(result)
    }

    /// Process frames until the camera closes.
    ///
    /// Frames run one at a time on the blocking pool; per-frame failures are
    /// logged and counted, never fatal.
    pub async fn run<C: Camera>(self, camera: &mut C) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut pipeline = self;

        loop {
            let frame = match camera.recv().await {
                Ok(frame) => frame,
                Err(CameraError::Closed) => {
                    log::info!("camera closed");
                    break;
                }
                Err(e) => {
                    log::error!("{}", PipelineError::from(e));
                    break;
                }
            };
            summary.frames += 1;

            let worker = tokio::task::spawn_blocking(move || {
                let result = pipeline.process(frame);
                (pipeline, result)
            });
            let result = match worker.await {
                Ok((returned, result)) => {
                    pipeline = returned;
                    result
                }
                Err(e) => {
                    // the pipeline went down with the worker
                    log::error!("{}", PipelineError::Worker(e.to_string()));
                    summary.failed += 1;
                    break;
                }
            };

            match result {
                Ok(decoded) => {
                    summary.decoded += 1;
                    if decoded.announced {
                        summary.announced += 1;
                    }
                    if decoded.ocr_error.is_some() {
                        summary.ocr_degraded += 1;
                    }
                    log::debug!("frame {}: {}", summary.frames, decoded.composed().replace('\n', " / "));
                }
                Err(PipelineError::Infer(InferError::ModelUnavailable)) => {
                    summary.failed += 1;
                    log::debug!("frame {} skipped, no model", summary.frames);
                }
                Err(e) => {
                    summary.failed += 1;
                    log::warn!("frame {} dropped: {e}", summary.frames);
                }
            }
        }

        log::info!("{summary}");
        summary
    }

    fn model_unavailable(&mut self) {
        if !self.model_missing {
            log::warn!("model unavailable");
            self.display.set_status(STATUS_MODEL_ERROR);
            self.model_missing = true;
        }
    }

    fn model_available(&mut self) {
        if self.model_missing {
            log::info!("model available");
            self.display.set_status(STATUS_READY);
            self.model_missing = false;
        }
    }
}
