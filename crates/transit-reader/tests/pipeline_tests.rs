use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use transit_base::Tensor;
use transit_camera::{frame_channel, Camera, CameraError, Frame};
use transit_image::{ImageError, PixelFormat, RawFrame, Rotation};
use transit_infer::{
    ClassDecoder, ClassLabels, CtcDecoder, InferError, InferenceInvoker, ModelInvoker,
    ModelOutputs, Vocabulary,
};
use transit_reader::{
    DecodedResult, Pipeline, PipelineError, ResultDisplay, STATUS_MODEL_ERROR, STATUS_READY,
};
use transit_speak::{SpeakError, Speaker};

const SIZE: usize = 4;

type Log = Arc<Mutex<Vec<String>>>;

/// Returns scripted results in order, then repeats the last one.
struct ScriptedInvoker {
    script: VecDeque<Result<ModelOutputs, InferError>>,
    last: Option<ModelOutputs>,
    seen_shapes: Arc<Mutex<Vec<Vec<usize>>>>,
}

impl ScriptedInvoker {
    fn always(outputs: ModelOutputs) -> Self {
        Self::new(vec![Ok(outputs)])
    }

    fn new(script: Vec<Result<ModelOutputs, InferError>>) -> Self {
        Self {
            script: script.into(),
            last: None,
            seen_shapes: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl InferenceInvoker for ScriptedInvoker {
    fn infer(&mut self, input: &Tensor<f32>) -> Result<ModelOutputs, InferError> {
        self.seen_shapes.lock().unwrap().push(input.shape.clone());
        match self.script.pop_front() {
            Some(Ok(outputs)) => {
                self.last = Some(outputs.clone());
                Ok(outputs)
            }
            Some(Err(e)) => Err(e),
            None => self.last.clone().ok_or(InferError::ModelUnavailable),
        }
    }
}

struct RecordingSpeaker {
    spoken: Log,
    fail: bool,
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), SpeakError> {
        self.spoken.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(SpeakError::Spawn("no speech engine".to_string()));
        }
        Ok(())
    }
}

struct RecordingDisplay {
    shown: Log,
    statuses: Log,
}

impl ResultDisplay for RecordingDisplay {
    fn show(&mut self, result: &DecodedResult) {
        self.shown.lock().unwrap().push(result.composed());
    }

    fn set_status(&mut self, status: &str) {
        self.statuses.lock().unwrap().push(status.to_string());
    }
}

/// Hands out queued frames, then reports `Closed`.
struct QueueCamera {
    frames: VecDeque<Frame>,
}

impl Camera for QueueCamera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        self.frames.pop_front().ok_or(CameraError::Closed)
    }
}

struct Harness {
    spoken: Log,
    shown: Log,
    statuses: Log,
    released: Arc<AtomicUsize>,
}

impl Harness {
    fn new() -> Self {
        Self {
            spoken: Log::default(),
            shown: Log::default(),
            statuses: Log::default(),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn pipeline(&self, invoker: impl InferenceInvoker + 'static) -> Pipeline {
        self.pipeline_with_speaker(invoker, false)
    }

    fn pipeline_with_speaker(
        &self,
        invoker: impl InferenceInvoker + 'static,
        speaker_fails: bool,
    ) -> Pipeline {
        let speaker = RecordingSpeaker {
            spoken: Arc::clone(&self.spoken),
            fail: speaker_fails,
        };
        let display = RecordingDisplay {
            shown: Arc::clone(&self.shown),
            statuses: Arc::clone(&self.statuses),
        };
        Pipeline::new(Box::new(invoker), Box::new(speaker), Box::new(display))
            .with_input_size(SIZE)
            .with_class_decoder(ClassDecoder::new(ClassLabels::new(["Bus", "Tram"], "unknown")))
            .with_ctc_decoder(CtcDecoder::new(Vocabulary::new("AB")))
    }

    fn frame(&self) -> Frame {
        self.frame_with_format(PixelFormat::Yuv420)
    }

    fn frame_with_format(&self, format: PixelFormat) -> Frame {
        let mut raw = RawFrame::from_i420(SIZE, SIZE, Rotation::Deg90, &[128u8; 24]).unwrap();
        raw.format = format;
        let released = Arc::clone(&self.released);
        Frame::new(raw, move |_| {
            released.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }
}

/// Tram, plate "AB", box (1, 2) - (3.5, 4.25).
fn tram_ab() -> ModelOutputs {
    ModelOutputs {
        logits: Tensor::from_vec(vec![0.1, 0.9, 0.05]),
        bbox: Tensor::from_vec(vec![1.0, 2.0, 3.5, 4.25]),
        char_probs: Tensor::new(
            vec![4, 3],
            vec![
                0.9, 0.05, 0.05, //
                0.9, 0.05, 0.05, //
                0.0, 0.0, 1.0, //
                0.1, 0.8, 0.1,
            ],
        )
        .unwrap(),
    }
}

#[test]
fn test_process_decodes_all_heads() {
    let harness = Harness::new();
    let invoker = ScriptedInvoker::always(tram_ab());
    let seen = Arc::clone(&invoker.seen_shapes);
    let mut pipeline = harness.pipeline(invoker);

    let result = pipeline.process(harness.frame()).unwrap();

    assert_eq!(result.label, "Tram");
    assert_eq!(result.text, "AB");
    assert_eq!(result.composed(), "Tram\nAB");
    assert_eq!(result.coordinates, "Координаты: (1.00, 2.00) - (3.50, 4.25)");
    assert_eq!(result.bbox.unwrap().x2, 3.5);
    assert!(result.ocr_error.is_none());
    assert!(result.announced);

    assert_eq!(seen.lock().unwrap()[0], vec![3, SIZE, SIZE]);
    assert_eq!(harness.spoken(), vec!["Tram\nAB"]);
    assert_eq!(*harness.shown.lock().unwrap(), vec!["Tram\nAB"]);
    assert_eq!(harness.statuses(), vec![STATUS_READY]);
    assert_eq!(harness.released(), 1);
}

#[test]
fn test_repeated_result_is_announced_once() {
    let harness = Harness::new();
    let mut pipeline = harness.pipeline(ScriptedInvoker::always(tram_ab()));

    assert!(pipeline.process(harness.frame()).unwrap().announced);
    assert!(!pipeline.process(harness.frame()).unwrap().announced);
    assert!(!pipeline.process(harness.frame()).unwrap().announced);

    assert_eq!(harness.spoken(), vec!["Tram\nAB"]);
    assert_eq!(harness.shown.lock().unwrap().len(), 3);
    assert_eq!(harness.released(), 3);
}

#[test]
fn test_changed_result_is_announced_again() {
    let harness = Harness::new();
    let mut bus = tram_ab();
    bus.logits = Tensor::from_vec(vec![0.9, 0.1]);
    let invoker = ScriptedInvoker::new(vec![Ok(tram_ab()), Ok(bus), Ok(tram_ab())]);
    let mut pipeline = harness.pipeline(invoker);

    for _ in 0..3 {
        pipeline.process(harness.frame()).unwrap();
    }
    assert_eq!(harness.spoken(), vec!["Tram\nAB", "Bus\nAB", "Tram\nAB"]);
}

#[test]
fn test_malformed_plate_head_keeps_class() {
    let harness = Harness::new();
    let mut outputs = tram_ab();
    outputs.char_probs = Tensor::from_vec(vec![0.1, 0.8, 0.1]);
    let mut pipeline = harness.pipeline(ScriptedInvoker::always(outputs));

    let result = pipeline.process(harness.frame()).unwrap();

    assert_eq!(result.label, "Tram");
    assert_eq!(result.text, "");
    assert!(matches!(
        result.ocr_error,
        Some(InferError::MalformedShape {
            expected_rank: 2,
            ..
        })
    ));
    assert_eq!(harness.spoken(), vec!["Tram\n"]);
    assert_eq!(harness.released(), 1);
}

#[test]
fn test_unmapped_class_is_unknown() {
    let harness = Harness::new();
    let mut outputs = tram_ab();
    outputs.logits = Tensor::from_vec(vec![0.1, 0.2, 0.9]);
    let mut pipeline = harness.pipeline(ScriptedInvoker::always(outputs));

    assert_eq!(pipeline.process(harness.frame()).unwrap().label, "unknown");
}

#[test]
fn test_unsupported_frame_is_released() {
    let harness = Harness::new();
    let mut pipeline = harness.pipeline(ScriptedInvoker::always(tram_ab()));

    let result = pipeline.process(harness.frame_with_format(PixelFormat::Rgba8));

    assert!(matches!(
        result,
        Err(PipelineError::Image(ImageError::UnsupportedFormat(PixelFormat::Rgba8)))
    ));
    assert_eq!(harness.released(), 1);
    assert!(harness.spoken().is_empty());
}

#[test]
fn test_inference_failure_is_released() {
    let harness = Harness::new();
    let invoker = ScriptedInvoker::new(vec![Err(InferError::MalformedOutput {
        expected: 3,
        got: 2,
    })]);
    let mut pipeline = harness.pipeline(invoker);

    let result = pipeline.process(harness.frame());

    assert!(matches!(
        result,
        Err(PipelineError::Infer(InferError::MalformedOutput { got: 2, .. }))
    ));
    assert_eq!(harness.released(), 1);
    assert!(harness.spoken().is_empty());
    assert!(harness.shown.lock().unwrap().is_empty());
}

#[test]
fn test_unavailable_model_reports_status_once() {
    let harness = Harness::new();
    let mut pipeline = harness.pipeline(ModelInvoker::unavailable());
    assert_eq!(harness.statuses(), vec![STATUS_MODEL_ERROR]);

    for _ in 0..3 {
        let result = pipeline.process(harness.frame());
        assert!(matches!(
            result,
            Err(PipelineError::Infer(InferError::ModelUnavailable))
        ));
    }

    assert_eq!(harness.statuses(), vec![STATUS_MODEL_ERROR]);
    assert_eq!(harness.released(), 3);
}

#[test]
fn test_speaker_failure_is_not_fatal() {
    let harness = Harness::new();
    let mut pipeline = harness.pipeline_with_speaker(ScriptedInvoker::always(tram_ab()), true);

    let result = pipeline.process(harness.frame()).unwrap();
    assert!(result.announced);
    assert_eq!(harness.spoken(), vec!["Tram\nAB"]);
}

#[tokio::test]
async fn test_run_until_closed() {
    let harness = Harness::new();
    let pipeline = harness.pipeline(ScriptedInvoker::always(tram_ab()));
    let mut camera = QueueCamera {
        frames: (0..3).map(|_| harness.frame()).collect(),
    };

    let summary = pipeline.run(&mut camera).await;

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.decoded, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.announced, 1);
    assert_eq!(harness.released(), 3);
}

#[tokio::test]
async fn test_run_counts_failures_and_status_streaks() {
    let harness = Harness::new();
    let invoker = ScriptedInvoker::new(vec![
        Err(InferError::ModelUnavailable),
        Err(InferError::ModelUnavailable),
        Ok(tram_ab()),
        Err(InferError::ModelUnavailable),
        Err(InferError::Inference("device lost".to_string())),
    ]);
    let pipeline = harness.pipeline(invoker);
    let mut camera = QueueCamera {
        frames: (0..5).map(|_| harness.frame()).collect(),
    };

    let summary = pipeline.run(&mut camera).await;

    assert_eq!(summary.frames, 5);
    assert_eq!(summary.decoded, 1);
    assert_eq!(summary.failed, 4);
    assert_eq!(
        harness.statuses(),
        vec![STATUS_READY, STATUS_MODEL_ERROR, STATUS_READY, STATUS_MODEL_ERROR]
    );
    assert_eq!(harness.released(), 5);
}

#[tokio::test]
async fn test_run_degraded_plate_is_counted() {
    let harness = Harness::new();
    let mut outputs = tram_ab();
    outputs.char_probs = Tensor::new(vec![1, 2, 3], vec![0.0; 6]).unwrap();
    let pipeline = harness.pipeline(ScriptedInvoker::always(outputs));
    let mut camera = QueueCamera {
        frames: (0..2).map(|_| harness.frame()).collect(),
    };

    let summary = pipeline.run(&mut camera).await;
    assert_eq!(summary.decoded, 2);
    assert_eq!(summary.ocr_degraded, 2);
    assert_eq!(harness.spoken(), vec!["Tram\n"]);
}

#[tokio::test]
async fn test_run_from_latest_only_channel() {
    let harness = Harness::new();
    let pipeline = harness.pipeline(ScriptedInvoker::always(tram_ab()));
    let (sender, mut receiver) = frame_channel();

    // nothing consumes yet, so only the newest frame survives
    for _ in 0..4 {
        sender.send(harness.frame()).unwrap();
    }
    assert_eq!(harness.released(), 3);
    drop(sender);

    let summary = pipeline.run(&mut receiver).await;
    assert_eq!(summary.frames, 1);
    assert_eq!(summary.decoded, 1);
    assert_eq!(receiver.discarded(), 3);
    assert_eq!(harness.released(), 4);
}
