use transit_base::{log, log_fatal};
use transit_camera::YuvFileCamera;
use transit_infer::{ModelInvoker, ModelSource, OnnxBackend};
use transit_reader::{Pipeline, ReaderConfig, StdoutDisplay};
use transit_speak::{CommandSpeaker, LogSpeaker, Speaker};

#[tokio::main]
async fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => ReaderConfig::load(&path),
        None => Ok(ReaderConfig::default()),
    };
    let config = match config {
        Ok(config) => config.with_env_overrides(),
        Err(e) => {
            transit_base::init_stdout_logger();
            log_fatal!("{e}");
        }
    };

    match &config.log_dir {
        Some(dir) => {
            if let Err(e) = transit_base::init_file_logger(dir) {
                transit_base::init_stdout_logger();
                log::warn!("cannot log to {}: {e}, logging to stdout", dir.display());
            }
        }
        None => transit_base::init_stdout_logger(),
    }

    if let Err(e) = config.validate() {
        log_fatal!("{e}");
    }
    let device = match config.device() {
        Ok(device) => device,
        Err(e) => log_fatal!("{e}"),
    };
    let camera_config = match config.camera_config() {
        Ok(camera_config) => camera_config,
        Err(e) => log_fatal!("{e}"),
    };

    log::info!("transit reader starting");
    let invoker = ModelInvoker::load_or_unavailable(
        ModelSource::File(config.model_path.clone()),
        &OnnxBackend,
        device,
    )
    .with_batched(config.batched_input);

    let speaker: Box<dyn Speaker> = match &config.speech_command {
        Some(command) => match CommandSpeaker::from_command_line(command) {
            Ok(speaker) => Box::new(speaker),
            Err(e) => log_fatal!("{e}"),
        },
        None => Box::new(LogSpeaker),
    };

    let pipeline = Pipeline::from_config(
        &config,
        Box::new(invoker),
        speaker,
        Box::new(StdoutDisplay::default()),
    );

    let mut camera = match YuvFileCamera::new(camera_config) {
        Ok(camera) => camera,
        Err(e) => log_fatal!("cannot open {}: {e}", config.source.display()),
    };

    let summary = pipeline.run(&mut camera).await;
    log::info!("done, {summary}");
}
