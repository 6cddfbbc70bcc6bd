use crate::{frame_channel, Camera, CameraConfig, CameraError, Frame, FrameReceiver, FrameSender};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use transit_image::{Plane, PixelFormat, RawFrame, Rotation};

/// Replays a file of back-to-back I420 frames as a camera.
///
/// The capture thread starts on the first `recv`. Frame buffers are recycled:
/// a dropped `Frame` hands its planes back to the thread, and at most
/// `buffer_count` frames are ever checked out. When all buffers are busy the
/// frame read from the file is skipped, the way a sensor drops frames when
/// the consumer stalls.
pub struct YuvFileCamera {
    config: CameraConfig,
    file: Option<File>,
    frame_count: usize,
    receiver: Option<FrameReceiver>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for YuvFileCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YuvFileCamera")
            .field("config", &self.config)
            .field("frame_count", &self.frame_count)
            .field("receiver", &self.receiver.is_some())
            .field("thread_handle", &self.thread_handle.is_some())
            .finish()
    }
}

impl Camera for YuvFileCamera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("receiver not initialized".to_string()))?;
        receiver.recv().await
    }
}

impl Drop for YuvFileCamera {
    fn drop(&mut self) {
        // closing the receiver makes the next send fail, which ends the thread
        drop(self.receiver.take());

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl YuvFileCamera {
    /// Open the file named by `config.device()`.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the file cannot be opened, the
    /// geometry or buffer count is zero, or the file holds less than one
    /// whole frame.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        if config.width() == 0 || config.height() == 0 {
            return Err(CameraError::Device(format!(
                "invalid frame size {}x{}",
                config.width(),
                config.height()
            )));
        }
        if config.buffer_count() == 0 {
            return Err(CameraError::Device("buffer count must be at least 1".to_string()));
        }

        let file = File::open(config.device())?;
        let file_len = file.metadata()?.len() as usize;
        let frame_len = RawFrame::i420_len(config.width(), config.height());
        let frame_count = file_len / frame_len;
        if frame_count == 0 {
            return Err(CameraError::Device(format!(
                "{} holds {file_len} bytes, less than one {}x{} frame ({frame_len} bytes)",
                config.device(),
                config.width(),
                config.height()
            )));
        }
        if file_len % frame_len != 0 {
            log::warn!(
                "{} has {} trailing bytes that do not form a whole frame",
                config.device(),
                file_len % frame_len
            );
        }

        log::info!(
            "replaying {} ({frame_count} frames of {}x{} at {} fps)",
            config.device(),
            config.width(),
            config.height(),
            config.fps()
        );

        Ok(Self {
            config,
            file: Some(file),
            frame_count,
            receiver: None,
            thread_handle: None,
        })
    }

    /// Number of whole frames in the file.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Frames replaced in the delivery slot before the consumer took them.
    pub fn discarded(&self) -> usize {
        self.receiver.as_ref().map_or(0, FrameReceiver::discarded)
    }

    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let file = self
            .file
            .take()
            .ok_or_else(|| CameraError::Device("source already consumed".to_string()))?;

        let (sender, receiver) = frame_channel();
        let config = self.config.clone();
        let handle = thread::Builder::new()
            .name("yuv-replay".to_string())
            .spawn(move || {
                if let Err(e) = Self::capture_loop(file, &config, sender) {
                    log::error!("replay thread error: {e}");
                }
            })?;

        self.receiver = Some(receiver);
        self.thread_handle = Some(handle);
        Ok(())
    }

    fn capture_loop(file: File, config: &CameraConfig, sender: FrameSender) -> Result<(), CameraError> {
        let width = config.width();
        let height = config.height();
        let frame_len = RawFrame::i420_len(width, height) as i64;
        let period = (config.fps() > 0).then(|| Duration::from_secs_f64(1.0 / config.fps() as f64));

        let mut reader = BufReader::new(file);
        let (return_tx, return_rx) = mpsc::channel::<RawFrame>();
        let mut free: Vec<RawFrame> = Vec::with_capacity(config.buffer_count());
        let mut allocated = 0;
        let mut skipped = 0usize;
        let mut next_deadline = Instant::now();

        while !sender.is_closed() {
            free.extend(return_rx.try_iter());

            let buffer = match free.pop() {
                Some(raw) => Some(raw),
                None if allocated < config.buffer_count() => {
                    allocated += 1;
                    Some(blank_frame(width, height, config.rotation()))
                }
                None => None,
            };

            let delivered = match buffer {
                Some(mut raw) => match read_frame(&mut reader, &mut raw) {
                    Ok(true) => {
                        let tx = return_tx.clone();
                        // a failed send just means the thread is gone
                        let frame = Frame::new(raw, move |raw| {
                            let _ = tx.send(raw);
                        });
                        if sender.send(frame).is_err() {
                            break;
                        }
                        true
                    }
                    Ok(false) => {
                        free.push(raw);
                        false
                    }
                    Err(e) => return Err(CameraError::Stream(e.to_string())),
                },
                None => {
                    skipped += 1;
                    log::debug!("all {allocated} buffers checked out, skipping frame ({skipped} total)");
                    reader.seek_relative(frame_len)?;
                    // seeking past the end is not an error, the next read sees it
                    true
                }
            };

            if !delivered {
                if config.looping() {
                    log::debug!("end of {}, rewinding", config.device());
                    reader.rewind()?;
                    continue;
                }
                log::info!("end of {}", config.device());
                break;
            }

            if let Some(period) = period {
                next_deadline += period;
                let now = Instant::now();
                if next_deadline > now {
                    thread::sleep(next_deadline - now);
                } else {
                    next_deadline = now;
                }
            }
        }
        Ok(())
    }
}

fn blank_frame(width: usize, height: usize, rotation: Rotation) -> RawFrame {
    let (cw, ch) = (width.div_ceil(2), height.div_ceil(2));
    RawFrame::new(
        width,
        height,
        PixelFormat::Yuv420,
        rotation,
        vec![
            Plane::new(vec![0; width * height], width, 1),
            Plane::new(vec![0; cw * ch], cw, 1),
            Plane::new(vec![0; cw * ch], cw, 1),
        ],
    )
}

/// Fill the three planes of `raw` from the reader.
///
/// Returns `Ok(false)` at end of input, including a truncated last frame.
fn read_frame(reader: &mut impl Read, raw: &mut RawFrame) -> io::Result<bool> {
    for plane in raw.planes.iter_mut() {
        match reader.read_exact(&mut plane.data) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(false),
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}
