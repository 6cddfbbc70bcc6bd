use transit_image::Rotation;

/// Configuration for a frame source.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    device: String,
    width: usize,
    height: usize,
    fps: u32,
    rotation: Rotation,
    buffer_count: usize,
    looping: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "frames.yuv".to_string(),
            width: 640,
            height: 480,
            fps: 30,
            rotation: Rotation::Deg0,
            buffer_count: 4,
            looping: false,
        }
    }
}

impl CameraConfig {
    /// Set the source path (a raw I420 file for `YuvFileCamera`).
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Set the frame width in pixels.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the frame height in pixels.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set the delivery rate. Zero replays without pacing.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the rotation hint attached to every frame.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set how many frames may be checked out at once.
    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    /// Restart from the first frame at end of input.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    pub fn looping(&self) -> bool {
        self.looping
    }
}
