use std::fmt;
use transit_image::RawFrame;

type Release = Box<dyn FnOnce(RawFrame) + Send>;

/// A `RawFrame` checked out from a capture source.
///
/// The release callback runs exactly once, when the frame is dropped,
/// whichever way the holder exits.
pub struct Frame {
    raw: Option<RawFrame>,
    release: Option<Release>,
}

impl Frame {
    pub fn new(raw: RawFrame, release: impl FnOnce(RawFrame) + Send + 'static) -> Self {
        Self {
            raw: Some(raw),
            release: Some(Box::new(release)),
        }
    }

    /// A frame with nothing to give back.
    pub fn detached(raw: RawFrame) -> Self {
        Self {
            raw: Some(raw),
            release: None,
        }
    }

    pub fn raw(&self) -> &RawFrame {
        // only `Drop` takes the frame out
        self.raw.as_ref().unwrap_or_else(|| unreachable!("frame already released"))
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("raw", &self.raw.as_ref().map(|r| (r.width, r.height, r.format)))
            .field("release", &self.release.is_some())
            .finish()
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        if let (Some(raw), Some(release)) = (self.raw.take(), self.release.take()) {
            release(raw);
        }
    }
}
