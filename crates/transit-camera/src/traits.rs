use crate::{CameraError, Frame};

/// Async camera trait for frame capture.
///
/// `recv` yields the most recent frame. Holding a `Frame` keeps its buffers
/// checked out of the source; drop it as soon as the pixels are no longer
/// needed.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame, or `CameraError::Closed` once the source has ended.
    async fn recv(&mut self) -> Result<Frame, CameraError>;
}
