use crate::{Camera, CameraError, Frame};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

struct Shared {
    slot: Mutex<Option<Frame>>,
    notify: Notify,
    sender_closed: AtomicBool,
    receiver_closed: AtomicBool,
    discarded: AtomicUsize,
}

/// Producer half of a latest-only frame channel.
pub struct FrameSender {
    shared: Arc<Shared>,
}

/// Consumer half of a latest-only frame channel.
pub struct FrameReceiver {
    shared: Arc<Shared>,
}

/// Create a single-slot channel that keeps only the newest frame.
///
/// Sending while a frame is still pending replaces it; the replaced frame is
/// dropped right away, which returns its buffers to the source.
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(None),
        notify: Notify::new(),
        sender_closed: AtomicBool::new(false),
        receiver_closed: AtomicBool::new(false),
        discarded: AtomicUsize::new(0),
    });
    (
        FrameSender {
            shared: Arc::clone(&shared),
        },
        FrameReceiver { shared },
    )
}

impl FrameSender {
    /// Publish `frame`, displacing any frame the consumer has not taken yet.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Closed` (and drops `frame`) once the receiver is gone.
    pub fn send(&self, frame: Frame) -> Result<(), CameraError> {
        if self.shared.receiver_closed.load(Ordering::Acquire) {
            return Err(CameraError::Closed);
        }

        let stale = {
            let mut slot = self.shared.slot.lock().unwrap_or_else(|e| e.into_inner());
            slot.replace(frame)
        };
        if stale.is_some() {
            let discarded = self.shared.discarded.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("consumer busy, discarded stale frame ({discarded} total)");
        }
        // release the stale frame outside the lock
        drop(stale);

        self.shared.notify.notify_one();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.shared.receiver_closed.load(Ordering::Acquire)
    }

    /// Number of frames replaced before the consumer took them.
    pub fn discarded(&self) -> usize {
        self.shared.discarded.load(Ordering::Relaxed)
    }
}

impl Drop for FrameSender {
    fn drop(&mut self) {
        self.shared.sender_closed.store(true, Ordering::Release);
        self.shared.notify.notify_one();
    }
}

impl FrameReceiver {
    /// Take the pending frame without waiting.
    pub fn try_recv(&mut self) -> Option<Frame> {
        self.shared
            .slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Number of frames replaced before this receiver took them.
    pub fn discarded(&self) -> usize {
        self.shared.discarded.load(Ordering::Relaxed)
    }
}

impl Camera for FrameReceiver {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        loop {
            if let Some(frame) = self.try_recv() {
                return Ok(frame);
            }
            if self.shared.sender_closed.load(Ordering::Acquire) {
                // a frame may have landed between the check above and the close
                return self.try_recv().ok_or(CameraError::Closed);
            }
            self.shared.notify.notified().await;
        }
    }
}

impl Drop for FrameReceiver {
    fn drop(&mut self) {
        self.shared.receiver_closed.store(true, Ordering::Release);
        // release a pending frame now rather than when the sender goes away
        let pending = self
            .shared
            .slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        drop(pending);
    }
}
