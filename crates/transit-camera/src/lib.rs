//! Frame delivery for the transit pipeline.
//!
//! Capture sources hand out `Frame`s, leases over a `RawFrame` that give the
//! buffers back to the source when dropped. Delivery is latest-only: a
//! consumer that falls behind only ever sees the newest frame.

pub mod channel;
pub mod config;
pub mod error;
pub mod frame;
pub mod replay;
pub mod traits;

pub use channel::{frame_channel, FrameReceiver, FrameSender};
pub use config::CameraConfig;
pub use error::CameraError;
pub use frame::Frame;
pub use replay::YuvFileCamera;
pub use traits::Camera;
