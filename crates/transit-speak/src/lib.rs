//! Spoken announcements: deduplication and speech output.

pub mod error;
pub mod gate;
pub mod speaker;

pub use error::SpeakError;
pub use gate::{AnnouncementGate, AnnouncementState};
pub use speaker::{CommandSpeaker, LogSpeaker, Speaker};
