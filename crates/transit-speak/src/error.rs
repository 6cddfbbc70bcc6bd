use std::fmt;

#[derive(Debug)]
pub enum SpeakError {
    /// The speech program could not be started.
    Spawn(String),
    /// A running utterance could not be stopped.
    Interrupt(String),
}

impl fmt::Display for SpeakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakError::Spawn(msg) => write!(f, "failed to start speech: {msg}"),
            SpeakError::Interrupt(msg) => write!(f, "failed to interrupt speech: {msg}"),
        }
    }
}

impl std::error::Error for SpeakError {}
