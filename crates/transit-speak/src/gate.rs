/// The last announced text. Starts empty and is only ever overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementState {
    last: Option<String>,
}

impl AnnouncementState {
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Suppresses announcing the same text twice in a row.
///
/// There is no expiry: a text repeats only after something different was
/// announced in between. Sharing one gate between producers needs a mutex
/// around it, since the check and the update must happen together.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementGate {
    state: AnnouncementState,
}

impl AnnouncementGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a saved state.
    pub fn with_state(state: AnnouncementState) -> Self {
        Self { state }
    }

    /// True if `text` differs from the last announcement, in which case it
    /// becomes the last announcement.
    pub fn should_announce(&mut self, text: &str) -> bool {
        if self.state.last.as_deref() == Some(text) {
            return false;
        }
        self.state.last = Some(text.to_string());
        true
    }

    pub fn state(&self) -> &AnnouncementState {
        &self.state
    }
}
