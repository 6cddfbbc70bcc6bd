use crate::SpeakError;
use std::process::{Child, Command, Stdio};

/// Speech output.
///
/// `speak` interrupts whatever is still being said, then starts `text`.
pub trait Speaker: Send {
    fn speak(&mut self, text: &str) -> Result<(), SpeakError>;

    /// Stop the current utterance, if any.
    fn stop(&mut self) -> Result<(), SpeakError> {
        Ok(())
    }
}

/// Writes utterances to the log instead of a speech engine.
#[derive(Debug, Default)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), SpeakError> {
        log::info!("speak: {}", text.replace('\n', " / "));
        Ok(())
    }
}

/// Speaks by running an external program with the text as its last argument,
/// for example `espeak-ng -v ru`.
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current: None,
        }
    }

    /// Split a whitespace-separated command line into program and arguments.
    pub fn from_command_line(line: &str) -> Result<Self, SpeakError> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| SpeakError::Spawn("empty speech command".to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the last utterance is still running.
    pub fn is_speaking(&mut self) -> bool {
        match self.current.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | Some(Err(_)) | None => false,
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), SpeakError> {
        self.stop()?;

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeakError::Spawn(format!("{}: {e}", self.program)))?;
        log::debug!("speaking with {} (pid {})", self.program, child.id());
        self.current = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SpeakError> {
        let Some(mut child) = self.current.take() else {
            return Ok(());
        };
        match child.try_wait() {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                log::debug!("interrupting utterance (pid {})", child.id());
                child
                    .kill()
                    .map_err(|e| SpeakError::Interrupt(e.to_string()))?;
                // reap it so it does not linger as a zombie
                child
                    .wait()
                    .map(|_| ())
                    .map_err(|e| SpeakError::Interrupt(e.to_string()))
            }
            Err(e) => Err(SpeakError::Interrupt(e.to_string())),
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("{e}");
        }
    }
}
