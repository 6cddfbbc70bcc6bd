use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    Device(String),
    Stream(String),
    Channel(String),
    Frame(transit_image::ImageError),
    /// The source has stopped and no frame is pending.
    Closed,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
            CameraError::Frame(err) => write!(f, "frame error: {err}"),
            CameraError::Closed => write!(f, "camera closed"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<transit_image::ImageError> for CameraError {
    fn from(err: transit_image::ImageError) -> Self {
        CameraError::Frame(err)
    }
}
