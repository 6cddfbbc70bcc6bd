use std::fmt;
use std::path::PathBuf;

/// Where the model bytes come from.
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

impl fmt::Debug for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::File(path) => f.debug_tuple("File").field(path).finish(),
            ModelSource::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::File(path) => write!(f, "{}", path.display()),
            ModelSource::Memory(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<PathBuf> for ModelSource {
    fn from(path: PathBuf) -> Self {
        ModelSource::File(path)
    }
}

impl From<Vec<u8>> for ModelSource {
    fn from(bytes: Vec<u8>) -> Self {
        ModelSource::Memory(bytes)
    }
}
