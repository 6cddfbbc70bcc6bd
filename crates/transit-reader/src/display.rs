use crate::DecodedResult;

/// Status shown while the model is loaded.
pub const STATUS_READY: &str = "Готов к работе";
/// Status shown while no model is available.
pub const STATUS_MODEL_ERROR: &str = "Ошибка модели";

/// Where decoded results are shown.
pub trait ResultDisplay: Send {
    fn show(&mut self, result: &DecodedResult);
    fn set_status(&mut self, status: &str);
}

/// Prints results to stdout.
#[derive(Debug, Default)]
pub struct StdoutDisplay {
    status: String,
}

impl StdoutDisplay {
    pub fn status(&self) -> &str {
        &self.status
    }
}

impl ResultDisplay for StdoutDisplay {
    fn show(&mut self, result: &DecodedResult) {
        println!("{}", result.composed());
        if !result.coordinates.is_empty() {
            println!("{}", result.coordinates);
        }
    }

    fn set_status(&mut self, status: &str) {
        if self.status != status {
            println!("[{status}]");
            self.status = status.to_string();
        }
    }
}
