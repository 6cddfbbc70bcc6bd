use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Device {
    #[default]
    Cpu,
    Cuda { device_id: i32 },
    TensorRt { device_id: i32, fp16: bool },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
            Device::TensorRt { device_id, fp16 } => {
                write!(f, "TensorRT(device_id={device_id}, fp16={fp16})")
            }
        }
    }
}

/// A device string that names no known device.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseDeviceError(pub String);

impl fmt::Display for ParseDeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseDeviceError {}

/// Parses `cpu`, `cuda`, `cuda:<id>`, `tensorrt`, `tensorrt:<id>` and
/// `tensorrt:<id>:fp16`, case-insensitively.
impl FromStr for Device {
    type Err = ParseDeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut parts = lowered.split(':');
        let kind = parts.next().unwrap_or_default();
        let device_id = match parts.next() {
            None | Some("") => 0,
            Some(id) => id
                .parse::<i32>()
                .map_err(|_| ParseDeviceError(format!("invalid device id in '{s}'")))?,
        };
        let fp16 = match parts.next() {
            None => false,
            Some("fp16") => true,
            Some(other) => {
                return Err(ParseDeviceError(format!(
                    "unknown device option '{other}' in '{s}'"
                )));
            }
        };
        if parts.next().is_some() {
            return Err(ParseDeviceError(format!("too many device fields in '{s}'")));
        }

        match kind {
            "cpu" if device_id == 0 && !fp16 => Ok(Device::Cpu),
            "cuda" if !fp16 => Ok(Device::Cuda { device_id }),
            "tensorrt" | "trt" => Ok(Device::TensorRt { device_id, fp16 }),
            _ => Err(ParseDeviceError(format!("unknown device '{s}'"))),
        }
    }
}
