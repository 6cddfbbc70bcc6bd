use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable that overrides the default max log level.
pub const LOG_LEVEL_ENV: &str = "TRANSIT_LOG";

/// Writes log records to stdout.
pub struct StdoutLogger;

/// Writes log records to `<dir>/YYYY-MM-DD.log`, rolling over at midnight UTC.
pub struct FileLogger {
    state: Mutex<FileLoggerState>,
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

fn open_day_file(dir: &std::path::Path, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{date}.log")))
}

/// Render one record as a single log line (without trailing newline).
pub fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let current_date = format_today();
        let file = open_day_file(&dir, &current_date)?;
        Ok(FileLogger {
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!("{}", format_record(record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let today = format_today();
        if today != state.current_date {
            match open_day_file(&state.dir, &today) {
                Ok(file) => {
                    state.file = file;
                    state.current_date = today;
                }
                // keep writing to the old file
                Err(e) => eprintln!("failed to open log file for {today}: {e}"),
            }
        }

        let line = format!("{}\n", format_record(record));
        if let Err(e) = state.file.write_all(line.as_bytes()) {
            eprintln!("failed to write to log file: {e}");
            eprintln!("{}", line.trim_end());
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp() -> String {
    let secs = unix_seconds();
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn format_today() -> String {
    let (year, month, day) = civil_from_days((unix_seconds() / 86400) as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

// Howard Hinnant's days-to-civil algorithm.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Parse a level name as accepted in `TRANSIT_LOG`.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Debug builds log at Debug, release builds at Info, unless `TRANSIT_LOG` says otherwise.
pub fn max_level() -> LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
}

/// Install `StdoutLogger` as the global logger.
///
/// Only the first call per process takes effect; later calls are ignored.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level());
    }
}

/// Install a `FileLogger` writing into `dir` as the global logger.
///
/// Fails if the directory cannot be created. Only the first successful
/// installation per process takes effect.
pub fn init_file_logger(dir: impl Into<PathBuf>) -> std::io::Result<()> {
    let logger = FileLogger::new(dir)?;
    // set_logger needs a 'static reference; the leak happens once per process.
    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(max_level());
    }
    Ok(())
}

/// Log an error and exit the process with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
        $crate::log::logger().flush();
        {
            use std::io::Write;
            let _ = std::io::stdout().flush();
        }
        std::process::exit(1);
    }};
}
