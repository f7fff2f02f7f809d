//! File logger for the terminal binary.
//!
//! Stdout belongs to the game screen, so log records go to the file named by
//! `BLOCKFALL_LOG`. Without it no logger is installed and every `log` macro
//! is a no-op. `BLOCKFALL_LOG_LEVEL` picks the max level (default `info`).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub const LOG_PATH_ENV: &str = "BLOCKFALL_LOG";
pub const LOG_LEVEL_ENV: &str = "BLOCKFALL_LOG_LEVEL";

pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Append to `path`, creating it if needed.
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{millis} {:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Parse a level name; unknown or empty values fall back to `info`.
pub fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| LevelFilter::from_str(s).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the file logger if `BLOCKFALL_LOG` is set. Returns whether a
/// logger was installed.
pub fn init_from_env() -> Result<bool> {
    let Some(path) = std::env::var_os(LOG_PATH_ENV).filter(|p| !p.is_empty()) else {
        return Ok(false);
    };
    let level = parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    let logger = FileLogger::open(Path::new(&path), level)?;
    log::set_boxed_logger(Box::new(logger)).context("install logger")?;
    log::set_max_level(level);
    Ok(true)
}
