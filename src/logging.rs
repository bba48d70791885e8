//! Logger setup for the binary: console via `simple_logger`, plus an
//! optional copy of every record in `<log_dir>/log_YYYYMMDD_HHMMSS.log`.

use crate::{
    consts::LOG_FILE_TIMESTAMP,
    error::{ExtractError, Result},
};

use chrono::{Local, NaiveDateTime};
use log::{Level, LevelFilter, Log, Metadata, Record};
use simple_logger::{SimpleLogger, init_with_level};

use std::{
    fs::{File, create_dir_all},
    io::{LineWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Installs the global logger at `level`.
///
/// Without a log directory this is plain `simple_logger`. With one, the
/// directory is created if needed and records are also appended to a fresh
/// timestamped file, whose path is returned.
pub fn init_logging(log_dir: Option<&Path>, level: Level) -> Result<Option<PathBuf>> {
    let Some(dir) = log_dir else {
        init_with_level(level)?;
        return Ok(None);
    };

    create_dir_all(dir).map_err(|e| ExtractError::io("create directory", dir, e))?;

    let path = dir.join(log_file_name(Local::now().naive_local()));
    let logger = TeeLogger::create(&path, level.to_level_filter())?;

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level.to_level_filter());

    Ok(Some(path))
}

/// `log_YYYYMMDD_HHMMSS.log` for the given local time.
pub fn log_file_name(now: NaiveDateTime) -> String {
    format!("log_{}.log", now.format(LOG_FILE_TIMESTAMP))
}

/// Sends each record to the console logger and to a log file.
struct TeeLogger {
    console: SimpleLogger,
    file: Mutex<LineWriter<File>>,
    level: LevelFilter,
}

impl TeeLogger {
    fn create(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = File::create(path).map_err(|e| ExtractError::io("create", path, e))?;

        Ok(Self {
            console: SimpleLogger::new().with_level(level),
            file: Mutex::new(LineWriter::new(file)),
            level,
        })
    }
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        self.console.log(record);

        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", format_record(Local::now().naive_local(), record));
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn format_record(now: NaiveDateTime, record: &Record<'_>) -> String {
    format!(
        "{} - {} - {} - {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.target(),
        record.level(),
        record.args()
    )
}
