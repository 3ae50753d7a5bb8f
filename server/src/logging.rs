//! Logging initialization
//!
//! Structured `tracing` output to stdout and, when a log directory is
//! configured, to a daily-rotated JSON Lines file.

use chrono::Local;
use std::{
    env, fs,
    io::{self, Error},
    path::{Path, PathBuf},
    sync::OnceLock,
};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file base name (JSON Lines); rotation appends `.YYYY-MM-DD`
pub const LOG_FILE_BASE: &str = "bank-api.jsonl";

const DEFAULT_RETENTION_DAYS: u32 = 7;

const LOG_DIR_ENV: &str = "BANK_LOG_DIR";
const LOG_LEVEL_ENV: &str = "BANK_LOG_LEVEL";
const LOG_RETENTION_DAYS_ENV: &str = "BANK_LOG_RETENTION_DAYS";
const ALT_LEVEL_ENV: &str = "RUST_LOG";

static LOGGER_GUARD: OnceLock<Result<LoggerGuard, io::Error>> = OnceLock::new();

struct LoggerGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize logging. Later calls are no-ops returning the first outcome.
pub fn init() -> io::Result<()> {
    match LOGGER_GUARD.get_or_init(configure_logger) {
        Ok(_) => Ok(()),
        Err(err) => Err(io::Error::new(err.kind(), err.to_string())),
    }
}

/// Directory for JSON log files, if file logging is enabled
pub fn log_dir() -> Option<PathBuf> {
    env::var(LOG_DIR_ENV)
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

fn get_retention_days() -> u32 {
    env::var(LOG_RETENTION_DAYS_ENV)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(DEFAULT_RETENTION_DAYS)
}

/// Remove rotated log files older than `retention_days`
fn cleanup_old_logs(log_dir: &Path, retention_days: u32) -> io::Result<()> {
    if !log_dir.exists() {
        return Ok(());
    }

    let cutoff = Local::now() - chrono::Duration::days(retention_days as i64);
    let cutoff_str = cutoff.format("%Y-%m-%d").to_string();
    let prefix = format!("{}.", LOG_FILE_BASE);

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = filename.strip_prefix(&prefix) {
            if date_part < cutoff_str.as_str() {
                let _ = fs::remove_file(&path);
            }
        }
    }
    Ok(())
}

fn configure_logger() -> io::Result<LoggerGuard> {
    // BANK_LOG_LEVEL > RUST_LOG > info
    let env_filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_from_env(ALT_LEVEL_ENV))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_directory = log_dir();
    let (file_layer, file_guard) = match &log_directory {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            cleanup_old_logs(dir, get_retention_days())?;

            let (file_writer, guard) = non_blocking(rolling::daily(dir, LOG_FILE_BASE));
            let layer = fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_current_span(false)
                .with_span_list(false)
                .with_target(true)
                .with_file(false)
                .with_line_number(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(Error::other)?;

    match &log_directory {
        Some(dir) => tracing::info!(category = "system", "Logs written to {}", dir.display()),
        None => tracing::debug!(category = "system", "File logging disabled"),
    }

    Ok(LoggerGuard {
        _file_guard: file_guard,
    })
}
