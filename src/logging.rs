//! File logging.
//!
//! The terminal belongs to the overlay, so log output goes to a file through
//! a non-blocking `tracing-appender` writer. The filter comes from `RUST_LOG`
//! and defaults to `info`.
//!
//! ```rust,ignore
//! // Keep the guard alive for the duration of the program
//! let _guard = varpanel::logging::init(&log_path)?;
//! tracing::info!(environment = "default", "Overlay ready");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_NAME: &str = "varpanel.log";

/// Dropping the guard flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Default log location: `$HOME/.varpanel/varpanel.log`, or the temp dir.
pub fn default_log_path() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".varpanel"))
        .unwrap_or_else(std::env::temp_dir);
    base.join(LOG_FILE_NAME)
}

pub fn init(log_path: &Path) -> std::io::Result<LoggingGuard> {
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let file_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    Ok(LoggingGuard { _file_guard: guard })
}
