//! Logging setup shared by both front-ends.
//!
//! Two sinks: the console at `info` (or `RUST_LOG`), and an append-only
//! `rhythm_trainer.log` in the log directory at `debug` for this crate.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::storage::config::get_log_dir;

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "rhythm_trainer.log";

/// Filter of the file sink: debug for our targets, info for dependencies.
const FILE_DIRECTIVES: &str = "info,rhythm_trainer=debug,rhythm_trainer_cli=debug";

/// Open the log file in `dir` for appending, creating both as needed.
pub fn open_log_file(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

/// Layer writing timestamped, uncolored records to `file`.
pub fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(EnvFilter::new(FILE_DIRECTIVES))
}

/// Install the global subscriber, with the console sink writing to `console`.
///
/// Returns the log file path, or `None` when the file could not be opened;
/// console logging works either way.
pub fn init<W>(console: W) -> Option<PathBuf>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let dir = get_log_dir();
    let (file, file_error) = match open_log_file(&dir) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(console)
                .with_filter(console_filter),
        )
        .with(file.map(file_layer))
        .init();

    match file_error {
        Some(e) => {
            tracing::warn!("File logging disabled ({}): {}", dir.display(), e);
            None
        }
        None => {
            let path = dir.join(LOG_FILE_NAME);
            tracing::debug!("Logging to {}", path.display());
            Some(path)
        }
    }
}
