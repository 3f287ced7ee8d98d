//! Tracing setup. The dashboard owns the terminal, so logs go to a file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Returns the log file in use, or `None` when it could not be opened and
/// output is discarded.
pub fn init_tracing(config: &LoggingConfig) -> Option<PathBuf> {
    let path = config.file_path();
    let (writer, used) = match open_log_file(&path) {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), Some(path)),
        Err(_) => (BoxMakeWriter::new(io::sink), None),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Fails only if a subscriber is already installed; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(writer)
        .try_init();

    used
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
