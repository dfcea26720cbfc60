//! Log sink setup.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. Events go to `log_file`
/// (appended, no ANSI colours); if it cannot be opened they go to stderr.
pub fn init_tracing(log_file: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        let _ = fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init();
        }
        Err(e) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init();
            tracing::warn!(path = %log_file.display(), error = %e, "Cannot open log file, logging to stderr");
        }
    }
}
