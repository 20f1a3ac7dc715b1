#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the lspgen tools.
//!
//! Installs a `tracing` subscriber that writes formatted events to stderr, or
//! to a log file when one is configured. `RUST_LOG` takes precedence over the
//! configured level.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Errors that can occur while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level or filter directive could not be parsed
    #[error("invalid log filter `{directive}`: {reason}")]
    Filter {
        /// Directive as given
        directive: String,
        /// Parser message
        reason: String,
    },
    /// The log file could not be opened for appending
    #[error("failed to open log file {}: {source}", path.display())]
    File {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// A global subscriber is already installed
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Parse a level or filter directive (e.g. `"info"`, `"analysis=debug"`)
pub fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::Filter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber
///
/// `level` is used unless `RUST_LOG` holds a valid filter. With `file` set,
/// events are appended to it instead of going to stderr.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(level)?,
    };

    let file_layer = match file {
        Some(path) => {
            let writer = open_log_file(path)?;
            Some(fmt::layer().with_writer(Mutex::new(writer)).with_ansi(false))
        }
        None => None,
    };
    let stderr_layer = file_layer.is_none().then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::File { path: path.to_path_buf(), source })
}

/// Emits a trace-level event tagged with `module`.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module, "{}", msg);
}
