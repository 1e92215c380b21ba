//! Tracing subscriber initialization with structured logging.
//!
//! # Usage
//!
//! ```no_run
//! use chatline_observe::tracing_setup::{init_tracing, TracingOptions};
//!
//! // Warnings and errors to stderr
//! init_tracing(&TracingOptions::default()).unwrap();
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// How logging should be set up for this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingOptions {
    /// Log at debug level instead of warn (ignored when `RUST_LOG` is set).
    pub debug: bool,
    /// Append logs to this file instead of writing to stderr.
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to open log file '{}': {source}", path.display())]
    OpenLog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Directive used when `RUST_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn" }
}

/// Open `path` for appending, creating it if missing.
pub fn open_log_file(path: &Path) -> Result<File, TracingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TracingError::OpenLog {
            path: path.to_path_buf(),
            source,
        })
}

/// Initialize the global tracing subscriber.
///
/// - Respects `RUST_LOG`; otherwise logs at `debug` or `warn` per
///   `options.debug`.
/// - With a log path, writes plain (no ANSI) lines to that file; otherwise
///   to stderr so log lines never mix with chat output on stdout.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// has already been set.
pub fn init_tracing(options: &TracingOptions) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(options.debug)));

    match &options.log_path {
        Some(path) => {
            let file = open_log_file(path)?;
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        None => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_directive_follows_debug_flag() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn log_file_is_created_and_appended() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chatline.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing-dir").join("chatline.log");

        let err = open_log_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing-dir"));
    }
}
