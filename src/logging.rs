//! Tracing subscriber setup.
//!
//! The CLI logs to stderr. The TUI owns the terminal, so it logs to
//! `<cache dir>/recent-workspaces/recent-workspaces.log` through a
//! non-blocking writer instead. `RUST_LOG` always wins over the defaults.

use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILENAME: &str = "recent-workspaces.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Keeps the file writer alive; logs are flushed when it drops
#[must_use]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    log_path: Option<PathBuf>,
}

impl LoggingGuard {
    /// Log file in use, if logging to a file
    pub fn log_path(&self) -> Option<&std::path::Path> {
        self.log_path.as_deref()
    }
}

fn default_directive(target: LogTarget, verbose: bool) -> &'static str {
    match (verbose, target) {
        (true, _) => "recent_workspaces=debug,warn",
        (false, LogTarget::Stderr) => "warn",
        (false, LogTarget::File) => "recent_workspaces=info,warn",
    }
}

fn filter(target: LogTarget, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(target, verbose)))
}

/// Directory for the TUI log file
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("recent-workspaces"))
        .unwrap_or_else(|| std::env::temp_dir().join("recent-workspaces"))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init(target: LogTarget, verbose: bool) -> LoggingGuard {
    let env_filter = filter(target, verbose);

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .try_init();
            LoggingGuard { _file_guard: None, log_path: None }
        }
        LogTarget::File => {
            let dir = log_dir();
            let log_path = dir.join(LOG_FILENAME);
            let file = fs::create_dir_all(&dir)
                .and_then(|_| OpenOptions::new().create(true).append(true).open(&log_path));

            match file {
                Ok(file) => {
                    let (writer, guard) = tracing_appender::non_blocking(file);
                    let _ = tracing_subscriber::fmt()
                        .with_env_filter(env_filter)
                        .with_writer(writer)
                        .with_ansi(false)
                        .try_init();
                    LoggingGuard { _file_guard: Some(guard), log_path: Some(log_path) }
                }
                // Never write to the terminal while the TUI owns it
                Err(_) => {
                    let _ = tracing_subscriber::fmt()
                        .with_env_filter(env_filter)
                        .with_writer(std::io::sink)
                        .try_init();
                    LoggingGuard { _file_guard: None, log_path: None }
                }
            }
        }
    }
}
