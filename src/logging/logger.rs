//! `tracing`-backed [`Log`] implementation used by the binary.
use std::path::PathBuf;

use super::types::Log;
use super::utils::log_file_path;

/// Target of stage headers.
pub(super) const STAGE_TARGET: &str = "dotlink::stage";
/// Target of actions a dry run only reports.
pub(super) const DRY_RUN_TARGET: &str = "dotlink::dry_run";

/// Structured logger with dry-run awareness.
///
/// Messages are emitted as `tracing` events; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders them on
/// the console and appends them to the persistent log file at
/// `$XDG_CACHE_HOME/dotlink/install.log`. Without a subscriber (unit and
/// integration tests) the events are discarded.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display after the run summary; the file
    /// itself is created by the subscriber's file layer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_file: log_file_path(),
        }
    }

    /// Return the log file path, if one could be determined.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }
}
