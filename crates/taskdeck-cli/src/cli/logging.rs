//! File logging setup.
//!
//! Logs go to `<home>/logs/taskdeck.log` so stdout/stderr stay clean for
//! command output. Filter with `TASKDECK_LOG` (e.g. `TASKDECK_LOG=debug`).

use std::fs;

use taskdeck_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TASKDECK_LOG";
const LOG_FILE: &str = "taskdeck.log";
const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
///
/// Logging is skipped (returns `None`) when the log directory can't be created.
pub fn init() -> Option<WorkerGuard> {
    let dir = paths::logs_dir();
    if let Err(err) = fs::create_dir_all(&dir) {
        eprintln!("warning: logging disabled ({}: {err})", dir.display());
        return None;
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
