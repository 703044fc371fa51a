//! Logging setup.
//!
//! The TUI owns the terminal, so its logs go to a daily-rotated file under
//! the state directory; CLI runs log to stderr. `KANRI_LOG` tunes the
//! filter in both modes (warn by default for the CLI, info for the TUI).

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config;

const FILTER_ENV: &str = "KANRI_LOG";

/// Route logs to `kanri.log` for a TUI session. The returned guard must
/// stay alive for the duration of the session or buffered lines are lost.
pub fn init_tui() -> Option<WorkerGuard> {
    let dir = config::log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::daily(dir, "kanri.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

/// Route logs to stderr for CLI runs.
pub fn init_cli() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
