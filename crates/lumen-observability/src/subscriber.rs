//! Process-wide `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::{LogFormat, LogLevel};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Logs go to stderr so
/// they never mix with command output. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init_tracing(format: LogFormat, level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.compact().try_init(),
    };
}
