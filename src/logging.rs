use crate::config::LogLevel;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber at the configured verbosity.
///
/// The filter comes from `level` alone; the environment is not consulted.
/// Returns false if a subscriber was already installed.
pub fn init(level: LogLevel) -> bool {
    fmt()
        .with_env_filter(filter_for(level))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}

fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.as_tracing_level().as_str().to_lowercase())
}
