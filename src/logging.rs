//! Logger setup for native hosts.

use crate::config::LogLevel;

/// Install `env_logger` at `level`. `RUST_LOG` still overrides per module.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let filter = level.to_level_filter();
    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter.as_str()),
    )
    .format_timestamp_millis()
    .try_init();

    match result {
        Ok(()) => log::debug!("Logging initialized at {}", level.name()),
        Err(_) => log::debug!("Logger already installed"),
    }
}

/// On the web the embedding page owns the logger; only the level is applied.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    log::set_max_level(level.to_level_filter());
}
