//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the logging system.
///
/// Output goes to stderr. `RUST_LOG` overrides the default `info` filter.
/// Calling this more than once is harmless.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize logging with a custom default filter (still overridable by `RUST_LOG`)
pub fn init_with_filter(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
