//! Tracing subscriber initialization.
//!
//! `RUST_LOG` overrides the default directives.

use tracing_subscriber::EnvFilter;

/// Service logs at `info`; sqlx statement logging is noisy below `warn`.
pub const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

/// Filter from `RUST_LOG`, falling back to `default_directives`.
pub fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install a JSON formatter with the given fallback directives.
///
/// Returns `false` when a global subscriber was already set.
pub fn init(default_directives: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directives))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok()
}
