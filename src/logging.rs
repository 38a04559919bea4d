//! Diagnostic logging to stderr.
//!
//! Operator-facing output goes to stdout; these events are for debugging
//! and are filtered by `GIT_SPRUCE_LOG` (e.g. `GIT_SPRUCE_LOG=debug`).

use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "GIT_SPRUCE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
