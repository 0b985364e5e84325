//! Diagnostic logging for the host-loaded tool library.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

/// Holds an `EnvFilter` directive controlling the diagnostic log output.
pub const LOG_VARIABLE: &str = "KERNEL_TIMER_LOG";

/// Used when the log variable is unset or unusable.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs a stderr `tracing` subscriber filtered by the [`LOG_VARIABLE`] environment variable.
///
/// A host process may already have installed a global subscriber, in which case that one is
/// kept and this call has no effect. Returns whether a subscriber was installed by this call.
#[cfg_attr(test, mutants::skip)] // Global subscriber can only be installed once per process.
pub fn install_from_env() -> bool {
    let directive = env::var(LOG_VARIABLE).ok();
    let (filter, rejected) = build_filter(directive.as_deref());

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .is_ok();

    if let Some(rejected) = rejected {
        tracing::warn!(
            variable = LOG_VARIABLE,
            directive = rejected,
            fallback = DEFAULT_LOG_FILTER,
            "ignoring unusable log filter"
        );
    }

    installed
}

/// Returns the filter to install and, if the directive could not be parsed, the rejected directive.
fn build_filter(directive: Option<&str>) -> (EnvFilter, Option<&str>) {
    match directive.map(|directive| (directive, EnvFilter::try_new(directive))) {
        Some((_, Ok(filter))) => (filter, None),
        Some((rejected, Err(_))) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(rejected)),
        None => (EnvFilter::new(DEFAULT_LOG_FILTER), None),
    }
}
