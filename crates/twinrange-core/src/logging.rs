#![forbid(unsafe_code)]

//! Structured logging glue.
//!
//! With the `tracing` feature the usual macros are re-exported so dependent
//! crates can log through `twinrange_core::{debug, warn, ...}` without naming
//! `tracing` themselves. With `tracing-json` a JSON subscriber filtered by
//! `TWINRANGE_LOG` (falling back to `RUST_LOG`, then `warn`) can be installed.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "TWINRANGE_LOG";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
