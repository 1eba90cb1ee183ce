//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Defaults to `warn`, or `debug` when `verbose` is set. Fingerprint steps
/// are logged under their own target at trace level, e.g.
/// `RUST_LOG=loadout::fingerprint=trace`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact();

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Verbose mode enabled");
    }
}

/// Whether fingerprint trace events would be recorded.
pub fn fingerprint_trace_enabled() -> bool {
    tracing::enabled!(target: "loadout::fingerprint", tracing::Level::TRACE)
}
