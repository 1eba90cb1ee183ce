//! Opt-in trace of what subset fingerprinting inspects
//!
//! Fingerprinting is silent unless the caller attaches an observer.

use crate::NormalizedPath;

/// Tracing target used by [`TracingObserver`].
pub const TRACE_TARGET: &str = "loadout::fingerprint";

/// A single step of a subset fingerprint walk.
#[derive(Debug, Clone, Copy)]
pub enum FingerprintEvent<'a> {
    /// A reference file was skipped because its name is in the ignore set
    Ignored { path: &'a NormalizedPath },
    /// A reference file is being compared against the target tree
    Checking { path: &'a NormalizedPath },
    /// The target tree has no file at this relative path
    Missing { path: &'a NormalizedPath },
    /// The target file exists but its content differs from the reference
    Mismatch { path: &'a NormalizedPath },
    /// A file could not be read; its content did not contribute
    Unreadable {
        path: &'a NormalizedPath,
        error: &'a std::io::Error,
    },
}

/// Receives [`FingerprintEvent`]s while a fingerprint is computed.
pub trait FingerprintObserver: Send + Sync {
    fn on_event(&self, event: FingerprintEvent<'_>);
}

/// Forwards events to `tracing` at TRACE level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl FingerprintObserver for TracingObserver {
    fn on_event(&self, event: FingerprintEvent<'_>) {
        match event {
            FingerprintEvent::Ignored { path } => {
                tracing::trace!(target: TRACE_TARGET, %path, "ignoring")
            }
            FingerprintEvent::Checking { path } => {
                tracing::trace!(target: TRACE_TARGET, %path, "checking")
            }
            FingerprintEvent::Missing { path } => {
                tracing::trace!(target: TRACE_TARGET, %path, "missing")
            }
            FingerprintEvent::Mismatch { path } => {
                tracing::trace!(target: TRACE_TARGET, %path, "mismatch")
            }
            FingerprintEvent::Unreadable { path, error } => {
                tracing::trace!(target: TRACE_TARGET, %path, %error, "unreadable")
            }
        }
    }
}
