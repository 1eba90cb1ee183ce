//! Error types for loadout-core

use std::path::PathBuf;

use crate::sync::ApplyPhase;

/// Result type for loadout-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in loadout-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A profile with the derived id already exists
    #[error("A profile with id '{id}' already exists")]
    NameCollision { id: String },

    /// Input rejected before any filesystem change
    #[error("{message}")]
    Validation { message: String },

    /// No profile directory with this id
    #[error("Profile not found: {id}")]
    ProfileNotFound { id: String },

    /// An apply step failed; remaining steps were not run
    #[error("Apply failed while {phase} at {path}: {source}")]
    Apply {
        phase: ApplyPhase,
        path: PathBuf,
        #[source]
        source: loadout_fs::Error,
    },

    /// No live root has been configured
    #[error("No live root configured")]
    LiveRootNotConfigured,

    /// Background task failed to complete
    #[error("Background task failed: {message}")]
    Task { message: String },

    /// Filesystem error from loadout-fs
    #[error(transparent)]
    Fs(#[from] loadout_fs::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
