//! Settings resolution for a CLI invocation
//!
//! The settings file supplies defaults; `--live-root` / `--profiles-dir`
//! (or their environment variables) override it for one run.

use std::path::PathBuf;
use std::sync::Arc;

use loadout_core::{ProfileManager, Settings};
use loadout_fs::{Fingerprinter, IgnoreSet, TracingObserver};

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::logging;

/// Resolved settings plus where they came from
#[derive(Debug, Clone)]
pub struct Context {
    /// Settings file read (and written by `config set-*`)
    pub settings_path: PathBuf,
    /// Settings as stored on disk
    pub stored: Settings,
    /// Settings after command-line overrides
    pub effective: Settings,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let settings_path = match &cli.config {
            Some(path) => path.clone(),
            None => Settings::default_path()
                .ok_or_else(|| CliError::user("Cannot determine a settings location; pass --config"))?,
        };

        let stored = Settings::load(&settings_path)?;
        let mut effective = stored.clone();
        if let Some(live_root) = &cli.live_root {
            effective.live_root = Some(live_root.clone());
        }
        if let Some(profiles_dir) = &cli.profiles_dir {
            effective.profiles_dir = Some(profiles_dir.clone());
        }

        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(Self {
            settings_path,
            stored,
            effective,
        })
    }

    /// Build the manager for the effective settings.
    pub fn manager(&self) -> Result<ProfileManager> {
        let manager = ProfileManager::from_settings(&self.effective).map_err(|e| match e {
            loadout_core::Error::LiveRootNotConfigured => CliError::user(
                "No live root configured. Use `loadout config set-live-root <dir>` or --live-root",
            ),
            other => other.into(),
        })?;

        if logging::fingerprint_trace_enabled() {
            let fingerprinter =
                Fingerprinter::new(IgnoreSet::default()).with_observer(Arc::new(TracingObserver));
            return Ok(manager.with_fingerprinter(fingerprinter));
        }
        Ok(manager)
    }

    /// Persist `settings` to the settings file.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.save(&self.settings_path)?;
        Ok(())
    }
}
