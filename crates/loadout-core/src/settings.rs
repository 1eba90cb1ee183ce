//! Host settings
//!
//! Stored as TOML at `<config_dir>/loadout/config.toml`. Every field is
//! optional in the file; command-line flags and environment variables
//! override what is stored.

use std::path::{Path, PathBuf};
use std::time::Duration;

use loadout_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default live-root poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

const APP_DIR: &str = "loadout";

/// Persistent settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game directory holding the live `cfg/` and `custom/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_root: Option<PathBuf>,
    /// Directory holding the profiles; defaults to the user data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles_dir: Option<PathBuf>,
    /// How often the watcher fingerprints the live root
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            live_root: None,
            profiles_dir: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// `<config_dir>/loadout/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// `<data_dir>/loadout/profiles`, if the platform has a data dir.
    pub fn default_profiles_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR).join("profiles"))
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Ok(ConfigStore::new().load(&NormalizedPath::from(path))?)
    }

    /// Save settings to `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(&NormalizedPath::from(path), self)?;
        Ok(())
    }

    /// The configured profiles directory or the platform default.
    pub fn resolved_profiles_dir(&self) -> Result<PathBuf> {
        self.profiles_dir
            .clone()
            .or_else(Self::default_profiles_dir)
            .ok_or_else(|| Error::validation("No profiles directory configured"))
    }

    /// The configured live root.
    pub fn resolved_live_root(&self) -> Result<PathBuf> {
        self.live_root.clone().ok_or(Error::LiveRootNotConfigured)
    }

    /// Poll interval, falling back to the default for zero.
    pub fn poll_interval(&self) -> Duration {
        match self.poll_interval_ms {
            0 => Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ms => Duration::from_millis(ms),
        }
    }
}
