//! Profile and metadata types

use std::path::{Path, PathBuf};

use loadout_fs::{ConfigStore, METADATA_FILE, NormalizedPath, Subtree};
use serde::{Deserialize, Serialize};

/// User-facing description of a profile, stored as `profile.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Game launch options to use with this profile
    #[serde(default)]
    pub launch_options: String,
}

impl ProfileMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_launch_options(mut self, launch_options: impl Into<String>) -> Self {
        self.launch_options = launch_options.into();
        self
    }

    /// Load the record in `dir`, falling back to defaults.
    ///
    /// A missing or unparsable record, or one with an empty name, yields the
    /// directory name as `fallback_name`.
    pub fn load_or_default(dir: &Path, fallback_name: &str) -> Self {
        let path = dir.join(METADATA_FILE);
        let mut metadata = if path.is_file() {
            match ConfigStore::new().load::<Self>(&NormalizedPath::from(path.as_path())) {
                Ok(metadata) => metadata,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "ignoring unreadable profile metadata");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        if metadata.name.trim().is_empty() {
            metadata.name = fallback_name.to_string();
        }
        metadata
    }

    /// Write the record into `dir` atomically.
    pub fn save(&self, dir: &Path) -> loadout_fs::Result<()> {
        let path = dir.join(METADATA_FILE);
        ConfigStore::new().save(&NormalizedPath::from(path.as_path()), self)
    }
}

/// A stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Directory name under the profiles root
    pub id: String,
    /// Absolute path of the profile directory
    pub path: PathBuf,
    /// Metadata record, with defaults applied
    pub metadata: ProfileMetadata,
}

impl Profile {
    /// Load the profile stored in `path`.
    pub fn load(id: impl Into<String>, path: PathBuf) -> Self {
        let id = id.into();
        let metadata = ProfileMetadata::load_or_default(&path, &id);
        Self { id, path, metadata }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Path of this profile's copy of `subtree`.
    pub fn subtree(&self, subtree: Subtree) -> PathBuf {
        self.path.join(subtree)
    }

    pub fn has_subtree(&self, subtree: Subtree) -> bool {
        self.subtree(subtree).is_dir()
    }
}

/// Derive a profile id from a display name.
///
/// Surrounding whitespace is trimmed and inner spaces become underscores.
pub fn profile_id(name: &str) -> String {
    name.trim().replace(' ', "_")
}
