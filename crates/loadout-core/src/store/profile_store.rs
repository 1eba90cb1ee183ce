//! CRUD over profile directories

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use loadout_fs::{Subtree, tree, validate_path_identifier};

use super::profile::{Profile, ProfileMetadata, profile_id};
use crate::{Error, Result};

/// Where the content of a new profile comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// Snapshot whatever `cfg/` and `custom/` the live root holds
    Live(PathBuf),
    /// Copy two explicit folders, whose base names must be `cfg` and `custom`
    Folders { cfg: PathBuf, custom: PathBuf },
}

/// Request to create a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Metadata for the profile; the id is derived from `metadata.name`
    pub metadata: ProfileMetadata,
    /// Content source
    pub source: ProfileSource,
}

impl NewProfile {
    pub fn new(metadata: ProfileMetadata, source: ProfileSource) -> Self {
        Self { metadata, source }
    }
}

/// Manages the profile directories under one profiles root
#[derive(Debug, Clone)]
pub struct ProfileStore {
    /// Directory holding one subdirectory per profile
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn validate_id(id: &str) -> Result<()> {
        validate_path_identifier(id, "Profile id").map_err(Error::validation)
    }

    fn profile_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// List every profile, sorted by id.
    ///
    /// Creates the profiles root when it does not exist yet. A broken
    /// metadata record never fails the listing.
    pub fn list(&self) -> Result<Vec<Profile>> {
        fs::create_dir_all(&self.root).map_err(|e| loadout_fs::Error::io(&self.root, e))?;

        let entries = fs::read_dir(&self.root).map_err(|e| loadout_fs::Error::io(&self.root, e))?;
        let mut profiles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| loadout_fs::Error::io(&self.root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping profile with non UTF-8 name");
                continue;
            };
            profiles.push(Profile::load(id, entry.path()));
        }

        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(profiles)
    }

    /// Get one profile by id.
    pub fn get(&self, id: &str) -> Result<Profile> {
        Self::validate_id(id)?;
        let dir = self.profile_dir(id);
        if !dir.is_dir() {
            return Err(Error::ProfileNotFound { id: id.to_string() });
        }
        Ok(Profile::load(id, dir))
    }

    pub fn exists(&self, id: &str) -> bool {
        Self::validate_id(id).is_ok() && self.profile_dir(id).is_dir()
    }

    /// Create a profile from `request`.
    ///
    /// Every check runs before the profile directory is created. If copying
    /// fails afterwards, the new directory is removed again.
    pub fn create(&self, request: NewProfile) -> Result<Profile> {
        let NewProfile {
            mut metadata,
            source,
        } = request;

        metadata.name = metadata.name.trim().to_string();
        if metadata.name.is_empty() {
            return Err(Error::validation("Profile name cannot be empty"));
        }
        let id = profile_id(&metadata.name);
        Self::validate_id(&id)?;

        let dir = self.profile_dir(&id);
        if dir.exists() {
            return Err(Error::NameCollision { id });
        }

        let sources = Self::resolve_sources(&source)?;

        fs::create_dir_all(&self.root).map_err(|e| loadout_fs::Error::io(&self.root, e))?;
        if let Err(e) = fs::create_dir(&dir) {
            if e.kind() == ErrorKind::AlreadyExists {
                return Err(Error::NameCollision { id });
            }
            return Err(loadout_fs::Error::io(&dir, e).into());
        }

        let populated = Self::populate(&dir, &sources, &metadata);
        if let Err(error) = populated {
            if let Err(cleanup) = tree::remove_tree(&dir) {
                tracing::warn!(path = %dir.display(), error = %cleanup, "could not remove partial profile");
            }
            return Err(error);
        }

        tracing::info!(id = %id, "created profile");
        Ok(Profile { id, path: dir, metadata })
    }

    /// Pair each subtree with the folder its content is copied from.
    fn resolve_sources(source: &ProfileSource) -> Result<Vec<(Subtree, PathBuf)>> {
        match source {
            ProfileSource::Live(live_root) => Ok(Subtree::ALL
                .into_iter()
                .map(|subtree| (subtree, live_root.join(subtree)))
                .filter(|(_, path)| path.is_dir())
                .collect()),
            ProfileSource::Folders { cfg, custom } => {
                Self::check_source_folder(cfg, Subtree::Cfg)?;
                Self::check_source_folder(custom, Subtree::Custom)?;
                Ok(vec![(Subtree::Cfg, cfg.clone()), (Subtree::Custom, custom.clone())])
            }
        }
    }

    fn check_source_folder(path: &Path, expected: Subtree) -> Result<()> {
        if !path.is_dir() {
            return Err(Error::validation(format!(
                "{} folder does not exist: {}",
                expected,
                path.display()
            )));
        }

        let resolved = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let base = resolved
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if base != expected.as_str() {
            return Err(Error::validation(format!(
                "Expected a folder named '{}', got: {}",
                expected,
                path.display()
            )));
        }
        Ok(())
    }

    fn populate(dir: &Path, sources: &[(Subtree, PathBuf)], metadata: &ProfileMetadata) -> Result<()> {
        for (subtree, source) in sources {
            let copied = tree::merge_tree(source, &dir.join(subtree))?;
            tracing::debug!(subtree = %subtree, files = copied.len(), "snapshotted subtree");
        }
        metadata.save(dir)?;
        Ok(())
    }

    /// Replace the metadata of an existing profile.
    ///
    /// The id and directory stay the same when the display name changes.
    pub fn update_metadata(&self, id: &str, mut metadata: ProfileMetadata) -> Result<Profile> {
        let mut profile = self.get(id)?;
        metadata.name = metadata.name.trim().to_string();
        if metadata.name.is_empty() {
            return Err(Error::validation("Profile name cannot be empty"));
        }

        metadata.save(&profile.path)?;
        tracing::info!(id = %id, "updated profile metadata");
        profile.metadata = metadata;
        Ok(profile)
    }

    /// Remove a profile directory and everything in it.
    pub fn delete(&self, id: &str) -> Result<()> {
        let profile = self.get(id)?;
        tree::remove_tree(&profile.path)?;
        tracing::info!(id = %id, "deleted profile");
        Ok(())
    }
}
