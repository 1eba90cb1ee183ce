//! Constants and enums for profile and live-root filesystem paths.

use std::path::Path;

/// Filenames excluded from profile comparison, matched at any depth.
pub const IGNORED_FILES: [&str; 3] = ["config.cfg", "motd_entries.txt", "sound.cache"];

/// Suffix of runtime cache files purged after every apply.
pub const CACHE_SUFFIX: &str = ".cache";

/// Name of the metadata record inside a profile directory.
pub const METADATA_FILE: &str = "profile.json";

/// The directory trees a profile snapshots from the live root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subtree {
    /// The `cfg` directory (scripts and settings)
    Cfg,
    /// The `custom` directory (HUDs, hitsounds, mods)
    Custom,
}

impl Subtree {
    /// Every subtree, in processing order.
    pub const ALL: [Subtree; 2] = [Subtree::Cfg, Subtree::Custom];

    /// Get the directory name of the subtree.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cfg => "cfg",
            Self::Custom => "custom",
        }
    }
}

impl AsRef<Path> for Subtree {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for Subtree {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Subtree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
