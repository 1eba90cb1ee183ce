//! [`TestEnv`]: a live game directory and a profiles root in one scratch
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::tree::{TestTree, write_file};

/// Layout used by manager and CLI tests:
///
/// ```text
/// <tmp>/tf/          live root
/// <tmp>/profiles/    profiles root
/// <tmp>/config.toml  settings file
/// ```
pub struct TestEnv {
    tree: TestTree,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let tree = TestTree::new();
        tree.mkdir("profiles");
        Self { tree }
    }

    pub fn root(&self) -> &Path {
        self.tree.root()
    }

    pub fn live_root(&self) -> PathBuf {
        self.tree.path("tf")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.tree.path("profiles")
    }

    pub fn config_path(&self) -> PathBuf {
        self.tree.path("config.toml")
    }

    /// Write a file under the live root, e.g. `cfg/autoexec.cfg`.
    pub fn write_live(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        self.tree.write(&format!("tf/{rel}"), content)
    }

    /// Write a file into profile `id`, e.g. `cfg/autoexec.cfg`.
    pub fn write_profile(&self, id: &str, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        self.tree.write(&format!("profiles/{id}/{rel}"), content)
    }

    /// Write a `profile.json` record for profile `id`.
    pub fn write_profile_metadata(&self, id: &str, name: &str, description: &str) -> PathBuf {
        let record = format!(
            "{{\n  \"name\": \"{name}\",\n  \"description\": \"{description}\",\n  \"launch_options\": \"\"\n}}\n"
        );
        write_file(&self.profiles_dir().join(id).join("profile.json"), record)
    }

    /// Write a settings file pointing at this environment.
    pub fn write_settings(&self) -> PathBuf {
        let content = format!(
            "live_root = {:?}\nprofiles_dir = {:?}\n",
            self.live_root().display().to_string(),
            self.profiles_dir().display().to_string()
        );
        write_file(&self.config_path(), content)
    }

    pub fn live_exists(&self, rel: &str) -> bool {
        self.tree.path(&format!("tf/{rel}")).exists()
    }

    pub fn read_live(&self, rel: &str) -> String {
        self.tree.read(&format!("tf/{rel}"))
    }

    /// Ids of every profile directory, sorted.
    pub fn profile_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = fs::read_dir(self.profiles_dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        ids.sort();
        ids
    }
}
