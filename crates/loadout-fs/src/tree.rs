//! Sorted directory walks and whole-tree copy/removal
//!
//! Every walk visits entries sorted by file name within each directory, so
//! anything built on top of it (fingerprints, reports) is independent of the
//! order the platform enumerates directories in.

use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::{Error, NormalizedPath, Result};

/// A regular file found under a walked root.
#[derive(Debug, Clone)]
pub struct TreeFile {
    /// Native path of the file
    pub path: PathBuf,
    /// Path relative to the walked root, forward-slash separated, for display
    pub relative: NormalizedPath,
    /// Path relative to the walked root, exactly as the filesystem names it
    pub relative_path: PathBuf,
}

impl TreeFile {
    fn new(root: &Path, path: PathBuf) -> Option<Self> {
        let relative = NormalizedPath::relative(root, &path)?;
        let relative_path = path.strip_prefix(root).ok()?.to_path_buf();
        Some(Self {
            path,
            relative,
            relative_path,
        })
    }

    /// The final path component, lossily converted.
    pub fn file_name(&self) -> &str {
        self.relative.file_name().unwrap_or_default()
    }

    /// The file at the same relative path under `base`.
    pub fn under(&self, base: &Path) -> PathBuf {
        base.join(&self.relative_path)
    }

    /// The relative path as raw bytes, components joined by `/`.
    ///
    /// Unlike [`TreeFile::relative`] this is exact for names that are not
    /// valid UTF-8, so distinct files never hash alike.
    pub fn relative_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for component in self.relative_path.components() {
            if let Component::Normal(part) = component {
                if !bytes.is_empty() {
                    bytes.push(b'/');
                }
                bytes.extend_from_slice(part.as_encoded_bytes());
            }
        }
        bytes
    }
}

fn sorted_walk(root: &Path) -> walkdir::IntoIter {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    Error::io(path, std::io::Error::from(err))
}

/// Walk the regular files under `root` in sorted order.
///
/// Yields nothing when `root` does not exist. Walk failures (an unreadable
/// directory, a vanished entry) are yielded as errors so that callers can
/// decide whether to tolerate them.
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<TreeFile>> + '_ {
    let entries = root.exists().then(|| sorted_walk(root));
    entries.into_iter().flatten().filter_map(move |entry| match entry {
        Ok(entry) if is_file(&entry) => TreeFile::new(root, entry.into_path()).map(Ok),
        Ok(_) => None,
        Err(err) => Some(Err(walk_error(root, err))),
    })
}

/// Copy a single file, overwriting `dst`, and carry over the source
/// modification time where the platform allows it.
pub fn copy_file_preserving_mtime(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).map_err(|e| Error::io(src, e))?;

    let modified = fs::metadata(src).and_then(|meta| meta.modified());
    let applied = modified.and_then(|time| {
        File::options()
            .write(true)
            .open(dst)
            .and_then(|file| file.set_modified(time))
    });
    if let Err(e) = applied {
        tracing::debug!(path = %dst.display(), error = %e, "could not preserve modification time");
    }
    Ok(())
}

/// Copy the tree at `src` into `dst`, merging with whatever `dst` holds.
///
/// Missing directories (including empty ones) are created and every file is
/// copied over its counterpart. Files under `dst` with no counterpart in
/// `src` are left alone. Returns the relative paths of the copied files.
pub fn merge_tree(src: &Path, dst: &Path) -> Result<Vec<NormalizedPath>> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    let mut copied = Vec::new();
    for entry in sorted_walk(src) {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let Ok(relative_path) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative_path);

        if entry.file_type().is_dir() {
            if !target.is_dir() {
                fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
            }
        } else if is_file(&entry) {
            if let Some(parent) = target.parent()
                && !parent.is_dir()
            {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            copy_file_preserving_mtime(entry.path(), &target)?;
            if let Some(relative) = NormalizedPath::relative(src, entry.path()) {
                copied.push(relative);
            }
        }
    }
    Ok(copied)
}

/// Recursively remove `path` if it exists.
///
/// Returns whether anything was removed.
pub fn remove_tree(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))?;
    Ok(true)
}

/// Delete every file under `root` whose name ends with `suffix`.
///
/// Returns the relative paths of the removed files.
pub fn remove_files_with_suffix(root: &Path, suffix: &str) -> Result<Vec<NormalizedPath>> {
    let mut removed = Vec::new();
    for file in walk_files(root) {
        let file = file?;
        if file.file_name().ends_with(suffix) {
            fs::remove_file(&file.path).map_err(|e| Error::io(&file.path, e))?;
            removed.push(file.relative);
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn walk_is_sorted_per_directory() {
        let dir = tempdir().unwrap();
        write(dir.path(), "b.cfg", "");
        write(dir.path(), "a/z.cfg", "");
        write(dir.path(), "a/m.cfg", "");
        write(dir.path(), "c.cfg", "");

        let seen: Vec<String> = walk_files(dir.path())
            .map(|f| f.unwrap().relative.as_str().to_string())
            .collect();
        assert_eq!(seen, vec!["a/m.cfg", "a/z.cfg", "b.cfg", "c.cfg"]);
    }

    #[test]
    fn walk_of_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        assert_eq!(walk_files(&dir.path().join("absent")).count(), 0);
    }

    #[test]
    fn merge_creates_empty_directories_and_keeps_extras() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        write(src.path(), "hud/scheme.res", "new");
        fs::create_dir_all(src.path().join("empty")).unwrap();
        write(dst.path(), "hud/scheme.res", "old");
        write(dst.path(), "user.txt", "mine");

        let copied = merge_tree(src.path(), dst.path()).unwrap();

        assert_eq!(copied, vec![NormalizedPath::new("hud/scheme.res")]);
        assert_eq!(fs::read_to_string(dst.path().join("hud/scheme.res")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dst.path().join("user.txt")).unwrap(), "mine");
        assert!(dst.path().join("empty").is_dir());
    }

    #[test]
    fn copy_preserves_modification_time() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.cfg");
        let dst = dir.path().join("dst.cfg");
        fs::write(&src, "bind w +forward").unwrap();
        let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        File::options().write(true).open(&src).unwrap().set_modified(past).unwrap();

        copy_file_preserving_mtime(&src, &dst).unwrap();

        assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), past);
    }

    #[test]
    fn suffix_removal_only_touches_matching_files() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.cache", "");
        write(dir.path(), "deep/b.cache", "");
        write(dir.path(), "keep.cfg", "");
        write(dir.path(), "cache.txt", "");

        let removed = remove_files_with_suffix(dir.path(), ".cache").unwrap();

        assert_eq!(removed.len(), 2);
        assert!(dir.path().join("keep.cfg").exists());
        assert!(dir.path().join("cache.txt").exists());
        assert!(!dir.path().join("deep/b.cache").exists());
    }

    #[test]
    fn remove_tree_reports_absence() {
        let dir = tempdir().unwrap();
        assert!(!remove_tree(&dir.path().join("absent")).unwrap());
        write(dir.path(), "t/x", "");
        assert!(remove_tree(&dir.path().join("t")).unwrap());
        assert!(!dir.path().join("t").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_keep_their_exact_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        let name = OsStr::from_bytes(b"bind\xff.cfg");
        fs::create_dir_all(src.path().join("sub")).unwrap();
        fs::write(src.path().join("sub").join(name), "x").unwrap();

        let file = walk_files(src.path()).next().unwrap().unwrap();
        assert_eq!(file.relative_bytes(), b"sub/bind\xff.cfg".to_vec());
        assert_eq!(file.under(dst.path()), dst.path().join("sub").join(name));

        merge_tree(src.path(), dst.path()).unwrap();
        let copied: Vec<_> = fs::read_dir(dst.path().join("sub"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(copied, vec![name.to_os_string()]);
    }
}
