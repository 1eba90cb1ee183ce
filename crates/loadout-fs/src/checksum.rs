//! SHA-256 checksum utilities
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used for
//! file and tree digests throughout the workspace.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Size of the buffer used when streaming file content.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A content digest in the canonical `sha256:<hex>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Finish a hasher into a canonical digest.
    pub fn from_hasher(hasher: Sha256) -> Self {
        Self(format!("{}{:x}", PREFIX, hasher.finalize()))
    }

    /// Get the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the raw SHA-256 of a file, streaming it in [`CHUNK_SIZE`] reads.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. Nothing is
/// returned for a partially read file.
pub fn hash_file(path: &Path) -> std::io::Result<[u8; 32]> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    let mut raw = [0u8; 32];
    raw.copy_from_slice(&hasher.finalize());
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest as _;

    const HELLO_WORLD: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn hex(raw: &[u8]) -> String {
        raw.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn digest_has_prefix() {
        let mut hasher = Sha256::new();
        hasher.update(b"hello world");
        let digest = Digest::from_hasher(hasher);
        assert_eq!(digest.as_str(), format!("sha256:{HELLO_WORLD}"));
        assert_eq!(digest.to_string(), digest.as_str());
    }

    #[test]
    fn file_hash_known_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autoexec.cfg");
        std::fs::write(&path, "hello world").unwrap();

        assert_eq!(hex(&hash_file(&path).unwrap()), HELLO_WORLD);
    }

    #[test]
    fn file_larger_than_one_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.vpk");
        let content = "x".repeat(CHUNK_SIZE * 2 + 17);
        std::fs::write(&path, &content).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        assert_eq!(hash_file(&path).unwrap().as_slice(), hasher.finalize().as_slice());
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(hash_file(&dir.path().join("nope")).is_err());
    }
}
