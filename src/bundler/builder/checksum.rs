//! Artifact checksum calculation.

use crate::bundler::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::{fs::File, io::Read, path::Path};

/// Calculates the SHA-256 checksum of a file.
///
/// Reads the file in 8KB chunks and returns the lowercase hex digest
/// (64 characters).
pub fn calculate_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.deb");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(
            calculate_sha256(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_spans_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.deb");
        std::fs::write(&path, vec![b'a'; 20_000]).unwrap();
        let expected = format!("{:x}", Sha256::digest(vec![b'a'; 20_000]));
        assert_eq!(calculate_sha256(&path).unwrap(), expected);
    }
}
