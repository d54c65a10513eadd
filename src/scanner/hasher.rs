//! Streaming whole-file fingerprints.
//!
//! # Overview
//!
//! A fingerprint is a 256-bit digest of a file's complete content. Two files
//! with equal fingerprints are treated as identical; no byte-level comparison
//! follows. BLAKE3 is the default digest, SHA-256 is available for parity
//! with tools that publish SHA-256 sums.
//!
//! File content is streamed into the digest, so memory use does not grow
//! with file size.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::HashError;

/// A 256-bit content fingerprint.
pub type Hash = [u8; 32];

/// Digest used to fingerprint file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    /// BLAKE3 (default)
    #[default]
    Blake3,
    /// SHA-256
    Sha256,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blake3 => f.write_str("blake3"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}

/// File hasher producing [`Hash`] fingerprints.
///
/// `Hasher` is cheap to clone and holds no per-file state, so a single
/// instance can be shared by every hashing worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Hasher {
    /// Create a hasher using the default digest (BLAKE3).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher using the given digest.
    #[must_use]
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Fingerprint the full content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails
    /// part way through.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(file)
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Fingerprint everything `reader` yields until EOF.
    ///
    /// # Errors
    ///
    /// Propagates any read error other than `Interrupted`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Hash> {
        match self.algorithm {
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update_reader(reader)?;
                Ok(*hasher.finalize().as_bytes())
            }
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                io::copy(&mut reader, &mut hasher)?;
                Ok(hasher.finalize().into())
            }
        }
    }

    /// Fingerprint an in-memory byte slice.
    #[must_use]
    pub fn hash_bytes(&self, data: &[u8]) -> Hash {
        match self.algorithm {
            HashAlgorithm::Blake3 => *blake3::hash(data).as_bytes(),
            HashAlgorithm::Sha256 => Sha256::digest(data).into(),
        }
    }
}
