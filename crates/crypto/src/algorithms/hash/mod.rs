// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions using sha2

use sha2::{Digest, Sha256};

/// SHA-256 of any type that can be referenced as bytes.
pub fn sha256<T: AsRef<[u8]>>(data: T) -> [u8; 32] {
    Sha256::digest(data.as_ref()).into()
}

/// SHA-256 over the concatenation of several byte slices, without copying them
/// into one buffer first.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
