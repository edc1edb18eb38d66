//! # Hashing
//!
//! SHA-256 for event identifiers (wire compatibility) and BLAKE3 for
//! content hashes and key derivation.

use sha2::{Digest, Sha256};

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// Hash data with BLAKE3 (one-shot).
pub fn blake3_hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Derive key from context and input key material.
pub fn blake3_derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(key_material);
    let hash = hasher.finalize();
    output.copy_from_slice(hash.as_bytes());
    output
}

/// SHA-256 digest.
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Lowercase hex of the SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
