//! # Shared Crypto - Opaque Primitives for the D2A Exchange
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | XChaCha20-Poly1305 | Message payload encryption |
//! | `ecdh` | secp256k1 ECDH + BLAKE3 KDF | Conversation keys between two agents |
//! | `hashing` | SHA-256, BLAKE3 | Event ids, content hashes, key derivation |
//! | `ecdsa` | secp256k1 | Agent identity and event signatures |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit random nonce, constant-time ARX design
//! - **secp256k1**: RFC 6979 deterministic signing, low-S normalization
//! - **ECDH**: symmetric by construction, `K(a, B) == K(b, A)`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdh;
pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod symmetric;

// Re-exports
pub use ecdh::{conversation_key, CONVERSATION_KEY_CONTEXT};
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{blake3_derive_key, blake3_hash, sha256, sha256_hex};
pub use symmetric::{decrypt, encrypt, open_sealed, seal, Nonce, SecretKey, NONCE_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
