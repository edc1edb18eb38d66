//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (wrong key pair or tampered ciphertext)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Sealed payload shorter than a nonce plus an authentication tag
    #[error("Sealed payload too short: {actual} bytes, need at least {minimum}")]
    SealedTooShort {
        /// Minimum acceptable length in bytes
        minimum: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Hex decoding failed
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
}
