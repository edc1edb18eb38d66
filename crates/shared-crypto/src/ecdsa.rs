//! # ECDSA Signatures (secp256k1)
//!
//! Agent identities are secp256k1 keypairs. The public half, hex-encoded in
//! compressed SEC1 form, is the opaque `pubkey` string every D2A message is
//! addressed to and signed by.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization
//! - Constant-time operations

use crate::CryptoError;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey([u8; 33]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Parse the 66-character hex form used on the wire.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 33] = raw
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        Self::from_bytes(bytes)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Lowercase hex of the compressed point.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verify a signature.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = Signature::from_slice(&signature.0)
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Curve point for key agreement.
    pub(crate) fn to_curve_point(self) -> Result<k256::PublicKey, CryptoError> {
        k256::PublicKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; 64]);

impl Secp256k1Signature {
    /// Create from bytes (64 bytes).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Parse the 128-character hex form used on the wire.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 64] = raw
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        let encoded = self.signing_key.verifying_key().to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(encoded.as_bytes());
        Secp256k1PublicKey(bytes)
    }

    /// Sign a message (deterministic RFC 6979).
    pub fn sign(&self, message: &[u8]) -> Secp256k1Signature {
        let sig: Signature = self.signing_key.sign(message);
        let bytes: [u8; 64] = sig.to_bytes().into();
        Secp256k1Signature(bytes)
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = Secp256k1KeyPair::generate();
        let message = b"offer: rust async runtimes";

        let signature = keypair.sign(message);
        let result = keypair.public_key().verify(message, &signature);

        assert!(result.is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let keypair = Secp256k1KeyPair::generate();

        let signature = keypair.sign(b"message1");
        let result = keypair.public_key().verify(b"message2", &signature);

        assert_eq!(result, Err(CryptoError::SignatureVerificationFailed));
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = Secp256k1KeyPair::from_bytes([0xABu8; 32]).unwrap();
        let message = b"deterministic test";

        let sig1 = keypair.sign(message);
        let sig2 = keypair.sign(message);

        assert_eq!(sig1.as_bytes(), sig2.as_bytes());
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let keypair = Secp256k1KeyPair::generate();
        let hex_key = keypair.public_key().to_hex();

        assert_eq!(hex_key.len(), 66);
        assert_eq!(
            Secp256k1PublicKey::from_hex(&hex_key).unwrap(),
            keypair.public_key()
        );
    }

    #[test]
    fn test_public_key_from_garbage_hex() {
        assert!(matches!(
            Secp256k1PublicKey::from_hex("zz"),
            Err(CryptoError::InvalidHex(_))
        ));
        assert_eq!(
            Secp256k1PublicKey::from_hex("02ab"),
            Err(CryptoError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let keypair = Secp256k1KeyPair::generate();
        let sig = keypair.sign(b"payload");

        let parsed = Secp256k1Signature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn test_roundtrip_bytes() {
        let original = Secp256k1KeyPair::generate();
        let bytes = original.to_bytes();
        let restored = Secp256k1KeyPair::from_bytes(bytes).unwrap();

        assert_eq!(original.public_key(), restored.public_key());
    }
}
