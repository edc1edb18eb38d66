//! # ECDH Conversation Keys
//!
//! Two agents derive the same symmetric key from their own secret key and the
//! other side's public key. The raw x-coordinate of the shared point is never
//! used directly; it is passed through BLAKE3's key-derivation mode under a
//! fixed context string.

use crate::ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey};
use crate::hashing::blake3_derive_key;
use crate::symmetric::SecretKey;
use crate::CryptoError;
use k256::ecdh::diffie_hellman;

/// BLAKE3 derive-key context for D2A conversation keys.
pub const CONVERSATION_KEY_CONTEXT: &str = "d2a conversation key v1";

/// Derive the symmetric key shared between `ours` and `theirs`.
///
/// `conversation_key(a, B) == conversation_key(b, A)` for any two keypairs.
///
/// # Errors
///
/// Returns `CryptoError::InvalidPublicKey` if `theirs` is not a curve point.
pub fn conversation_key(
    ours: &Secp256k1KeyPair,
    theirs: &Secp256k1PublicKey,
) -> Result<SecretKey, CryptoError> {
    let point = theirs.to_curve_point()?;
    let shared = diffie_hellman(ours.signing_key().as_nonzero_scalar(), point.as_affine());
    let key = blake3_derive_key(CONVERSATION_KEY_CONTEXT, shared.raw_secret_bytes().as_slice());
    Ok(SecretKey::from_bytes(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetric::{open_sealed, seal};

    #[test]
    fn test_conversation_key_is_symmetric() {
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();

        let k_ab = conversation_key(&alice, &bob.public_key()).unwrap();
        let k_ba = conversation_key(&bob, &alice.public_key()).unwrap();

        assert_eq!(k_ab.as_bytes(), k_ba.as_bytes());
    }

    #[test]
    fn test_third_party_derives_different_key() {
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();
        let mallory = Secp256k1KeyPair::generate();

        let k_ab = conversation_key(&alice, &bob.public_key()).unwrap();
        let k_mb = conversation_key(&mallory, &alice.public_key()).unwrap();

        assert_ne!(k_ab.as_bytes(), k_mb.as_bytes());
    }

    #[test]
    fn test_sealed_message_between_agents() {
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();

        let send_key = conversation_key(&alice, &bob.public_key()).unwrap();
        let sealed = seal(&send_key, b"{\"type\":\"accept\"}").unwrap();

        let recv_key = conversation_key(&bob, &alice.public_key()).unwrap();
        assert_eq!(
            open_sealed(&recv_key, &sealed).unwrap(),
            b"{\"type\":\"accept\"}"
        );
    }
}
