//! Signed event envelope.

use serde::{Deserialize, Serialize};
use shared_crypto::{sha256_hex, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};

use crate::domain::{ExchangeError, MessageType};

/// Event kind reserved for D2A messages.
pub const D2A_EVENT_KIND: u32 = 21078;

/// Tag naming the recipient's pubkey.
pub const RECIPIENT_TAG: &str = "p";

/// Tag naming the message subtype (`d2a-offer`, ...).
pub const PROTOCOL_TAG: &str = "t";

/// Signed, encrypted envelope as published to relays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEvent {
    /// Hex SHA-256 of the canonical serialization
    pub id: String,
    /// Author pubkey (hex, compressed secp256k1)
    pub pubkey: String,
    /// Creation time, seconds since the epoch
    pub created_at: u64,
    /// Always [`D2A_EVENT_KIND`] for this protocol
    pub kind: u32,
    /// `[name, value]` pairs
    pub tags: Vec<Vec<String>>,
    /// Hex of `nonce || ciphertext`
    pub content: String,
    /// Hex ECDSA signature over the id bytes
    pub sig: String,
}

/// Hex SHA-256 of `[0, pubkey, created_at, kind, tags, content]`.
pub fn compute_event_id(
    pubkey: &str,
    created_at: u64,
    kind: u32,
    tags: &[Vec<String>],
    content: &str,
) -> Result<String, ExchangeError> {
    let canonical = serde_json::to_string(&(0u8, pubkey, created_at, kind, tags, content))
        .map_err(|e| ExchangeError::Encoding(e.to_string()))?;
    Ok(sha256_hex(canonical.as_bytes()))
}

impl SignedEvent {
    /// Build, hash and sign an event authored by `author`.
    pub fn sign(
        author: &Secp256k1KeyPair,
        created_at: u64,
        kind: u32,
        tags: Vec<Vec<String>>,
        content: String,
    ) -> Result<Self, ExchangeError> {
        let pubkey = author.public_key().to_hex();
        let id = compute_event_id(&pubkey, created_at, kind, &tags, &content)?;
        let id_bytes = hex::decode(&id).map_err(|e| ExchangeError::Encoding(e.to_string()))?;
        let sig = author.sign(&id_bytes).to_hex();

        Ok(Self {
            id,
            pubkey,
            created_at,
            kind,
            tags,
            content,
            sig,
        })
    }

    /// Whether the id matches the content and the signature matches the author.
    pub fn verify(&self) -> bool {
        let Ok(expected) = compute_event_id(
            &self.pubkey,
            self.created_at,
            self.kind,
            &self.tags,
            &self.content,
        ) else {
            return false;
        };
        if expected != self.id {
            return false;
        }

        let (Ok(author), Ok(sig), Ok(id_bytes)) = (
            Secp256k1PublicKey::from_hex(&self.pubkey),
            Secp256k1Signature::from_hex(&self.sig),
            hex::decode(&self.id),
        ) else {
            return false;
        };
        author.verify(&id_bytes, &sig).is_ok()
    }

    /// First value of the tag called `name`.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.first().map(String::as_str) == Some(name))
            .and_then(|t| t.get(1))
            .map(String::as_str)
    }

    /// Recipient named by the `p` tag.
    pub fn recipient(&self) -> Option<&str> {
        self.tag_value(RECIPIENT_TAG)
    }

    /// Message type named by the protocol tag.
    pub fn message_type(&self) -> Option<MessageType> {
        self.tags
            .iter()
            .filter(|t| t.first().map(String::as_str) == Some(PROTOCOL_TAG))
            .filter_map(|t| t.get(1))
            .find_map(|v| MessageType::from_tag(v))
    }
}
