//! # Domain Value Objects
//!
//! Immutable value types shared by every D2A component.

use serde::{Deserialize, Serialize};
use shared_crypto::Secp256k1PublicKey;

use super::errors::ExchangeError;

/// Wall-clock instant in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create from milliseconds since the epoch.
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Create from whole seconds since the epoch.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    /// Milliseconds since the epoch.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Whole seconds since the epoch.
    pub const fn as_secs(&self) -> u64 {
        self.0 / 1_000
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub const fn millis_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Shift forward by `millis`.
    #[must_use]
    pub const fn plus_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Shift backward by `millis`, clamping at the epoch.
    #[must_use]
    pub const fn minus_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}

/// Opaque agent identity: the hex-encoded public key of a peer or of the
/// local publisher.
///
/// Never empty. Construction trims nothing and rejects blank input so that
/// two ledgers can never disagree about what the "empty" key means.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeerId(String);

impl PeerId {
    /// Validate and wrap an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ExchangeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ExchangeError::InvalidPeerId(id));
        }
        Ok(Self(id))
    }

    /// Identity of the holder of `key`.
    pub fn from_public_key(key: &Secp256k1PublicKey) -> Self {
        Self(key.to_hex())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode as a secp256k1 public key, if it is one.
    pub fn to_public_key(&self) -> Option<Secp256k1PublicKey> {
        Secp256k1PublicKey::from_hex(&self.0).ok()
    }
}

impl TryFrom<String> for PeerId {
    type Error = ExchangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PeerId> for String {
    fn from(value: PeerId) -> Self {
        value.0
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Community verdict attached to delivered content and used to settle a
/// peer's reputation after a handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Content was worth the exchange.
    Quality,
    /// Content was low-effort or spam.
    Slop,
}

impl Verdict {
    /// Wire literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Slop => "slop",
        }
    }
}
