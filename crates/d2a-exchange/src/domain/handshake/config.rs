//! Handshake configuration.

/// Fixed handshake timeout in milliseconds.
pub const HANDSHAKE_TIMEOUT_MS: u64 = 30_000;

/// Configuration for handshake expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeConfig {
    /// Age after which a handshake is expired, in milliseconds
    pub timeout_ms: u64,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: HANDSHAKE_TIMEOUT_MS,
        }
    }
}
