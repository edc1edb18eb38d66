//! # Wire Protocol
//!
//! Encrypted, signed envelopes carrying [`ExchangeMessage`] plaintext.
//!
//! ```text
//! ExchangeMessage --to_json--> plaintext
//!   --ECDH(sender, recipient) + XChaCha20-Poly1305--> hex(nonce || ciphertext)
//!   --["p", recipient], ["t", "d2a-<type>"], sha256 id, ECDSA sig--> SignedEvent
//! ```
//!
//! [`open_event`] is the inbound boundary: every failure (bad id, bad
//! signature, wrong recipient, undecryptable content, invalid payload,
//! inconsistent type or sender) yields `None`. [`ReplayGuard`] then admits
//! each opened event once, and only while it is fresh.
//!
//! [`ExchangeMessage`]: crate::domain::ExchangeMessage

mod codec;
mod envelope;
mod replay;

pub use codec::{open_event, seal_message};
pub use envelope::{compute_event_id, SignedEvent, D2A_EVENT_KIND, PROTOCOL_TAG, RECIPIENT_TAG};
pub use replay::{ReplayGuard, ReplayRejection, DEFAULT_REPLAY_CAPACITY, MAX_FUTURE_SKEW_MS};
