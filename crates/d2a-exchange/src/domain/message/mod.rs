//! # Exchange Messages
//!
//! The closed set of D2A message types and the single parse boundary for
//! decrypted plaintext. Parsing never fails loudly: anything malformed is
//! `None` and the caller drops it.

// Semantic submodules
mod codec;
mod types;

// Re-export public API
pub use codec::ExchangeMessage;
pub use types::{
    CommentPayload, ContentScores, DeliverPayload, MessageBody, MessageType, OfferPayload,
    MAX_COMMENT_BYTES, MAX_OFFER_SCORE,
};
