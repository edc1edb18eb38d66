//! Plaintext JSON codec: `{ type, fromPubkey, toPubkey, payload }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::types::{CommentPayload, DeliverPayload, MessageBody, MessageType, OfferPayload};
use crate::domain::{ExchangeError, PeerId};

/// A decrypted D2A message.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeMessage {
    /// Sender
    pub from: PeerId,
    /// Intended recipient
    pub to: PeerId,
    /// Type-specific content
    pub body: MessageBody,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    #[serde(rename = "type")]
    kind: String,
    from_pubkey: String,
    to_pubkey: String,
    #[serde(default)]
    payload: Value,
}

impl ExchangeMessage {
    /// Build a message.
    pub fn new(from: PeerId, to: PeerId, body: MessageBody) -> Self {
        Self { from, to, body }
    }

    /// Discriminator of the body.
    pub fn message_type(&self) -> MessageType {
        self.body.message_type()
    }

    /// Encode as plaintext JSON. Invalid payloads are refused so that this
    /// side never emits what a compliant peer would drop.
    pub fn to_json(&self) -> Result<String, ExchangeError> {
        if !self.body.is_valid() {
            return Err(ExchangeError::Encoding(format!(
                "invalid {} payload",
                self.message_type()
            )));
        }

        let payload = match &self.body {
            MessageBody::Offer(p) => serde_json::to_value(p),
            MessageBody::Accept | MessageBody::Reject => Ok(Value::Object(Default::default())),
            MessageBody::Deliver(p) => serde_json::to_value(p),
            MessageBody::Comment(p) => serde_json::to_value(p),
        }
        .map_err(|e| ExchangeError::Encoding(e.to_string()))?;

        let wire = WireMessage {
            kind: self.message_type().as_str().to_string(),
            from_pubkey: self.from.as_str().to_string(),
            to_pubkey: self.to.as_str().to_string(),
            payload,
        };
        serde_json::to_string(&wire).map_err(|e| ExchangeError::Encoding(e.to_string()))
    }

    /// Parse and validate plaintext. `None` for anything malformed.
    pub fn parse(plaintext: &str) -> Option<Self> {
        let wire: WireMessage = match serde_json::from_str(plaintext) {
            Ok(wire) => wire,
            Err(e) => {
                debug!(error = %e, "Dropping message with unreadable plaintext");
                return None;
            }
        };

        let from = PeerId::new(wire.from_pubkey).ok()?;
        let to = PeerId::new(wire.to_pubkey).ok()?;
        let Some(kind) = MessageType::parse(&wire.kind) else {
            debug!(kind = %wire.kind, "Dropping message of unknown type");
            return None;
        };

        let body = match kind {
            MessageType::Offer => MessageBody::Offer(payload_as::<OfferPayload>(wire.payload)?),
            MessageType::Accept if is_empty_payload(&wire.payload) => MessageBody::Accept,
            MessageType::Reject if is_empty_payload(&wire.payload) => MessageBody::Reject,
            MessageType::Accept | MessageType::Reject => return None,
            MessageType::Deliver => {
                MessageBody::Deliver(payload_as::<DeliverPayload>(wire.payload)?)
            }
            MessageType::Comment => {
                MessageBody::Comment(payload_as::<CommentPayload>(wire.payload)?)
            }
        };

        if !body.is_valid() {
            debug!(kind = %kind, "Dropping message with invalid payload");
            return None;
        }
        Some(Self { from, to, body })
    }
}

/// Accept and reject carry nothing; `{}`, `null` and an absent payload all
/// qualify.
fn is_empty_payload(payload: &Value) -> bool {
    payload.is_null() || payload.is_object()
}

fn payload_as<P: for<'de> Deserialize<'de>>(payload: Value) -> Option<P> {
    serde_json::from_value(payload)
        .map_err(|e| debug!(error = %e, "Dropping message with malformed payload"))
        .ok()
}
