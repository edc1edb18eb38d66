//! Seal and open D2A events.

use shared_crypto::{conversation_key, open_sealed, seal, Secp256k1KeyPair, Secp256k1PublicKey};
use tracing::debug;

use super::envelope::{SignedEvent, D2A_EVENT_KIND, PROTOCOL_TAG, RECIPIENT_TAG};
use crate::domain::{ExchangeError, ExchangeMessage, Timestamp};

/// Encrypt `message` to its recipient and wrap it in a signed event.
///
/// # Errors
///
/// `InvalidPeerId` if the recipient is not a public key, `Encoding` for an
/// invalid payload or a sender that is not `author`, and `Crypto` for
/// local sealing failures.
pub fn seal_message(
    author: &Secp256k1KeyPair,
    message: &ExchangeMessage,
    created_at: Timestamp,
) -> Result<SignedEvent, ExchangeError> {
    let author_pubkey = author.public_key().to_hex();
    if message.from.as_str() != author_pubkey {
        return Err(ExchangeError::Encoding(
            "message sender does not match signing key".to_string(),
        ));
    }
    let recipient = message
        .to
        .to_public_key()
        .ok_or_else(|| ExchangeError::InvalidPeerId(message.to.as_str().to_string()))?;

    let plaintext = message.to_json()?;
    let key = conversation_key(author, &recipient)?;
    let sealed = seal(&key, plaintext.as_bytes())?;

    let tags = vec![
        vec![RECIPIENT_TAG.to_string(), message.to.as_str().to_string()],
        vec![
            PROTOCOL_TAG.to_string(),
            message.message_type().tag().to_string(),
        ],
    ];

    SignedEvent::sign(
        author,
        created_at.as_secs(),
        D2A_EVENT_KIND,
        tags,
        hex::encode(sealed),
    )
}

/// Verify, decrypt and validate an inbound event addressed to `local`.
///
/// Returns `None` for anything that is not a well-formed D2A message from
/// the event's author to `local`.
pub fn open_event(local: &Secp256k1KeyPair, event: &SignedEvent) -> Option<ExchangeMessage> {
    if event.kind != D2A_EVENT_KIND {
        debug!(kind = event.kind, "Ignoring non-D2A event");
        return None;
    }
    if !event.verify() {
        debug!(id = %event.id, "Dropping event with bad id or signature");
        return None;
    }

    let local_pubkey = local.public_key().to_hex();
    if event.recipient() != Some(local_pubkey.as_str()) {
        debug!(id = %event.id, "Dropping event addressed to another recipient");
        return None;
    }
    let Some(tagged_type) = event.message_type() else {
        debug!(id = %event.id, "Dropping event without protocol tag");
        return None;
    };

    let sender = Secp256k1PublicKey::from_hex(&event.pubkey).ok()?;
    let sealed = hex::decode(&event.content).ok()?;
    let plaintext = conversation_key(local, &sender)
        .and_then(|key| open_sealed(&key, &sealed))
        .map_err(|e| debug!(id = %event.id, error = %e, "Dropping undecryptable event"))
        .ok()?;
    let plaintext = String::from_utf8(plaintext).ok()?;
    let message = ExchangeMessage::parse(&plaintext)?;

    let consistent = message.message_type() == tagged_type
        && message.from.as_str() == event.pubkey
        && message.to.as_str() == local_pubkey;
    if !consistent {
        debug!(id = %event.id, "Dropping event with inconsistent envelope");
        return None;
    }
    Some(message)
}
