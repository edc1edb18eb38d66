//! Message types and payload validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_crypto::blake3_hash;

use crate::domain::{Timestamp, Verdict};

/// Hard wire limit on comment text, in UTF-8 bytes.
pub const MAX_COMMENT_BYTES: usize = 280;

/// Upper bound of an offer's quality score.
pub const MAX_OFFER_SCORE: f64 = 10.0;

/// Message discriminator, carried both inside the plaintext and in the
/// envelope's protocol tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Propose a piece of content
    Offer,
    /// Agree to receive the offered content
    Accept,
    /// Decline the offer
    Reject,
    /// Hand over the full content
    Deliver,
    /// Side-channel remark on delivered content
    Comment,
}

impl MessageType {
    /// All message types.
    pub const ALL: [MessageType; 5] = [
        Self::Offer,
        Self::Accept,
        Self::Reject,
        Self::Deliver,
        Self::Comment,
    ];

    /// Plaintext `type` literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Deliver => "deliver",
            Self::Comment => "comment",
        }
    }

    /// Envelope protocol tag value.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Offer => "d2a-offer",
            Self::Accept => "d2a-accept",
            Self::Reject => "d2a-reject",
            Self::Deliver => "d2a-deliver",
            Self::Comment => "d2a-comment",
        }
    }

    /// Inverse of [`MessageType::tag`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Inverse of [`MessageType::as_str`].
    pub fn parse(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == literal)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offer: topic, quality score and a short preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPayload {
    /// Topic the content is about
    pub topic: String,
    /// Quality score in `[0, 10]`
    pub score: f64,
    /// Teaser shown before accepting
    #[serde(default)]
    pub content_preview: String,
}

impl OfferPayload {
    /// Whether every required field is present and in range.
    pub fn is_valid(&self) -> bool {
        !self.topic.trim().is_empty()
            && self.score.is_finite()
            && (0.0..=MAX_OFFER_SCORE).contains(&self.score)
    }
}

/// Per-axis quality scores of delivered content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentScores {
    /// Novelty
    pub originality: f64,
    /// Depth
    pub insight: f64,
    /// Sourcing
    pub credibility: f64,
    /// Blended score
    pub composite: f64,
}

impl ContentScores {
    fn is_valid(&self) -> bool {
        [self.originality, self.insight, self.credibility, self.composite]
            .iter()
            .all(|s| s.is_finite())
    }
}

/// Deliver: the full content and its assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverPayload {
    /// Full content text
    pub text: String,
    /// Per-axis scores
    pub scores: ContentScores,
    /// Quality or slop
    pub verdict: Verdict,
    /// Topics the content covers
    #[serde(default)]
    pub topics: Vec<String>,
    /// Optional extended signal score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_signal: Option<f64>,
    /// Optional context score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_context: Option<f64>,
    /// Optional slop likelihood
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_slop: Option<f64>,
}

impl DeliverPayload {
    /// Whether every required field is present and every score finite.
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
            && self.scores.is_valid()
            && [self.v_signal, self.c_context, self.l_slop]
                .iter()
                .flatten()
                .all(|s| s.is_finite())
    }

    /// Hex BLAKE3 of the text. Comments refer to delivered content by it.
    pub fn content_hash(&self) -> String {
        hex::encode(blake3_hash(self.text.as_bytes()))
    }
}

/// Comment on content that was already delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    /// Hash identifying the delivered content
    pub content_hash: String,
    /// Title of the content, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_title: Option<String>,
    /// Comment text, at most 280 bytes
    pub comment: String,
    /// Authoring time
    pub timestamp: Timestamp,
}

impl CommentPayload {
    /// Whether the hash and text are present and the text fits the wire limit.
    pub fn is_valid(&self) -> bool {
        !self.content_hash.is_empty()
            && !self.comment.trim().is_empty()
            && self.comment.len() <= MAX_COMMENT_BYTES
    }
}

/// Type-specific message content.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// See [`OfferPayload`]
    Offer(OfferPayload),
    /// No payload
    Accept,
    /// No payload
    Reject,
    /// See [`DeliverPayload`]
    Deliver(DeliverPayload),
    /// See [`CommentPayload`]
    Comment(CommentPayload),
}

impl MessageBody {
    /// Discriminator of this body.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Offer(_) => MessageType::Offer,
            Self::Accept => MessageType::Accept,
            Self::Reject => MessageType::Reject,
            Self::Deliver(_) => MessageType::Deliver,
            Self::Comment(_) => MessageType::Comment,
        }
    }

    /// Whether the payload passes validation.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Offer(p) => p.is_valid(),
            Self::Accept | Self::Reject => true,
            Self::Deliver(p) => p.is_valid(),
            Self::Comment(p) => p.is_valid(),
        }
    }
}
