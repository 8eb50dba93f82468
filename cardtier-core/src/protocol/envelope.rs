// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Envelope framing and classification.

use super::error::ProtocolError;
use super::legacy;
use crate::card::Card;
use crate::ranging::RangingToken;

/// First byte of every tagged frame.
pub const ENVELOPE_MAGIC: u8 = 0xCA;

/// Tag for a ranging-token announcement.
pub const TAG_RANGING_TOKEN: u8 = 0x01;

/// Tag for a card payload.
pub const TAG_CARD: u8 = 0x02;

/// Magic byte plus tag byte.
pub const HEADER_SIZE: usize = 2;

/// Default maximum frame size (8 MB). Cards inline their logos.
pub const MAX_MESSAGE_SIZE: usize = 8 * 1_048_576;

/// A message carried over the mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum CardEnvelope {
    RangingToken(RangingToken),
    Card(Card),
}

/// Outcome of classifying an inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Token(RangingToken),
    Card(Card),
    /// Neither a token nor a card; dropped without error.
    Unrecognized,
}

impl From<CardEnvelope> for Classified {
    fn from(envelope: CardEnvelope) -> Self {
        match envelope {
            CardEnvelope::RangingToken(token) => Classified::Token(token),
            CardEnvelope::Card(card) => Classified::Card(card),
        }
    }
}

/// Frame encoder/decoder with size and compatibility settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeCodec {
    max_message_size: usize,
    accept_untagged: bool,
}

impl Default for EnvelopeCodec {
    fn default() -> Self {
        EnvelopeCodec::new(MAX_MESSAGE_SIZE, true)
    }
}

impl EnvelopeCodec {
    /// Creates a codec.
    ///
    /// With `accept_untagged`, frames lacking the header are sniffed the
    /// legacy way: token first, then bare card JSON.
    pub fn new(max_message_size: usize, accept_untagged: bool) -> Self {
        EnvelopeCodec {
            max_message_size,
            accept_untagged,
        }
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    /// Serializes an envelope into a tagged frame.
    pub fn encode(&self, envelope: &CardEnvelope) -> Result<Vec<u8>, ProtocolError> {
        match envelope {
            CardEnvelope::RangingToken(token) => self.encode_token(token),
            CardEnvelope::Card(card) => self.encode_card(card),
        }
    }

    /// Frames a ranging-token announcement.
    pub fn encode_token(&self, token: &RangingToken) -> Result<Vec<u8>, ProtocolError> {
        if token.is_empty() {
            return Err(ProtocolError::EmptyToken);
        }
        self.frame(TAG_RANGING_TOKEN, token.as_bytes())
    }

    /// Frames a card payload.
    pub fn encode_card(&self, card: &Card) -> Result<Vec<u8>, ProtocolError> {
        let body =
            serde_json::to_vec(card).map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        self.frame(TAG_CARD, &body)
    }

    fn frame(&self, tag: u8, body: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        let size = HEADER_SIZE + body.len();
        if size > self.max_message_size {
            return Err(ProtocolError::MessageTooLarge {
                size,
                max: self.max_message_size,
            });
        }

        let mut frame = Vec::with_capacity(size);
        frame.push(ENVELOPE_MAGIC);
        frame.push(tag);
        frame.extend_from_slice(body);
        Ok(frame)
    }

    /// Strictly decodes a tagged frame.
    pub fn decode(&self, bytes: &[u8]) -> Result<CardEnvelope, ProtocolError> {
        if bytes.len() > self.max_message_size {
            return Err(ProtocolError::MessageTooLarge {
                size: bytes.len(),
                max: self.max_message_size,
            });
        }

        let (tag, body) = match bytes {
            [ENVELOPE_MAGIC, tag, body @ ..] => (*tag, body),
            _ => return Err(ProtocolError::Malformed("missing envelope header".into())),
        };

        match tag {
            TAG_RANGING_TOKEN if body.is_empty() => Err(ProtocolError::EmptyToken),
            TAG_RANGING_TOKEN => Ok(CardEnvelope::RangingToken(RangingToken::new(
                body.to_vec(),
            ))),
            TAG_CARD => serde_json::from_slice(body)
                .map(CardEnvelope::Card)
                .map_err(|e| ProtocolError::Malformed(e.to_string())),
            other => Err(ProtocolError::Malformed(format!(
                "unknown envelope tag 0x{other:02X}"
            ))),
        }
    }

    /// Classifies an inbound frame. Never fails.
    ///
    /// Tagged frames are judged by their tag alone. Untagged frames go
    /// through the legacy sniff when enabled.
    pub fn classify(&self, bytes: &[u8]) -> Classified {
        if bytes.len() > self.max_message_size {
            return Classified::Unrecognized;
        }

        if has_header(bytes) {
            return self
                .decode(bytes)
                .map(Classified::from)
                .unwrap_or(Classified::Unrecognized);
        }

        if self.accept_untagged {
            legacy::sniff(bytes, self.max_message_size)
        } else {
            Classified::Unrecognized
        }
    }
}

fn has_header(bytes: &[u8]) -> bool {
    matches!(
        bytes,
        [ENVELOPE_MAGIC, TAG_RANGING_TOKEN | TAG_CARD, ..]
    )
}

/// Encodes a ranging-token announcement.
pub fn encode_token(token: &RangingToken) -> Result<Vec<u8>, ProtocolError> {
    EnvelopeCodec::default().encode_token(token)
}

/// Decodes a tagged ranging-token announcement.
pub fn decode_token(bytes: &[u8]) -> Option<RangingToken> {
    match EnvelopeCodec::default().decode(bytes) {
        Ok(CardEnvelope::RangingToken(token)) => Some(token),
        _ => None,
    }
}

/// Encodes a card payload.
pub fn encode_card(card: &Card) -> Result<Vec<u8>, ProtocolError> {
    EnvelopeCodec::default().encode_card(card)
}

/// Decodes a tagged card payload.
pub fn decode_card(bytes: &[u8]) -> Option<Card> {
    match EnvelopeCodec::default().decode(bytes) {
        Ok(CardEnvelope::Card(card)) => Some(card),
        _ => None,
    }
}

/// Classifies a frame with the default codec.
pub fn classify(bytes: &[u8]) -> Classified {
    EnvelopeCodec::default().classify(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> RangingToken {
        RangingToken::new(vec![7u8; 24])
    }

    #[test]
    fn test_token_frame_layout() {
        let frame = encode_token(&token()).unwrap();

        assert_eq!(frame[0], ENVELOPE_MAGIC);
        assert_eq!(frame[1], TAG_RANGING_TOKEN);
        assert_eq!(&frame[HEADER_SIZE..], token().as_bytes());
    }

    #[test]
    fn test_card_frame_body_is_json() {
        let card = Card::new("Alice");
        let frame = encode_card(&card).unwrap();

        assert_eq!(frame[1], TAG_CARD);
        let json: serde_json::Value = serde_json::from_slice(&frame[HEADER_SIZE..]).unwrap();
        assert_eq!(json["name"], "Alice");
    }

    #[test]
    fn test_empty_token_is_rejected_both_ways() {
        assert_eq!(
            encode_token(&RangingToken::new(Vec::new())),
            Err(ProtocolError::EmptyToken)
        );
        assert_eq!(decode_token(&[ENVELOPE_MAGIC, TAG_RANGING_TOKEN]), None);
    }

    #[test]
    fn test_decoders_do_not_cross_over() {
        let token_frame = encode_token(&token()).unwrap();
        let card_frame = encode_card(&Card::new("Alice")).unwrap();

        assert!(decode_card(&token_frame).is_none());
        assert!(decode_token(&card_frame).is_none());
    }

    #[test]
    fn test_unknown_tag_is_unrecognized() {
        let result = EnvelopeCodec::default().decode(&[ENVELOPE_MAGIC, 0x7F, 1, 2, 3]);
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
        assert_eq!(
            classify(&[ENVELOPE_MAGIC, 0x7F, 1, 2, 3]),
            Classified::Unrecognized
        );
    }

    #[test]
    fn test_tagged_card_with_bad_json_is_not_sniffed() {
        let mut frame = vec![ENVELOPE_MAGIC, TAG_CARD];
        frame.extend_from_slice(b"{not json");

        assert_eq!(classify(&frame), Classified::Unrecognized);
    }

    #[test]
    fn test_oversized_frames() {
        let codec = EnvelopeCodec::new(16, true);

        let result = codec.encode(&CardEnvelope::RangingToken(RangingToken::new(vec![1; 15])));
        assert_eq!(
            result,
            Err(ProtocolError::MessageTooLarge { size: 17, max: 16 })
        );

        let mut frame = vec![ENVELOPE_MAGIC, TAG_RANGING_TOKEN];
        frame.extend_from_slice(&[1; 15]);
        assert_eq!(codec.classify(&frame), Classified::Unrecognized);
    }

    #[test]
    fn test_untagged_frames_need_legacy_mode() {
        let bare_card = serde_json::to_vec(&Card::new("Alice")).unwrap();

        let strict = EnvelopeCodec::new(MAX_MESSAGE_SIZE, false);
        assert_eq!(strict.classify(&bare_card), Classified::Unrecognized);

        let lenient = EnvelopeCodec::default();
        assert!(matches!(lenient.classify(&bare_card), Classified::Card(_)));
    }

    #[test]
    fn test_empty_input_is_unrecognized() {
        assert_eq!(classify(&[]), Classified::Unrecognized);
    }
}
