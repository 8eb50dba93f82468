// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Untagged frames.
//!
//! Fallback form without the envelope header: the bare token or the bare
//! card document, with nothing to tell them apart. A token is a
//! length-prefixed byte string (8-byte little-endian length, then the
//! bytes, nothing after); a card is its JSON document. Readers try the
//! token form first. Disable with `accept_untagged` once every peer sends
//! tagged frames.

use bincode::Options;

use super::envelope::Classified;
use super::error::ProtocolError;
use crate::card::Card;
use crate::ranging::RangingToken;

fn token_options(limit: usize) -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(limit as u64)
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encodes a token in the untagged form.
pub fn encode_token(token: &RangingToken) -> Result<Vec<u8>, ProtocolError> {
    if token.is_empty() {
        return Err(ProtocolError::EmptyToken);
    }
    token_options(usize::MAX)
        .serialize(token.as_bytes())
        .map_err(|e| ProtocolError::Serialization(e.to_string()))
}

/// Decodes an untagged token. The length prefix must cover the rest of
/// the frame exactly.
pub fn decode_token(bytes: &[u8], limit: usize) -> Option<RangingToken> {
    token_options(limit)
        .deserialize::<Vec<u8>>(bytes)
        .ok()
        .filter(|raw| !raw.is_empty())
        .map(RangingToken::new)
}

/// Encodes a card as a bare JSON document.
pub fn encode_card(card: &Card) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(card).map_err(|e| ProtocolError::Serialization(e.to_string()))
}

/// Decodes a bare JSON card document.
pub fn decode_card(bytes: &[u8]) -> Option<Card> {
    serde_json::from_slice(bytes).ok()
}

/// Token first, then card, else unrecognized.
pub fn sniff(bytes: &[u8], limit: usize) -> Classified {
    if let Some(token) = decode_token(bytes, limit) {
        return Classified::Token(token);
    }
    match decode_card(bytes) {
        Some(card) => Classified::Card(card),
        None => Classified::Unrecognized,
    }
}
