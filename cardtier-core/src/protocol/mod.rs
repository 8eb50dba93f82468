// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Card Transfer Protocol
//!
//! Two message shapes travel over the mesh: a ranging-token announcement
//! and a card payload. Every frame carries a two-byte header:
//!
//! ```text
//! [0xCA magic][tag: 0x01 token | 0x02 card][body]
//! ```
//!
//! Token bodies are the raw token bytes; card bodies are the card's JSON
//! document. Frames without the header can still be read through the
//! legacy path (see [`legacy`]), which sniffs a token first and a bare
//! card second.
//!
//! Receipt is idempotent per card id through a [`SeenCards`] set.

mod dedup;
mod envelope;
mod error;
pub mod legacy;

pub use dedup::{InMemorySeenCards, SeenCards};
pub use envelope::{
    classify, decode_card, decode_token, encode_card, encode_token, CardEnvelope, Classified,
    EnvelopeCodec, ENVELOPE_MAGIC, HEADER_SIZE, MAX_MESSAGE_SIZE, TAG_CARD, TAG_RANGING_TOKEN,
};
pub use error::ProtocolError;
