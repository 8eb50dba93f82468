// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Protocol Error Types

use thiserror::Error;

/// Errors from encoding or strictly decoding envelopes.
///
/// Inbound classification never surfaces these; unreadable frames are
/// dropped as `Classified::Unrecognized`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Ranging token is empty")]
    EmptyToken,

    #[error("Malformed message: {0}")]
    Malformed(String),
}
