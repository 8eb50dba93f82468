// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exchange Error Types

use thiserror::Error;

use crate::api::ConfigError;
use crate::card::CardError;
use crate::mesh::TransportError;
use crate::protocol::ProtocolError;

/// Errors surfaced by the exchange coordinator.
///
/// Inbound problems (bad frames, duplicate cards, ranging hiccups) are
/// logged and never appear here; only outbound operations fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Invalid card: {0}")]
    InvalidCard(#[from] CardError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("No peer in range")]
    NoPeerInRange,
}
