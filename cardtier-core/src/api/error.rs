// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for applications embedding the exchange core.

use thiserror::Error;

use super::config::ConfigError;
use crate::card::CardError;
use crate::exchange::ExchangeError;
use crate::identity::IdentityError;
use crate::mesh::TransportError;
use crate::protocol::ProtocolError;
use crate::ranging::RangingError;

/// Unified error type for Cardtier operations.
#[derive(Error, Debug)]
pub enum CardtierError {
    /// Card exchange failed.
    #[error("exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    /// Card validation failed.
    #[error("card error: {0}")]
    Card(#[from] CardError),

    /// Transport operation failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Ranging operation failed.
    #[error("ranging error: {0}")]
    Ranging(#[from] RangingError),

    /// Encoding failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Configuration rejected.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Local identity could not be loaded or saved.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),
}

/// Result type for Cardtier operations.
pub type CardtierResult<T> = Result<T, CardtierError>;
