// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transport Error Types

use thiserror::Error;

/// Errors reported by the mesh transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Peer not connected: {0}")]
    NotConnected(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Discovery failed to start: {0}")]
    DiscoveryFailed(String),

    #[error("Invitation failed: {0}")]
    InvitationFailed(String),

    #[error("Session closed")]
    Closed,
}
