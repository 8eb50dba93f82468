// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-peer exchange state.

/// Where a peer is in the exchange lifecycle.
///
/// ```text
/// Discovered → Connecting → Connected → Ranging → Disconnected
/// ```
///
/// `Connected` means the session is up and we are waiting for the peer's
/// ranging token; `Ranging` means its token has been registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    Discovered,
    Connecting,
    Connected,
    Ranging,
    Disconnected,
}

impl PeerState {
    /// True while the transport session with the peer is up.
    pub fn is_connected(&self) -> bool {
        matches!(self, PeerState::Connected | PeerState::Ranging)
    }

    /// True before a session has been established.
    pub fn is_pending(&self) -> bool {
        matches!(self, PeerState::Discovered | PeerState::Connecting)
    }
}
