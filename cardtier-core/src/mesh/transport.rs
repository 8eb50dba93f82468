// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transport Trait

use std::fmt;
use std::time::Duration;

use super::error::TransportError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// A remote participant on the mesh.
///
/// Stable for the lifetime of one transport session. `id` is the
/// transport-level handle; `display_name` is what the peer advertises.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerIdentity {
    id: String,
    display_name: String,
}

impl PeerIdentity {
    /// Creates a peer identity.
    pub fn new(id: &str, display_name: &str) -> Self {
        PeerIdentity {
            id: id.to_string(),
            display_name: display_name.to_string(),
        }
    }

    /// Transport-level identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Advertised display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// Session-level connection state of one peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Connected,
    Disconnected,
}

/// Events reported by the platform transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Browsing found an advertising peer.
    PeerFound(PeerIdentity),
    /// A previously found peer stopped advertising.
    PeerLost(PeerIdentity),
    /// A peer invited us into its session.
    InvitationReceived(PeerIdentity),
    /// Session state of a peer changed.
    PeerStateChanged {
        peer: PeerIdentity,
        state: SessionState,
    },
    /// A datagram arrived from a peer.
    BytesReceived { peer: PeerIdentity, bytes: Vec<u8> },
    /// Advertising or browsing could not start.
    DiscoveryFailed(String),
}

/// Transport trait for the local mesh.
///
/// Implementations wrap the platform's peer-to-peer session. All methods
/// return promptly; outcomes that arrive later (connections, received
/// bytes) are reported as [`TransportEvent`]s through the event queue the
/// implementation was given, on whatever thread the platform uses.
///
/// # Example
///
/// ```ignore
/// use cardtier_core::mesh::{MockTransport, PeerIdentity, Transport};
///
/// let transport = MockTransport::new();
/// transport.start_discovery("htw-cardtier")?;
///
/// let bob = PeerIdentity::new("peer-2", "Bob-1A2B3");
/// transport.connect_peer(&bob);
/// transport.send(&bob, b"hello")?;
/// assert_eq!(transport.sent_to(&bob).len(), 1);
/// ```
pub trait Transport: Send + Sync {
    /// Starts advertising and browsing under `service_type`.
    ///
    /// Errors are informational; the platform keeps retrying passively.
    fn start_discovery(&self, service_type: &str) -> TransportResult<()>;

    /// Stops advertising and browsing. Safe to call when not started.
    fn stop_discovery(&self);

    /// Invites a discovered peer into our session.
    fn invite(&self, peer: &PeerIdentity, timeout: Duration) -> TransportResult<()>;

    /// Accepts an invitation received from `peer`.
    fn accept(&self, peer: &PeerIdentity) -> TransportResult<()>;

    /// Sends one reliable datagram to a connected peer.
    ///
    /// Fails if the peer is no longer connected. No retry happens here.
    fn send(&self, peer: &PeerIdentity, bytes: &[u8]) -> TransportResult<()>;
}
