// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Transport
//!
//! In-memory implementation of the Transport trait for testing.

use std::collections::BTreeSet;
use std::time::Duration;

use parking_lot::Mutex;

use super::error::TransportError;
use super::transport::{PeerIdentity, Transport, TransportResult};

/// A datagram handed to the mock transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentFrame {
    pub peer: PeerIdentity,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct MockState {
    discovering: Option<String>,
    connected: BTreeSet<PeerIdentity>,
    sent: Vec<SentFrame>,
    invited: Vec<(PeerIdentity, Duration)>,
    accepted: Vec<PeerIdentity>,
    inject_error: Option<TransportError>,
}

/// Mock transport for testing.
///
/// Tracks every command issued by the coordinator. Connectivity is set by
/// the test with [`MockTransport::connect_peer`]; sends to peers not marked
/// connected fail with [`TransportError::NotConnected`].
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a peer as connected.
    pub fn connect_peer(&self, peer: &PeerIdentity) {
        self.state.lock().connected.insert(peer.clone());
    }

    /// Marks a peer as disconnected.
    pub fn disconnect_peer(&self, peer: &PeerIdentity) {
        self.state.lock().connected.remove(peer);
    }

    /// Injects an error to be returned by the next operation.
    pub fn inject_error(&self, error: TransportError) {
        self.state.lock().inject_error = Some(error);
    }

    /// Service type passed to the last `start_discovery`, if discovering.
    pub fn discovering(&self) -> Option<String> {
        self.state.lock().discovering.clone()
    }

    /// All frames sent so far.
    pub fn sent(&self) -> Vec<SentFrame> {
        self.state.lock().sent.clone()
    }

    /// Frames sent to one peer.
    pub fn sent_to(&self, peer: &PeerIdentity) -> Vec<Vec<u8>> {
        self.state
            .lock()
            .sent
            .iter()
            .filter(|frame| &frame.peer == peer)
            .map(|frame| frame.bytes.clone())
            .collect()
    }

    /// Removes and returns all frames sent so far.
    pub fn take_sent(&self) -> Vec<SentFrame> {
        std::mem::take(&mut self.state.lock().sent)
    }

    /// Peers invited so far, with the timeout used.
    pub fn invited(&self) -> Vec<(PeerIdentity, Duration)> {
        self.state.lock().invited.clone()
    }

    /// Peers whose invitations were accepted.
    pub fn accepted(&self) -> Vec<PeerIdentity> {
        self.state.lock().accepted.clone()
    }

    fn check_error(state: &mut MockState) -> TransportResult<()> {
        match state.inject_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Transport for MockTransport {
    fn start_discovery(&self, service_type: &str) -> TransportResult<()> {
        let mut state = self.state.lock();
        Self::check_error(&mut state)?;
        state.discovering = Some(service_type.to_string());
        Ok(())
    }

    fn stop_discovery(&self) {
        self.state.lock().discovering = None;
    }

    fn invite(&self, peer: &PeerIdentity, timeout: Duration) -> TransportResult<()> {
        let mut state = self.state.lock();
        Self::check_error(&mut state)?;
        state.invited.push((peer.clone(), timeout));
        Ok(())
    }

    fn accept(&self, peer: &PeerIdentity) -> TransportResult<()> {
        let mut state = self.state.lock();
        Self::check_error(&mut state)?;
        state.accepted.push(peer.clone());
        Ok(())
    }

    fn send(&self, peer: &PeerIdentity, bytes: &[u8]) -> TransportResult<()> {
        let mut state = self.state.lock();
        Self::check_error(&mut state)?;

        if !state.connected.contains(peer) {
            return Err(TransportError::NotConnected(peer.display_name().to_string()));
        }

        state.sent.push(SentFrame {
            peer: peer.clone(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_requires_connection() {
        let transport = MockTransport::new();
        let bob = PeerIdentity::new("p2", "Bob");

        assert_eq!(
            transport.send(&bob, b"hi"),
            Err(TransportError::NotConnected("Bob".into()))
        );

        transport.connect_peer(&bob);
        transport.send(&bob, b"hi").unwrap();
        assert_eq!(transport.sent_to(&bob), vec![b"hi".to_vec()]);
    }

    #[test]
    fn test_injected_error_is_one_shot() {
        let transport = MockTransport::new();
        transport.inject_error(TransportError::DiscoveryFailed("off".into()));

        assert!(transport.start_discovery("htw-cardtier").is_err());
        assert!(transport.start_discovery("htw-cardtier").is_ok());
        assert_eq!(transport.discovering().as_deref(), Some("htw-cardtier"));
    }

    #[test]
    fn test_take_sent_drains() {
        let transport = MockTransport::new();
        let bob = PeerIdentity::new("p2", "Bob");
        transport.connect_peer(&bob);
        transport.send(&bob, b"one").unwrap();

        assert_eq!(transport.take_sent().len(), 1);
        assert!(transport.sent().is_empty());
    }
}
