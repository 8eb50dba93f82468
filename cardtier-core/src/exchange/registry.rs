// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Peer Registry
//!
//! Relates each connected peer to the ranging token it announced and the
//! latest distance sample for it. Entries never outlive the peer's
//! connection: the coordinator removes them on disconnect.

use std::collections::HashMap;

use super::selector::{closest, ClosestPeer};
use crate::mesh::PeerIdentity;
use crate::ranging::{RangingEngine, RangingError, RangingToken};

/// Peer ↔ token ↔ distance table.
#[derive(Debug, Default, Clone)]
pub struct PeerRegistry {
    tokens: HashMap<PeerIdentity, RangingToken>,
    distances: HashMap<PeerIdentity, f32>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) `peer`'s token and starts ranging against it.
    ///
    /// The token is kept even if the engine refuses it, so a later restart
    /// after suspension can retry.
    pub fn record_token(
        &mut self,
        peer: &PeerIdentity,
        token: RangingToken,
        engine: &dyn RangingEngine,
    ) -> Result<(), RangingError> {
        if let Some(previous) = self.tokens.insert(peer.clone(), token.clone()) {
            if previous != token {
                // Samples were measured against the old token.
                self.distances.remove(peer);
            }
        }
        engine.begin_ranging(&token)
    }

    /// Updates the sample of whichever peer owns `token`.
    ///
    /// Returns the peer, or `None` if no live peer owns the token (e.g. it
    /// disconnected after ranging started). Non-finite or negative
    /// distances are ignored.
    pub fn record_distance(&mut self, token: &RangingToken, distance: f32) -> Option<PeerIdentity> {
        if !distance.is_finite() || distance < 0.0 {
            return None;
        }
        let peer = self.peer_for_token(token)?.clone();
        self.distances.insert(peer.clone(), distance);
        Some(peer)
    }

    /// Drops every entry for `peer`. Returns true if anything was removed.
    pub fn remove_peer(&mut self, peer: &PeerIdentity) -> bool {
        let had_token = self.tokens.remove(peer).is_some();
        let had_distance = self.distances.remove(peer).is_some();
        had_token || had_distance
    }

    /// Drops all samples but keeps tokens, for a ranging session restart.
    pub fn clear_distances(&mut self) {
        self.distances.clear();
    }

    /// Restarts ranging for every known token.
    ///
    /// Returns the peers whose restart failed.
    pub fn restart_all(&self, engine: &dyn RangingEngine) -> Vec<(PeerIdentity, RangingError)> {
        self.tokens
            .iter()
            .filter_map(|(peer, token)| {
                engine
                    .begin_ranging(token)
                    .err()
                    .map(|err| (peer.clone(), err))
            })
            .collect()
    }

    /// First peer whose token equals `token`.
    pub fn peer_for_token(&self, token: &RangingToken) -> Option<&PeerIdentity> {
        self.tokens
            .iter()
            .find(|(_, known)| *known == token)
            .map(|(peer, _)| peer)
    }

    pub fn token(&self, peer: &PeerIdentity) -> Option<&RangingToken> {
        self.tokens.get(peer)
    }

    pub fn distance(&self, peer: &PeerIdentity) -> Option<f32> {
        self.distances.get(peer).copied()
    }

    pub fn contains(&self, peer: &PeerIdentity) -> bool {
        self.tokens.contains_key(peer) || self.distances.contains_key(peer)
    }

    /// Number of peers with a registered token.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.distances.is_empty()
    }

    /// All current samples.
    pub fn distances(&self) -> impl Iterator<Item = (&PeerIdentity, f32)> {
        self.distances.iter().map(|(peer, d)| (peer, *d))
    }

    /// Nearest peer over the current samples.
    pub fn closest(&self) -> Option<ClosestPeer> {
        closest(self.distances())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranging::MockRangingEngine;

    fn peer(n: u8) -> PeerIdentity {
        PeerIdentity::new(&format!("p{n}"), &format!("Peer {n}"))
    }

    fn token(n: u8) -> RangingToken {
        RangingToken::new(vec![n; 8])
    }

    #[test]
    fn test_record_token_starts_ranging() {
        let engine = MockRangingEngine::new();
        let mut registry = PeerRegistry::new();

        registry.record_token(&peer(1), token(1), &engine).unwrap();

        assert_eq!(engine.ranging_calls(), vec![token(1)]);
        assert_eq!(registry.token(&peer(1)), Some(&token(1)));
    }

    #[test]
    fn test_distance_resolves_through_token() {
        let engine = MockRangingEngine::new();
        let mut registry = PeerRegistry::new();
        registry.record_token(&peer(1), token(1), &engine).unwrap();

        assert_eq!(registry.record_distance(&token(1), 0.3), Some(peer(1)));
        assert_eq!(registry.distance(&peer(1)), Some(0.3));
    }

    #[test]
    fn test_unknown_token_is_ignored() {
        let mut registry = PeerRegistry::new();
        assert_eq!(registry.record_distance(&token(9), 0.3), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_distances_are_ignored() {
        let engine = MockRangingEngine::new();
        let mut registry = PeerRegistry::new();
        registry.record_token(&peer(1), token(1), &engine).unwrap();

        assert_eq!(registry.record_distance(&token(1), f32::NAN), None);
        assert_eq!(registry.record_distance(&token(1), -1.0), None);
        assert_eq!(registry.distance(&peer(1)), None);
    }

    #[test]
    fn test_remove_peer_clears_both_tables() {
        let engine = MockRangingEngine::new();
        let mut registry = PeerRegistry::new();
        registry.record_token(&peer(1), token(1), &engine).unwrap();
        registry.record_distance(&token(1), 1.0);

        assert!(registry.remove_peer(&peer(1)));
        assert!(!registry.contains(&peer(1)));
        assert_eq!(registry.record_distance(&token(1), 0.5), None);
        assert!(registry.closest().is_none());
    }

    #[test]
    fn test_new_token_discards_old_sample() {
        let engine = MockRangingEngine::new();
        let mut registry = PeerRegistry::new();
        registry.record_token(&peer(1), token(1), &engine).unwrap();
        registry.record_distance(&token(1), 1.0);

        registry.record_token(&peer(1), token(2), &engine).unwrap();

        assert_eq!(registry.distance(&peer(1)), None);
        assert_eq!(registry.peer_for_token(&token(1)), None);
    }

    #[test]
    fn test_token_kept_when_engine_refuses() {
        let engine = MockRangingEngine::unavailable();
        let mut registry = PeerRegistry::new();

        let result = registry.record_token(&peer(1), token(1), &engine);

        assert_eq!(result, Err(RangingError::Unavailable));
        assert_eq!(registry.token(&peer(1)), Some(&token(1)));
        assert_eq!(registry.restart_all(&engine).len(), 1);
    }
}
