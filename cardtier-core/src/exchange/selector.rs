// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Closest-peer selection.

use crate::mesh::PeerIdentity;

/// The nearest peer and its distance in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestPeer {
    pub peer: PeerIdentity,
    pub distance: f32,
}

/// Minimum by distance. On ties the first sample encountered wins.
pub fn closest<'a, I>(samples: I) -> Option<ClosestPeer>
where
    I: IntoIterator<Item = (&'a PeerIdentity, f32)>,
{
    samples
        .into_iter()
        .fold(None::<(&PeerIdentity, f32)>, |best, (peer, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((peer, distance)),
        })
        .map(|(peer, distance)| ClosestPeer {
            peer: peer.clone(),
            distance,
        })
}
