// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ranging Engine Trait

use std::fmt;

use thiserror::Error;

/// Ranging errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangingError {
    #[error("Ranging not available on this device")]
    Unavailable,

    #[error("Invalid ranging token")]
    InvalidToken,

    #[error("Ranging session invalidated: {0}")]
    SessionInvalidated(String),
}

/// Opaque "how to range me" credential.
///
/// Produced once by the local engine and sent to every peer after it
/// connects. Tokens are never persisted across peer sessions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RangingToken(Vec<u8>);

impl RangingToken {
    /// Wraps raw token bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        RangingToken(bytes)
    }

    /// Raw token bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the token, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short hex fingerprint for logs.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..self.0.len().min(6)])
    }
}

impl fmt::Debug for RangingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangingToken({}, {} bytes)", self.fingerprint(), self.0.len())
    }
}

/// Events reported by the platform ranging engine.
#[derive(Debug, Clone, PartialEq)]
pub enum RangingEvent {
    /// New distance estimate, in meters, for the peer owning `token`.
    DistanceUpdated { token: RangingToken, distance: f32 },
    /// The platform tore the session down (e.g. app backgrounded).
    Invalidated { reason: String },
    /// The session is paused; samples stop until it resumes.
    Suspended,
    /// The session resumed after a suspension.
    SuspensionEnded,
}

/// Ranging engine trait.
///
/// Implementations wrap the platform's ranging session and report
/// [`RangingEvent`]s through the coordinator's event queue.
pub trait RangingEngine: Send + Sync {
    /// The local token. Stable until [`RangingEngine::reset`] is called.
    fn local_token(&self) -> RangingToken;

    /// Starts (or restarts) ranging against the peer owning `peer_token`.
    ///
    /// Calling this twice with the same token restarts its configuration.
    fn begin_ranging(&self, peer_token: &RangingToken) -> Result<(), RangingError>;

    /// Replaces an invalidated session with a fresh one.
    ///
    /// The local token may change as a result.
    fn reset(&self) -> Result<(), RangingError>;
}
