// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local Mesh Transport
//!
//! Abstraction over the platform's multi-peer, encrypted local-link
//! session: advertise/browse discovery, invitations and reliable datagram
//! delivery to a named peer.
//!
//! # Architecture
//!
//! - **Transport trait**: commands issued by the exchange core
//!   (discovery, invitations, sends)
//! - **TransportEvent**: what the platform reports back; platform bridges
//!   push these into the coordinator's event queue, never call the
//!   coordinator directly
//! - **MockTransport**: in-memory implementation for tests

mod error;
mod mock;
mod transport;

pub use error::TransportError;
pub use mock::{MockTransport, SentFrame};
pub use transport::{PeerIdentity, SessionState, Transport, TransportEvent, TransportResult};
