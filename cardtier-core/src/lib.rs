// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cardtier Core Library
//!
//! Proximity-ranked business card exchange. Devices discover each other
//! over a local mesh, range against each other with a short-range radio,
//! and hand a card to whichever peer is physically closest.
//! Platform radios sit behind the [`Transport`] and [`RangingEngine`]
//! traits; everything else is plain Rust.

pub mod api;
pub mod card;
pub mod exchange;
pub mod identity;
pub mod mesh;
pub mod protocol;
pub mod ranging;

pub use api::{
    CallbackHandler, CardtierError, CardtierResult, CoordinatorEvent, EventDispatcher,
    EventHandler, EventQueue, EventSender, ExchangeConfig, SessionEvent,
};
pub use card::{Address, Card, CardError, CardStyle, ContactInformation, DesignType, HexColor};
pub use exchange::{
    ClosestPeer, CoordinatorBuilder, ExchangeCoordinator, ExchangeError, PeerRegistry, PeerState,
};
pub use identity::{DisplayNameStore, IdentityError, LocalIdentity, MemoryDisplayNameStore};
pub use mesh::{
    MockTransport, PeerIdentity, SessionState, Transport, TransportError, TransportEvent,
};
pub use protocol::{CardEnvelope, Classified, EnvelopeCodec, InMemorySeenCards, ProtocolError, SeenCards};
pub use ranging::{MockRangingEngine, RangingEngine, RangingError, RangingEvent, RangingToken};
