// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exchange Coordinator
//!
//! Ties the mesh transport, the ranging engine and the card protocol
//! together. Every inbound event goes through [`ExchangeCoordinator::handle_event`]:
//! state is updated under a single lock, then transport commands and
//! application callbacks run after the lock is released.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::error::ExchangeError;
use super::registry::PeerRegistry;
use super::selector::ClosestPeer;
use super::state::PeerState;
use crate::api::{
    CallbackHandler, CoordinatorEvent, EventDispatcher, EventHandler, EventQueue, ExchangeConfig,
    SessionEvent,
};
use crate::card::Card;
use crate::mesh::{PeerIdentity, SessionState, Transport, TransportEvent};
use crate::protocol::{Classified, EnvelopeCodec, InMemorySeenCards, SeenCards};
use crate::ranging::{RangingEngine, RangingEvent, RangingToken};

struct CoordinatorState {
    peers: HashMap<PeerIdentity, PeerState>,
    registry: PeerRegistry,
    seen: Box<dyn SeenCards>,
    local_token: RangingToken,
    closest: Option<ClosestPeer>,
    ranging_suspended: bool,
}

/// Transport command decided under the lock.
enum Command {
    Invite(PeerIdentity),
    Accept(PeerIdentity),
    SendToken(PeerIdentity, Vec<u8>),
}

/// Side effects collected while handling one event.
#[derive(Default)]
struct Effects {
    commands: Vec<Command>,
    events: Vec<CoordinatorEvent>,
}

/// Proximity-ranked card exchange over a local mesh.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use cardtier_core::api::EventQueue;
/// use cardtier_core::exchange::ExchangeCoordinator;
///
/// let queue = EventQueue::new();
/// // Hand `queue.sender()` to the platform transport and ranging bridges.
/// let coordinator = Arc::new(ExchangeCoordinator::builder(transport, ranging).build()?);
///
/// coordinator.on_card_received(|card, from| println!("{} from {}", card.name(), from));
/// coordinator.spawn_dispatch(queue)?;
/// coordinator.start();
///
/// if coordinator.is_in_proximity() {
///     coordinator.send_card_to_closest(&my_card)?;
/// }
/// ```
pub struct ExchangeCoordinator<T: Transport, R: RangingEngine> {
    config: ExchangeConfig,
    codec: EnvelopeCodec,
    transport: T,
    ranging: R,
    state: Mutex<CoordinatorState>,
    events: RwLock<EventDispatcher>,
}

impl<T: Transport, R: RangingEngine> ExchangeCoordinator<T, R> {
    /// Creates a coordinator with the default configuration and an
    /// in-memory seen-card set.
    pub fn new(transport: T, ranging: R) -> Self {
        let config = ExchangeConfig::default();
        let seen: Box<dyn SeenCards> = Box::new(InMemorySeenCards::new());
        Self::from_parts(config, transport, ranging, seen, EventDispatcher::new())
    }

    /// Starts a builder.
    pub fn builder(transport: T, ranging: R) -> CoordinatorBuilder<T, R> {
        CoordinatorBuilder::new(transport, ranging)
    }

    fn from_parts(
        config: ExchangeConfig,
        transport: T,
        ranging: R,
        seen: Box<dyn SeenCards>,
        events: EventDispatcher,
    ) -> Self {
        let local_token = ranging.local_token();
        ExchangeCoordinator {
            codec: config.codec(),
            config,
            transport,
            ranging,
            state: Mutex::new(CoordinatorState {
                peers: HashMap::new(),
                registry: PeerRegistry::new(),
                seen,
                local_token,
                closest: None,
                ranging_suspended: false,
            }),
            events: RwLock::new(events),
        }
    }

    // === Session Control ===

    /// Starts advertising and browsing.
    ///
    /// A discovery failure is logged; the coordinator keeps running and
    /// can be started again.
    pub fn start(&self) {
        match self.transport.start_discovery(&self.config.service_type) {
            Ok(()) => info!(service = %self.config.service_type, "discovery started"),
            Err(err) => warn!(service = %self.config.service_type, error = %err, "discovery failed to start"),
        }
    }

    /// Stops advertising and browsing. Existing sessions stay up.
    pub fn stop(&self) {
        self.transport.stop_discovery();
        info!("discovery stopped");
    }

    // === Card Transfer ===

    /// Sends a card to one peer.
    ///
    /// Failures are returned to the caller and never retried.
    pub fn send_card(&self, card: &Card, to: &PeerIdentity) -> Result<(), ExchangeError> {
        card.validate()?;
        let frame = self.codec.encode_card(card)?;
        self.transport.send(to, &frame)?;
        info!(peer = %to, card_id = %card.id(), bytes = frame.len(), "card sent");
        Ok(())
    }

    /// Sends a card to the current closest peer and returns who got it.
    pub fn send_card_to_closest(&self, card: &Card) -> Result<PeerIdentity, ExchangeError> {
        let closest = self.closest().ok_or(ExchangeError::NoPeerInRange)?;
        self.send_card(card, &closest.peer)?;
        Ok(closest.peer)
    }

    // === Queries ===

    /// Nearest peer with a distance sample.
    pub fn closest(&self) -> Option<ClosestPeer> {
        self.state.lock().closest.clone()
    }

    /// True when the closest peer is nearer than the proximity threshold.
    pub fn is_in_proximity(&self) -> bool {
        self.closest()
            .is_some_and(|c| c.distance < self.config.proximity_threshold_m)
    }

    pub fn peer_state(&self, peer: &PeerIdentity) -> Option<PeerState> {
        self.state.lock().peers.get(peer).copied()
    }

    /// Latest distance sample for a peer, in meters.
    pub fn distance_to(&self, peer: &PeerIdentity) -> Option<f32> {
        self.state.lock().registry.distance(peer)
    }

    /// Whether a ranging token or distance is held for the peer.
    pub fn is_tracking(&self, peer: &PeerIdentity) -> bool {
        self.state.lock().registry.contains(peer)
    }

    /// Peers with a live session, in no particular order.
    pub fn connected_peers(&self) -> Vec<PeerIdentity> {
        self.state
            .lock()
            .peers
            .iter()
            .filter(|(_, state)| state.is_connected())
            .map(|(peer, _)| peer.clone())
            .collect()
    }

    /// Token announced to peers on connect.
    pub fn local_token(&self) -> RangingToken {
        self.state.lock().local_token.clone()
    }

    pub fn is_ranging_suspended(&self) -> bool {
        self.state.lock().ranging_suspended
    }

    /// Number of distinct cards delivered so far.
    pub fn seen_card_count(&self) -> usize {
        self.state.lock().seen.len()
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn ranging(&self) -> &R {
        &self.ranging
    }

    // === Events ===

    /// Registers an event handler.
    ///
    /// Handlers must not call `subscribe` themselves.
    pub fn subscribe(&self, handler: Arc<dyn EventHandler>) {
        self.events.write().add_handler(handler);
    }

    /// Registers a callback for newly received cards only.
    pub fn on_card_received<F>(&self, callback: F)
    where
        F: Fn(&Card, &PeerIdentity) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(CallbackHandler::new(
            move |event: &CoordinatorEvent| {
                if let CoordinatorEvent::CardReceived { card, from } = event {
                    callback(card, from);
                }
            },
        )));
    }

    /// Applies one transport or ranging event.
    ///
    /// Effects run after the state lock is released, so events must come
    /// from a single consumer such as [`spawn_dispatch`](Self::spawn_dispatch).
    /// Concurrent callers may see `ClosestPeerChanged` delivered out of order.
    pub fn handle_event(&self, event: impl Into<SessionEvent>) {
        let mut effects = Effects::default();
        {
            let mut state = self.state.lock();
            match event.into() {
                SessionEvent::Transport(event) => {
                    self.on_transport_event(&mut state, event, &mut effects)
                }
                SessionEvent::Ranging(event) => {
                    self.on_ranging_event(&mut state, event, &mut effects)
                }
            }
        }
        self.apply(effects);
    }

    /// Drains `queue` on a dedicated thread until every sender is dropped.
    pub fn spawn_dispatch(self: &Arc<Self>, queue: EventQueue) -> io::Result<JoinHandle<()>>
    where
        T: 'static,
        R: 'static,
    {
        let coordinator = Arc::clone(self);
        let events = queue.into_receiver();
        thread::Builder::new()
            .name("cardtier-dispatch".into())
            .spawn(move || {
                for event in events {
                    coordinator.handle_event(event);
                }
                debug!("event queue closed");
            })
    }

    // === Internal ===

    fn on_transport_event(
        &self,
        state: &mut CoordinatorState,
        event: TransportEvent,
        effects: &mut Effects,
    ) {
        match event {
            TransportEvent::PeerFound(peer) => {
                let in_session = state
                    .peers
                    .get(&peer)
                    .is_some_and(|s| s.is_connected() || *s == PeerState::Connecting);
                if in_session {
                    debug!(peer = %peer, "already in session, not inviting");
                    return;
                }
                debug!(peer = %peer, "peer found");
                set_peer_state(state, &peer, PeerState::Discovered, effects);
                effects.commands.push(Command::Invite(peer));
            }
            TransportEvent::PeerLost(peer) => {
                if state.peers.get(&peer).is_some_and(|s| s.is_pending()) {
                    state.peers.remove(&peer);
                    debug!(peer = %peer, "pending peer lost");
                }
            }
            TransportEvent::InvitationReceived(peer) => {
                debug!(peer = %peer, "invitation received");
                effects.commands.push(Command::Accept(peer));
            }
            TransportEvent::PeerStateChanged { peer, state: session } => {
                self.on_session_state(state, peer, session, effects)
            }
            TransportEvent::BytesReceived { peer, bytes } => {
                self.on_bytes(state, peer, &bytes, effects)
            }
            TransportEvent::DiscoveryFailed(reason) => {
                warn!(reason = %reason, "discovery failed");
            }
        }
    }

    fn on_session_state(
        &self,
        state: &mut CoordinatorState,
        peer: PeerIdentity,
        session: SessionState,
        effects: &mut Effects,
    ) {
        match session {
            SessionState::Connecting => {
                if !state.peers.get(&peer).is_some_and(|s| s.is_connected()) {
                    set_peer_state(state, &peer, PeerState::Connecting, effects);
                }
            }
            SessionState::Connected => {
                if state.peers.get(&peer).is_some_and(|s| s.is_connected()) {
                    return;
                }
                info!(peer = %peer, "peer connected");
                set_peer_state(state, &peer, PeerState::Connected, effects);
                match self.codec.encode_token(&state.local_token) {
                    Ok(frame) => effects.commands.push(Command::SendToken(peer, frame)),
                    Err(err) => warn!(peer = %peer, error = %err, "cannot announce local token"),
                }
            }
            SessionState::Disconnected => {
                let known = state
                    .peers
                    .get(&peer)
                    .is_some_and(|s| *s != PeerState::Disconnected);
                if !known && !state.registry.contains(&peer) {
                    return;
                }
                info!(peer = %peer, "peer disconnected");
                state.registry.remove_peer(&peer);
                set_peer_state(state, &peer, PeerState::Disconnected, effects);
                refresh_closest(state, effects);
            }
        }
    }

    fn on_bytes(
        &self,
        state: &mut CoordinatorState,
        peer: PeerIdentity,
        bytes: &[u8],
        effects: &mut Effects,
    ) {
        match self.codec.classify(bytes) {
            Classified::Token(token) => {
                if !state.peers.get(&peer).is_some_and(|s| s.is_connected()) {
                    warn!(peer = %peer, "ranging token from peer without a session, dropped");
                    return;
                }
                debug!(peer = %peer, token = %token.fingerprint(), "peer token received");
                if let Err(err) = state.registry.record_token(&peer, token, &self.ranging) {
                    warn!(peer = %peer, error = %err, "failed to start ranging");
                }
                set_peer_state(state, &peer, PeerState::Ranging, effects);
                refresh_closest(state, effects);
            }
            Classified::Card(card) => {
                let card_id = card.id();
                if state.seen.mark_seen(card_id) {
                    info!(peer = %peer, card_id = %card_id, "card received");
                    effects.events.push(CoordinatorEvent::CardReceived { card, from: peer });
                } else {
                    debug!(peer = %peer, card_id = %card_id, "duplicate card dropped");
                    effects.events.push(CoordinatorEvent::DuplicateCardDropped {
                        card_id,
                        from: peer,
                    });
                }
            }
            Classified::Unrecognized => {
                debug!(peer = %peer, bytes = bytes.len(), "unrecognized frame dropped");
            }
        }
    }

    fn on_ranging_event(
        &self,
        state: &mut CoordinatorState,
        event: RangingEvent,
        effects: &mut Effects,
    ) {
        match event {
            RangingEvent::DistanceUpdated { token, distance } => {
                match state.registry.record_distance(&token, distance) {
                    Some(peer) => {
                        debug!(peer = %peer, distance, "distance updated");
                        refresh_closest(state, effects);
                    }
                    None => {
                        debug!(token = %token.fingerprint(), distance, "distance for unknown token ignored")
                    }
                }
            }
            RangingEvent::Invalidated { reason } => {
                warn!(reason = %reason, "ranging session invalidated");
                state.registry.clear_distances();
                refresh_closest(state, effects);

                if let Err(err) = self.ranging.reset() {
                    warn!(error = %err, "ranging session could not be reset");
                    return;
                }
                state.ranging_suspended = false;

                let token = self.ranging.local_token();
                if token != state.local_token {
                    info!(token = %token.fingerprint(), "local token rotated");
                    state.local_token = token;
                    self.announce_token(state, effects);
                }
                restart_ranging(state, &self.ranging);
            }
            RangingEvent::Suspended => {
                info!("ranging suspended");
                state.ranging_suspended = true;
            }
            RangingEvent::SuspensionEnded => {
                info!("ranging resumed");
                state.ranging_suspended = false;
                restart_ranging(state, &self.ranging);
            }
        }
    }

    /// Queues the local token for every connected peer.
    fn announce_token(&self, state: &CoordinatorState, effects: &mut Effects) {
        let frame = match self.codec.encode_token(&state.local_token) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "cannot announce local token");
                return;
            }
        };
        for (peer, peer_state) in &state.peers {
            if peer_state.is_connected() {
                effects
                    .commands
                    .push(Command::SendToken(peer.clone(), frame.clone()));
            }
        }
    }

    fn apply(&self, effects: Effects) {
        for command in effects.commands {
            match command {
                Command::Invite(peer) => {
                    if let Err(err) = self.transport.invite(&peer, self.config.invite_timeout()) {
                        warn!(peer = %peer, error = %err, "invitation failed");
                    }
                }
                Command::Accept(peer) => {
                    if let Err(err) = self.transport.accept(&peer) {
                        warn!(peer = %peer, error = %err, "accepting invitation failed");
                    }
                }
                Command::SendToken(peer, frame) => {
                    if let Err(err) = self.transport.send(&peer, &frame) {
                        warn!(peer = %peer, error = %err, "token announcement failed");
                    }
                }
            }
        }

        if effects.events.is_empty() {
            return;
        }
        let dispatcher = self.events.read();
        for event in &effects.events {
            dispatcher.dispatch(event);
        }
    }
}

fn set_peer_state(
    state: &mut CoordinatorState,
    peer: &PeerIdentity,
    next: PeerState,
    effects: &mut Effects,
) {
    if state.peers.insert(peer.clone(), next) != Some(next) {
        effects.events.push(CoordinatorEvent::PeerStateChanged {
            peer: peer.clone(),
            state: next,
        });
    }
}

fn refresh_closest(state: &mut CoordinatorState, effects: &mut Effects) {
    let closest = state.registry.closest();
    if closest != state.closest {
        state.closest = closest.clone();
        effects
            .events
            .push(CoordinatorEvent::ClosestPeerChanged { closest });
    }
}

fn restart_ranging(state: &CoordinatorState, engine: &dyn RangingEngine) {
    for (peer, err) in state.registry.restart_all(engine) {
        warn!(peer = %peer, error = %err, "failed to restart ranging");
    }
}

/// Builder for [`ExchangeCoordinator`].
pub struct CoordinatorBuilder<T: Transport, R: RangingEngine> {
    config: ExchangeConfig,
    transport: T,
    ranging: R,
    seen: Option<Box<dyn SeenCards>>,
    events: EventDispatcher,
}

impl<T: Transport, R: RangingEngine> CoordinatorBuilder<T, R> {
    /// Creates a builder with default configuration.
    pub fn new(transport: T, ranging: R) -> Self {
        CoordinatorBuilder {
            config: ExchangeConfig::default(),
            transport,
            ranging,
            seen: None,
            events: EventDispatcher::new(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the seen-card set, e.g. one preloaded from a saved collection.
    pub fn seen_cards(mut self, seen: impl SeenCards + 'static) -> Self {
        self.seen = Some(Box::new(seen));
        self
    }

    /// Adds an event handler.
    pub fn handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.events.add_handler(handler);
        self
    }

    /// Validates the configuration and builds the coordinator.
    pub fn build(self) -> Result<ExchangeCoordinator<T, R>, ExchangeError> {
        self.config.validate()?;
        let seen = self
            .seen
            .unwrap_or_else(|| Box::new(InMemorySeenCards::new()));
        Ok(ExchangeCoordinator::from_parts(
            self.config,
            self.transport,
            self.ranging,
            seen,
            self.events,
        ))
    }
}
