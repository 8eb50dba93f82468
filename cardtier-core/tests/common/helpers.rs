// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Helpers
//!
//! A [`Device`] wraps a coordinator over mock radios. [`pump`] moves frames
//! from each device's mock outbox into the addressed device, standing in
//! for the mesh.

use std::sync::Arc;

use cardtier_core::api::{CallbackHandler, CoordinatorEvent, ExchangeConfig};
use cardtier_core::card::Card;
use cardtier_core::exchange::ExchangeCoordinator;
use cardtier_core::mesh::{MockTransport, PeerIdentity, SessionState, TransportEvent};
use cardtier_core::ranging::{MockRangingEngine, RangingEvent, RangingToken};
use parking_lot::Mutex;

pub type MockCoordinator = ExchangeCoordinator<MockTransport, MockRangingEngine>;

/// One simulated device.
pub struct Device {
    pub identity: PeerIdentity,
    pub coordinator: MockCoordinator,
    events: Arc<Mutex<Vec<CoordinatorEvent>>>,
}

impl Device {
    pub fn new(id: &str, name: &str) -> Self {
        Self::with_config(id, name, ExchangeConfig::default())
    }

    pub fn with_config(id: &str, name: &str, config: ExchangeConfig) -> Self {
        Self::from_parts(
            id,
            name,
            ExchangeCoordinator::builder(MockTransport::new(), MockRangingEngine::new())
                .config(config),
        )
    }

    pub fn with_ranging(id: &str, name: &str, ranging: MockRangingEngine) -> Self {
        Self::from_parts(
            id,
            name,
            ExchangeCoordinator::builder(MockTransport::new(), ranging),
        )
    }

    fn from_parts(
        id: &str,
        name: &str,
        builder: cardtier_core::exchange::CoordinatorBuilder<MockTransport, MockRangingEngine>,
    ) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let coordinator = builder
            .handler(Arc::new(CallbackHandler::new(
                move |event: &CoordinatorEvent| sink.lock().push(event.clone()),
            )))
            .build()
            .unwrap();

        Device {
            identity: PeerIdentity::new(id, name),
            coordinator,
            events,
        }
    }

    pub fn transport(&self) -> &MockTransport {
        self.coordinator.transport()
    }

    pub fn ranging(&self) -> &MockRangingEngine {
        self.coordinator.ranging()
    }

    pub fn token(&self) -> RangingToken {
        self.coordinator.local_token()
    }

    /// Every event dispatched so far.
    pub fn events(&self) -> Vec<CoordinatorEvent> {
        self.events.lock().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().clear();
    }

    /// Cards delivered through `CardReceived`, in order.
    pub fn received_cards(&self) -> Vec<(Card, PeerIdentity)> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                CoordinatorEvent::CardReceived { card, from } => Some((card.clone(), from.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn duplicate_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, CoordinatorEvent::DuplicateCardDropped { .. }))
            .count()
    }

    /// Reports the session with `peer` as connected (or disconnected).
    pub fn session(&self, peer: &PeerIdentity, state: SessionState) {
        match state {
            SessionState::Connected => self.transport().connect_peer(peer),
            SessionState::Disconnected => self.transport().disconnect_peer(peer),
            SessionState::Connecting => {}
        }
        self.coordinator.handle_event(TransportEvent::PeerStateChanged {
            peer: peer.clone(),
            state,
        });
    }

    /// Delivers raw bytes as if sent by `from`.
    pub fn receive(&self, from: &PeerIdentity, bytes: Vec<u8>) {
        self.coordinator.handle_event(TransportEvent::BytesReceived {
            peer: from.clone(),
            bytes,
        });
    }

    /// Reports a ranging sample against `other`'s token.
    pub fn measure(&self, other: &Device, distance: f32) {
        self.coordinator.handle_event(RangingEvent::DistanceUpdated {
            token: other.token(),
            distance,
        });
    }
}

/// Delivers queued frames between devices until every outbox is empty.
/// Frames addressed to unknown peers are dropped.
pub fn pump(devices: &[&Device]) {
    loop {
        let mut delivered = false;
        for sender in devices {
            for frame in sender.transport().take_sent() {
                if let Some(target) = devices.iter().find(|d| d.identity == frame.peer) {
                    target.receive(&sender.identity, frame.bytes);
                    delivered = true;
                }
            }
        }
        if !delivered {
            break;
        }
    }
}

/// Connects two devices and lets them swap ranging tokens.
pub fn connect(a: &Device, b: &Device) {
    a.session(&b.identity, SessionState::Connected);
    b.session(&a.identity, SessionState::Connected);
    pump(&[a, b]);
}

/// Installs a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
