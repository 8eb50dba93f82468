// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event System
//!
//! Callbacks from the coordinator to the application. Handlers run on the
//! coordinator's dispatch context after its state lock is released; hop
//! to the UI thread inside the handler if needed.

use std::sync::Arc;

use uuid::Uuid;

use crate::card::Card;
use crate::exchange::{ClosestPeer, PeerState};
use crate::mesh::PeerIdentity;

/// Events emitted by the exchange coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorEvent {
    /// A peer moved through the exchange lifecycle.
    PeerStateChanged {
        peer: PeerIdentity,
        state: PeerState,
    },

    /// The closest peer (or its distance) changed. `None` when no peer has
    /// a distance sample.
    ClosestPeerChanged { closest: Option<ClosestPeer> },

    /// A card not seen before arrived. Emitted once per card id.
    CardReceived { card: Card, from: PeerIdentity },

    /// A card whose id was already delivered arrived again.
    DuplicateCardDropped { card_id: Uuid, from: PeerIdentity },
}

/// Event handler trait.
///
/// Implement this trait to receive coordinator events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: &CoordinatorEvent);
}

/// Closure-based event handler.
pub struct CallbackHandler<F>
where
    F: Fn(&CoordinatorEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(&CoordinatorEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(&CoordinatorEvent) + Send + Sync,
{
    fn on_event(&self, event: &CoordinatorEvent) {
        (self.callback)(event);
    }
}

/// Fans events out to registered handlers, in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers an event to every handler.
    pub fn dispatch(&self, event: &CoordinatorEvent) {
        for handler in &self.handlers {
            handler.on_event(event);
        }
    }
}
