// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inbound event queue.
//!
//! Platform bridges for the transport and the ranging engine report on
//! arbitrary threads. They push into an [`EventSender`]; a single consumer
//! feeds the coordinator, so all state changes happen in arrival order.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::mesh::TransportEvent;
use crate::ranging::RangingEvent;

/// Anything the coordinator reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Transport(TransportEvent),
    Ranging(RangingEvent),
}

impl From<TransportEvent> for SessionEvent {
    fn from(event: TransportEvent) -> Self {
        SessionEvent::Transport(event)
    }
}

impl From<RangingEvent> for SessionEvent {
    fn from(event: RangingEvent) -> Self {
        SessionEvent::Ranging(event)
    }
}

/// Producer handle, cloned into each platform bridge.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<SessionEvent>,
}

impl EventSender {
    /// Queues an event. Returns false once the consumer has gone away.
    pub fn send(&self, event: impl Into<SessionEvent>) -> bool {
        self.tx.send(event.into()).is_ok()
    }
}

/// Single-consumer queue of session events.
#[derive(Debug)]
pub struct EventQueue {
    sender: EventSender,
    rx: Receiver<SessionEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        EventQueue {
            sender: EventSender { tx },
            rx,
        }
    }

    /// A new producer handle.
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Takes the next event without blocking.
    pub fn try_next(&self) -> Option<SessionEvent> {
        self.rx.try_recv().ok()
    }

    /// Gives up the queue's own producer handle and returns the consumer
    /// end. Iteration ends when every outstanding [`EventSender`] is dropped.
    pub fn into_receiver(self) -> Receiver<SessionEvent> {
        self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranging::RangingEvent;

    #[test]
    fn test_events_arrive_in_order() {
        let queue = EventQueue::new();
        let sender = queue.sender();

        assert!(sender.send(RangingEvent::Suspended));
        assert!(sender.send(RangingEvent::SuspensionEnded));

        assert_eq!(
            queue.try_next(),
            Some(SessionEvent::Ranging(RangingEvent::Suspended))
        );
        assert_eq!(
            queue.try_next(),
            Some(SessionEvent::Ranging(RangingEvent::SuspensionEnded))
        );
        assert_eq!(queue.try_next(), None);
    }

    #[test]
    fn test_receiver_ends_when_senders_drop() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let rx = queue.into_receiver();

        sender.send(RangingEvent::Suspended);
        drop(sender);

        assert_eq!(rx.iter().count(), 1);
    }

    #[test]
    fn test_send_fails_without_consumer() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        drop(queue);

        assert!(!sender.send(RangingEvent::Suspended));
    }
}
