// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Card Exchange Module
//!
//! Tracks connected peers, maps their ranging tokens to live distance
//! samples, keeps the closest peer current and moves cards between
//! devices.
//!
//! # Flow
//!
//! 1. Discovery finds a peer; the coordinator invites it (and accepts
//!    any invitation it receives).
//! 2. On connect, each side announces its ranging token.
//! 3. Ranging reports distances per token; the registry turns them into
//!    per-peer samples and the selector picks the nearest.
//! 4. The user sends a card to the closest peer; the receiver delivers
//!    it once per card id.

mod coordinator;
mod error;
mod registry;
mod selector;
mod state;

pub use coordinator::{CoordinatorBuilder, ExchangeCoordinator};
pub use error::ExchangeError;
pub use registry::PeerRegistry;
pub use selector::{closest, ClosestPeer};
pub use state::PeerState;
