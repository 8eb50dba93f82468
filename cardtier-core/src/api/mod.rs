// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cardtier API Layer
//!
//! The surface the application consumes alongside
//! [`ExchangeCoordinator`](crate::exchange::ExchangeCoordinator).
//!
//! # Module Structure
//!
//! - [`config`] - Coordinator configuration
//! - [`dispatch`] - Inbound event queue feeding the coordinator
//! - [`error`] - Unified error type
//! - [`events`] - Outbound events and handler registration

pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;

pub use config::{ConfigError, ExchangeConfig, DEFAULT_PROXIMITY_THRESHOLD_M, DEFAULT_SERVICE_TYPE};
pub use dispatch::{EventQueue, EventSender, SessionEvent};
pub use error::{CardtierError, CardtierResult};
pub use events::{CallbackHandler, CoordinatorEvent, EventDispatcher, EventHandler};
