// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Distance Ranging
//!
//! A ranging session runs on its own radio link, separate from the mesh
//! transport. Each side hands its peer an opaque [`RangingToken`]; once a
//! peer's token is registered, the engine reports distance samples keyed
//! by that token until the link is lost.

mod engine;
mod mock;

pub use engine::{RangingEngine, RangingError, RangingEvent, RangingToken};
pub use mock::MockRangingEngine;
