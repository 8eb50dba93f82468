// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock ranging engine for testing.

use parking_lot::Mutex;
use rand::RngCore;

use super::engine::{RangingEngine, RangingError, RangingToken};

/// Token length used by the mock engine.
const MOCK_TOKEN_LEN: usize = 32;

#[derive(Debug)]
struct MockRangingState {
    local_token: RangingToken,
    ranging: Vec<RangingToken>,
    reset_count: usize,
    rotate_on_reset: bool,
    should_succeed: bool,
}

/// Mock ranging engine.
///
/// Records which peer tokens ranging was started for. Distance samples are
/// not produced here; tests feed `RangingEvent::DistanceUpdated` directly.
#[derive(Debug)]
pub struct MockRangingEngine {
    state: Mutex<MockRangingState>,
}

impl Default for MockRangingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRangingEngine {
    /// Creates an engine with a random local token.
    pub fn new() -> Self {
        Self::with_token(random_token())
    }

    /// Creates an engine with a fixed local token.
    pub fn with_token(token: RangingToken) -> Self {
        MockRangingEngine {
            state: Mutex::new(MockRangingState {
                local_token: token,
                ranging: Vec::new(),
                reset_count: 0,
                rotate_on_reset: false,
                should_succeed: true,
            }),
        }
    }

    /// Creates an engine whose `begin_ranging` always fails.
    pub fn unavailable() -> Self {
        let engine = Self::new();
        engine.state.lock().should_succeed = false;
        engine
    }

    /// When enabled, `reset` issues a fresh local token.
    pub fn set_rotate_on_reset(&self, enabled: bool) {
        self.state.lock().rotate_on_reset = enabled;
    }

    /// Every token `begin_ranging` was called with, in call order.
    pub fn ranging_calls(&self) -> Vec<RangingToken> {
        self.state.lock().ranging.clone()
    }

    /// Number of times `reset` was called.
    pub fn reset_count(&self) -> usize {
        self.state.lock().reset_count
    }
}

impl RangingEngine for MockRangingEngine {
    fn local_token(&self) -> RangingToken {
        self.state.lock().local_token.clone()
    }

    fn begin_ranging(&self, peer_token: &RangingToken) -> Result<(), RangingError> {
        let mut state = self.state.lock();
        if !state.should_succeed {
            return Err(RangingError::Unavailable);
        }
        if peer_token.is_empty() {
            return Err(RangingError::InvalidToken);
        }
        state.ranging.push(peer_token.clone());
        Ok(())
    }

    fn reset(&self) -> Result<(), RangingError> {
        let mut state = self.state.lock();
        state.reset_count += 1;
        if state.rotate_on_reset {
            state.local_token = random_token();
        }
        Ok(())
    }
}

fn random_token() -> RangingToken {
    let mut bytes = vec![0u8; MOCK_TOKEN_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    RangingToken::new(bytes)
}
