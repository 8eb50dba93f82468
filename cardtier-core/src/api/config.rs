// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exchange Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::{EnvelopeCodec, MAX_MESSAGE_SIZE};

/// Service name shared by advertiser and browser.
pub const DEFAULT_SERVICE_TYPE: &str = "htw-cardtier";

/// Distance below which two devices count as held together (6 cm).
pub const DEFAULT_PROXIMITY_THRESHOLD_M: f32 = 0.06;

/// Maximum service type length accepted by local-link discovery.
pub const MAX_SERVICE_TYPE_LENGTH: usize = 15;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid service type '{0}': 1-15 lowercase letters, digits or single hyphens")]
    InvalidServiceType(String),

    #[error("Proximity threshold must be a positive distance")]
    InvalidProximityThreshold,

    #[error("Maximum message size too small")]
    MessageSizeTooSmall,
}

/// Configuration for an exchange coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Mesh service name.
    pub service_type: String,

    /// Timeout for auto-initiated invitations, in milliseconds.
    pub invite_timeout_ms: u64,

    /// Distance (meters) under which the closest peer is "in proximity".
    pub proximity_threshold_m: f32,

    /// Largest frame sent or accepted, in bytes.
    pub max_message_size: usize,

    /// Read frames without an envelope header using the legacy sniff.
    pub accept_untagged: bool,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            invite_timeout_ms: 10_000,
            proximity_threshold_m: DEFAULT_PROXIMITY_THRESHOLD_M,
            max_message_size: MAX_MESSAGE_SIZE,
            accept_untagged: true,
        }
    }
}

impl ExchangeConfig {
    /// Sets the mesh service name.
    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Sets the proximity threshold in meters.
    pub fn with_proximity_threshold(mut self, meters: f32) -> Self {
        self.proximity_threshold_m = meters;
        self
    }

    /// Sets the invitation timeout.
    pub fn with_invite_timeout(mut self, timeout: Duration) -> Self {
        self.invite_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Sets the maximum frame size.
    pub fn with_max_message_size(mut self, bytes: usize) -> Self {
        self.max_message_size = bytes;
        self
    }

    /// Only accept frames carrying the envelope header.
    pub fn tagged_only(mut self) -> Self {
        self.accept_untagged = false;
        self
    }

    pub fn invite_timeout(&self) -> Duration {
        Duration::from_millis(self.invite_timeout_ms)
    }

    /// Codec matching these settings.
    pub fn codec(&self) -> EnvelopeCodec {
        EnvelopeCodec::new(self.max_message_size, self.accept_untagged)
    }

    /// Checks every setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_service_type(&self.service_type) {
            return Err(ConfigError::InvalidServiceType(self.service_type.clone()));
        }
        if !self.proximity_threshold_m.is_finite() || self.proximity_threshold_m <= 0.0 {
            return Err(ConfigError::InvalidProximityThreshold);
        }
        // Room for the header plus a minimal body.
        if self.max_message_size < 64 {
            return Err(ConfigError::MessageSizeTooSmall);
        }
        Ok(())
    }
}

fn is_valid_service_type(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_SERVICE_TYPE_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}
