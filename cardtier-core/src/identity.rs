// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local Identity
//!
//! The name this device advertises on the mesh. It is derived once from
//! the device name plus a short random suffix and then persisted, so peers
//! see the same name across launches. Where the name is kept is up to the
//! application, through [`DisplayNameStore`].

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Length of the random suffix appended to the device name.
pub const SUFFIX_LENGTH: usize = 5;

/// Identity-related errors.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Device name cannot be empty")]
    EmptyDeviceName,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persistence for the advertised display name.
///
/// Implemented by the application; the core only ships an in-memory store.
pub trait DisplayNameStore: Send + Sync {
    /// Returns the saved name, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, IdentityError>;

    /// Saves the name, replacing any previous one.
    fn save(&self, display_name: &str) -> Result<(), IdentityError>;
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryDisplayNameStore {
    name: Mutex<Option<String>>,
}

impl MemoryDisplayNameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayNameStore for MemoryDisplayNameStore {
    fn load(&self) -> Result<Option<String>, IdentityError> {
        Ok(self.name.lock().clone())
    }

    fn save(&self, display_name: &str) -> Result<(), IdentityError> {
        *self.name.lock() = Some(display_name.to_string());
        Ok(())
    }
}

/// This device's mesh identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    display_name: String,
}

impl LocalIdentity {
    /// Loads the saved display name, or derives and saves a new one of
    /// the form `"<device_name>-<5 uppercase hex chars>"`.
    pub fn load_or_create(
        store: &dyn DisplayNameStore,
        device_name: &str,
    ) -> Result<Self, IdentityError> {
        if let Some(display_name) = store.load()? {
            debug!(name = %display_name, "loaded display name");
            return Ok(LocalIdentity { display_name });
        }

        let device_name = device_name.trim();
        if device_name.is_empty() {
            return Err(IdentityError::EmptyDeviceName);
        }

        let display_name = format!("{}-{}", device_name, random_suffix());
        store.save(&display_name)?;
        info!(name = %display_name, "created display name");
        Ok(LocalIdentity { display_name })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

fn random_suffix() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .to_uppercase()
        .chars()
        .take(SUFFIX_LENGTH)
        .collect()
}
