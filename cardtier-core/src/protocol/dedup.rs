// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Card id dedup set.

use std::collections::HashSet;

use uuid::Uuid;

/// Set of card ids already handed to the application.
///
/// The application may back this with its own card storage so cards
/// collected in earlier runs are also recognized.
pub trait SeenCards: Send {
    /// Returns true if `id` was already delivered.
    fn contains(&self, id: &Uuid) -> bool;

    /// Records `id`. Returns true if it was not present before.
    fn mark_seen(&mut self, id: Uuid) -> bool;

    /// Number of recorded ids.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime dedup set.
#[derive(Debug, Default, Clone)]
pub struct InMemorySeenCards {
    ids: HashSet<Uuid>,
}

impl InMemorySeenCards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the set, e.g. with ids of cards already in the collection.
    pub fn with_ids(ids: impl IntoIterator<Item = Uuid>) -> Self {
        InMemorySeenCards {
            ids: ids.into_iter().collect(),
        }
    }
}

impl SeenCards for InMemorySeenCards {
    fn contains(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    fn mark_seen(&mut self, id: Uuid) -> bool {
        self.ids.insert(id)
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}
