//! Lazy cache of per-file changes, keyed by change id
//!
//! The store never performs I/O. [`ChangeFileStore::ensure_loaded`] tells the
//! caller whether a fetch is needed and hands out a [`FetchTicket`]; the
//! caller runs the request and reports back through
//! [`ChangeFileStore::complete`]. Because the UI loop is the only writer, no
//! locking is involved.

use crate::api::FileChangeMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache state for one change id. A missing entry means "never tried".
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Arc<FileChangeMap>),
    Failed(String),
}

/// Proof that a fetch was started for `change_id` during `epoch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub change_id: String,
    epoch: u64,
}

/// What the caller has to do after [`ChangeFileStore::ensure_loaded`]
#[derive(Debug, Clone, PartialEq)]
pub enum Ensure {
    /// Cached already (possibly empty); no request needed
    Ready(Arc<FileChangeMap>),
    /// A request is already in flight
    Pending,
    /// Issue exactly one request and report back with this ticket
    Fetch(FetchTicket),
}

#[derive(Debug, Default)]
pub struct ChangeFileStore {
    entries: HashMap<String, LoadState>,
    epoch: u64,
}

impl ChangeFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `change_id` needs fetching.
    ///
    /// Loaded and loading entries are never fetched again. A failed entry is
    /// retried, so revisiting the view after an error tries once more.
    pub fn ensure_loaded(&mut self, change_id: &str) -> Ensure {
        match self.entries.get(change_id) {
            Some(LoadState::Loaded(map)) => Ensure::Ready(Arc::clone(map)),
            Some(LoadState::Loading) => Ensure::Pending,
            Some(LoadState::Failed(_)) | None => {
                self.entries
                    .insert(change_id.to_string(), LoadState::Loading);
                Ensure::Fetch(FetchTicket {
                    change_id: change_id.to_string(),
                    epoch: self.epoch,
                })
            }
        }
    }

    /// Record a finished fetch. Returns the new state, or `None` when the
    /// ticket predates the last [`reset`](Self::reset) and was dropped.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<FileChangeMap, String>,
    ) -> Option<&LoadState> {
        if ticket.epoch != self.epoch {
            return None;
        }
        if !matches!(self.entries.get(&ticket.change_id), Some(LoadState::Loading)) {
            return None;
        }

        let state = match outcome {
            Ok(map) => LoadState::Loaded(Arc::new(map)),
            Err(message) => LoadState::Failed(message),
        };
        self.entries.insert(ticket.change_id.clone(), state);
        self.entries.get(&ticket.change_id)
    }

    /// Drop everything; in-flight fetches will be ignored on arrival.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }

    pub fn state(&self, change_id: &str) -> Option<&LoadState> {
        self.entries.get(change_id)
    }

    pub fn loaded(&self, change_id: &str) -> Option<&Arc<FileChangeMap>> {
        match self.entries.get(change_id) {
            Some(LoadState::Loaded(map)) => Some(map),
            _ => None,
        }
    }

    pub fn is_loading(&self, change_id: &str) -> bool {
        matches!(self.entries.get(change_id), Some(LoadState::Loading))
    }
}
