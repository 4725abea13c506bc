//! Provisional local edits.
//!
//! An [`OptimisticUpdate`] snapshots a value, applies an edit to it in
//! place, and must then be settled exactly once: confirmed when the backend
//! accepts the change, or rolled back to the snapshot when it does not.

use serde::Serialize;

/// Lifecycle of a provisional edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationState {
    Pending,
    Confirmed,
    RolledBack,
}

/// A pending edit together with the state to restore if it fails.
#[derive(Debug)]
#[must_use = "an optimistic update must be confirmed or rolled back"]
pub struct OptimisticUpdate<T: Clone> {
    snapshot: T,
    state: MutationState,
}

impl<T: Clone> OptimisticUpdate<T> {
    /// Snapshot `current`, then apply `edit` to it.
    pub fn apply(current: &mut T, edit: impl FnOnce(&mut T)) -> Self {
        let snapshot = current.clone();
        edit(current);
        Self {
            snapshot,
            state: MutationState::Pending,
        }
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    /// The value as it was before the edit.
    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }

    /// The backend accepted the edit; the snapshot is discarded.
    pub fn confirm(mut self) -> MutationState {
        self.state = MutationState::Confirmed;
        self.state
    }

    /// The backend rejected the edit; `current` is restored to the snapshot.
    pub fn roll_back(mut self, current: &mut T) -> MutationState {
        std::mem::swap(current, &mut self.snapshot);
        self.state = MutationState::RolledBack;
        self.state
    }

    /// Confirm on `Ok`, roll back on `Err`.
    pub fn settle<R, E>(self, current: &mut T, outcome: &Result<R, E>) -> MutationState {
        match outcome {
            Ok(_) => self.confirm(),
            Err(_) => self.roll_back(current),
        }
    }
}
