//! Index state container so every transition is a reducer step over the live value.
//!
//! The cell never exposes a setter. Callers describe what they want with an
//! [`IndexAction`]; [`IndexCell::dispatch`] reads the stored value, runs
//! [`transition`], and writes the result inside one lock scope, so back-to-back
//! requests compose instead of racing on a stale snapshot.

use std::sync::{Arc, Mutex};

use crate::cycle_index::{next_index, prev_index};
use crate::lock::lock_or_recover;

/// A requested index change. The modulus travels with the request because the
/// owner of the index does not know the collection size in advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAction {
    /// Step forward, wrapping past `modulus - 1`.
    Increment { modulus: usize },
    /// Step backward, wrapping below 0.
    Decrement { modulus: usize },
}

impl IndexAction {
    /// Modulus carried by the request.
    #[must_use]
    pub fn modulus(self) -> usize {
        match self {
            Self::Increment { modulus } | Self::Decrement { modulus } => modulus,
        }
    }
}

/// Pure reducer: the index that follows `state` after `action`.
#[must_use]
pub fn transition(state: usize, action: IndexAction) -> usize {
    match action {
        IndexAction::Increment { modulus } => next_index(state, modulus),
        IndexAction::Decrement { modulus } => prev_index(state, modulus),
    }
}

/// Shared handle to one index value. Clones point at the same storage.
#[derive(Debug, Clone, Default)]
pub struct IndexCell {
    value: Arc<Mutex<usize>>,
}

impl IndexCell {
    /// New cell starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stored value.
    #[must_use]
    pub fn get(&self) -> usize {
        *lock_or_recover(&self.value, "IndexCell::get")
    }

    /// Apply `action` against the stored value and return the new value.
    pub fn dispatch(&self, action: IndexAction) -> usize {
        if action.modulus() == 0 {
            tracing::warn!(?action, "index transition requested with zero modulus");
        }
        let mut value = lock_or_recover(&self.value, "IndexCell::dispatch");
        let previous = *value;
        *value = transition(previous, action);
        tracing::trace!(from = previous, to = *value, ?action, "index transition");
        *value
    }

    /// True when both handles share storage.
    #[must_use]
    pub fn same_cell(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(IndexAction::Increment { modulus: 3 }, 0, 1)]
    #[case(IndexAction::Increment { modulus: 3 }, 2, 0)]
    #[case(IndexAction::Decrement { modulus: 3 }, 0, 2)]
    #[case(IndexAction::Decrement { modulus: 2 }, 0, 1)]
    #[case(IndexAction::Decrement { modulus: 5 }, 4, 3)]
    #[case(IndexAction::Increment { modulus: 0 }, 9, 0)]
    fn transition_follows_wraparound_policy(
        #[case] action: IndexAction,
        #[case] state: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(transition(state, action), expected);
    }

    #[test]
    fn new_cell_starts_at_zero() {
        assert_eq!(IndexCell::new().get(), 0);
    }

    #[test]
    fn sequential_dispatches_compose_against_stored_value() {
        let cell = IndexCell::new();
        for _ in 0..3 {
            cell.dispatch(IndexAction::Increment { modulus: 5 });
        }
        assert_eq!(cell.get(), 3);
        cell.dispatch(IndexAction::Increment { modulus: 5 });
        cell.dispatch(IndexAction::Increment { modulus: 5 });
        assert_eq!(cell.get(), 0);
    }

    #[test]
    fn clones_share_storage() {
        let cell = IndexCell::new();
        let other = cell.clone();
        other.dispatch(IndexAction::Decrement { modulus: 4 });
        assert_eq!(cell.get(), 3);
        assert!(cell.same_cell(&other));
        assert!(!cell.same_cell(&IndexCell::new()));
    }

    #[test]
    fn dispatch_uses_modulus_given_at_call_time() {
        let cell = IndexCell::new();
        cell.dispatch(IndexAction::Decrement { modulus: 10 });
        assert_eq!(cell.get(), 9);
        cell.dispatch(IndexAction::Increment { modulus: 4 });
        assert_eq!(cell.get(), 2);
    }
}
