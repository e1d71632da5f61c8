//! Transition entries and the table the dispatch loop resolves against.

use super::state::StateId;
use crate::signal::ErrorChannel;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Action run when a transition is taken. Returns the next requested state.
pub type Action<A> = Arc<dyn Fn(&mut ErrorChannel, &mut A) -> StateId + Send + Sync>;

/// An immutable `(from, to, action)` triple.
pub struct Transition<A> {
    pub from: StateId,
    pub to: StateId,
    pub action: Action<A>,
}

impl<A> Transition<A> {
    pub fn new<F>(from: StateId, to: StateId, action: F) -> Self
    where
        F: Fn(&mut ErrorChannel, &mut A) -> StateId + Send + Sync + 'static,
    {
        Self {
            from,
            to,
            action: Arc::new(action),
        }
    }

    /// Marker entry ending a sentinel-terminated list.
    pub fn sentinel() -> Self {
        Self::new(StateId::IGNORE, StateId::IGNORE, |_, _| StateId::EXIT)
    }

    pub fn is_sentinel(&self) -> bool {
        self.from == StateId::IGNORE
    }

    /// Check whether this entry handles the `(from, to)` pair (pure)
    pub fn matches(&self, from: StateId, to: StateId) -> bool {
        self.from == from && self.to == to
    }

    pub fn perform(&self, errors: &mut ErrorChannel, arg: &mut A) -> StateId {
        (self.action)(errors, arg)
    }
}

impl<A> Clone for Transition<A> {
    fn clone(&self) -> Self {
        Self {
            from: self.from,
            to: self.to,
            action: Arc::clone(&self.action),
        }
    }
}

impl<A> fmt::Debug for Transition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Ordered, read-only table of transitions.
///
/// Duplicate `(from, to)` pairs are allowed but only the first one in table
/// order is ever reachable. Construction stops at the first sentinel entry.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{StateId, Transition, TransitionTable};
///
/// let table: TransitionTable<u32> = TransitionTable::new(vec![
///     Transition::new(StateId::INIT, StateId::USER_START, |_, n: &mut u32| {
///         *n += 1;
///         StateId::EXIT
///     }),
///     Transition::sentinel(),
///     Transition::new(StateId::USER_START, StateId::EXIT, |_, _| StateId::EXIT),
/// ]);
///
/// assert_eq!(table.len(), 1);
/// assert!(table.lookup(StateId::INIT, StateId::USER_START).is_some());
/// assert!(table.lookup(StateId::USER_START, StateId::EXIT).is_none());
/// ```
pub struct TransitionTable<A> {
    entries: Vec<Transition<A>>,
    index: HashMap<(StateId, StateId), usize>,
}

impl<A> TransitionTable<A> {
    pub fn new(entries: impl IntoIterator<Item = Transition<A>>) -> Self {
        let entries: Vec<Transition<A>> = entries
            .into_iter()
            .take_while(|t| !t.is_sentinel())
            .collect();

        let mut index = HashMap::with_capacity(entries.len());
        for (position, transition) in entries.iter().enumerate() {
            index
                .entry((transition.from, transition.to))
                .or_insert(position);
        }

        Self { entries, index }
    }

    /// First entry in table order handling `(from, to)`.
    pub fn lookup(&self, from: StateId, to: StateId) -> Option<&Transition<A>> {
        self.index
            .get(&(from, to))
            .and_then(|&position| self.entries.get(position))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition<A>> {
        self.entries.iter()
    }
}

impl<A> Clone for TransitionTable<A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<A> fmt::Debug for TransitionTable<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<A> FromIterator<Transition<A>> for TransitionTable<A> {
    fn from_iter<I: IntoIterator<Item = Transition<A>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, A> IntoIterator for &'a TransitionTable<A> {
    type Item = &'a Transition<A>;
    type IntoIter = std::slice::Iter<'a, Transition<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
