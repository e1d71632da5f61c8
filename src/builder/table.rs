//! Builder for transition tables.

use crate::core::{StateId, Transition, TransitionTable};
use crate::signal::ErrorChannel;

/// Builder for assembling a [`TransitionTable`] entry by entry.
///
/// Entries keep the order they were added in, which decides which of two
/// duplicate pairs is reachable.
///
/// # Example
///
/// ```rust
/// use tablefsm::builder::TableBuilder;
/// use tablefsm::StateId;
///
/// const COUNTING: StateId = StateId::user(0);
///
/// let table = TableBuilder::<u32>::new()
///     .on(StateId::INIT, COUNTING, |_, n| {
///         *n += 1;
///         if *n < 3 { COUNTING } else { StateId::EXIT }
///     })
///     .on(COUNTING, COUNTING, |_, n| {
///         *n += 1;
///         if *n < 3 { COUNTING } else { StateId::EXIT }
///     })
///     .build();
///
/// assert_eq!(table.len(), 2);
/// ```
pub struct TableBuilder<A> {
    entries: Vec<Transition<A>>,
}

impl<A> TableBuilder<A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a transition from a closure.
    pub fn on<F>(mut self, from: StateId, to: StateId, action: F) -> Self
    where
        F: Fn(&mut ErrorChannel, &mut A) -> StateId + Send + Sync + 'static,
    {
        self.entries.push(Transition::new(from, to, action));
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<A>) -> Self {
        self.entries.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition<A>>) -> Self {
        self.entries.extend(transitions);
        self
    }

    pub fn build(self) -> TransitionTable<A> {
        TransitionTable::new(self.entries)
    }
}

impl<A> Default for TableBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
