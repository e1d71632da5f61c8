//! Per-run transition history.
//!
//! A descriptor with history recording enabled appends one record per
//! dispatched action. The history is cleared at the start of each run.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single dispatched transition.
///
/// `next` is the state the action requested, which becomes the `to` of the
/// following lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// The state requested by the action
    pub next: StateId,
    /// When the action returned
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of the transitions dispatched during one run.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{RunHistory, StateId, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = RunHistory::new();
/// history.record(TransitionRecord {
///     from: StateId::INIT,
///     to: StateId::USER_START,
///     next: StateId::user(1),
///     timestamp: Utc::now(),
/// });
/// history.record(TransitionRecord {
///     from: StateId::USER_START,
///     to: StateId::user(1),
///     next: StateId::EXIT,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![StateId::INIT, StateId::USER_START, StateId::user(1)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHistory {
    transitions: Vec<TransitionRecord>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    pub fn record(&mut self, record: TransitionRecord) {
        self.transitions.push(record);
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of states entered.
    ///
    /// Returns the first `from`, then the `to` of each record in order.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
