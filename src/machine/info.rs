//! The FSM descriptor: identity, current transition endpoints and callbacks.

use super::callbacks::{
    default_bad_change_handler, BadChangeHandler, BadChangeNotifier, DidChangeNotifier,
    WillChangeNotifier,
};
use crate::builder::{FsmError, FsmInfoBuilder};
use crate::core::{RunHistory, StateId};
use std::fmt;
use std::sync::Arc;
use tracing::Span;
use uuid::Uuid;

/// Descriptor for one logical state machine.
///
/// Holds the pair of states most recently entered and the callbacks the
/// dispatch loop invokes. The state pair is only ever written by
/// [`FsmInfo::run`] and [`FsmInfo::reset`]; it persists between runs.
///
/// # Example
///
/// ```rust
/// use tablefsm::{FsmInfo, StateId};
///
/// let info = FsmInfo::new("reader", None).unwrap();
///
/// assert_eq!(info.name(), "reader");
/// assert_eq!(info.from_state(), StateId::INIT);
/// assert_eq!(info.current_state(), StateId::USER_START);
/// ```
pub struct FsmInfo {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) start: (StateId, StateId),
    pub(crate) from_state: StateId,
    pub(crate) current_state: StateId,
    pub(crate) last_observed: (StateId, StateId),
    pub(crate) dispatched: usize,
    pub(crate) will_change: Option<WillChangeNotifier>,
    pub(crate) did_change: Option<DidChangeNotifier>,
    pub(crate) bad_change: Option<BadChangeNotifier>,
    pub(crate) bad_change_handler: BadChangeHandler,
    pub(crate) history: Option<RunHistory>,
    pub(crate) span: Span,
}

impl FsmInfo {
    /// Create a descriptor starting at `INIT -> USER_START`.
    ///
    /// Uses the default bad-change handler when `handler` is `None`.
    pub fn new(name: &str, handler: Option<BadChangeHandler>) -> Result<Self, FsmError> {
        let builder = FsmInfoBuilder::new(name);
        match handler {
            Some(handler) => builder.bad_change_handler_arc(handler).build(),
            None => builder.build(),
        }
    }

    pub fn builder(name: &str) -> FsmInfoBuilder<'_> {
        FsmInfoBuilder::new(name)
    }

    /// Copy `name` into freshly reserved storage.
    ///
    /// This is the only copy of the name made during creation, so a failed
    /// reservation surfaces as [`FsmError::NameAllocation`].
    pub(crate) fn store_name(name: &str) -> Result<String, FsmError> {
        Self::store_name_with_capacity(name, name.len())
    }

    fn store_name_with_capacity(name: &str, capacity: usize) -> Result<String, FsmError> {
        let mut stored = String::new();
        stored
            .try_reserve_exact(capacity)
            .map_err(|source| FsmError::NameAllocation {
                name: name.to_string(),
                source,
            })?;
        stored.push_str(name);
        Ok(stored)
    }

    pub(crate) fn assemble(
        name: String,
        start: (StateId, StateId),
        span: Option<Span>,
        record_history: bool,
    ) -> Self {
        let id = Uuid::new_v4();
        let span = span.unwrap_or_else(|| tracing::debug_span!("fsm", name = %name, %id));
        Self {
            id,
            name,
            start,
            from_state: start.0,
            current_state: start.1,
            last_observed: start,
            dispatched: 0,
            will_change: None,
            did_change: None,
            bad_change: None,
            bad_change_handler: Arc::new(default_bad_change_handler),
            history: record_history.then(RunHistory::new),
            span,
        }
    }

    /// Release the descriptor.
    ///
    /// Pair with `Option::take` to leave the caller's handle empty:
    ///
    /// ```rust
    /// use tablefsm::FsmInfo;
    ///
    /// let mut handle = Some(FsmInfo::new("scratch", None).unwrap());
    /// if let Some(info) = handle.take() {
    ///     info.destroy();
    /// }
    /// assert!(handle.is_none());
    /// ```
    pub fn destroy(self) {
        let span = self.span.clone();
        let _entered = span.enter();
        tracing::trace!(fsm = %self.name, id = %self.id, "destroy");
        drop(self);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// State the last committed transition came from.
    pub fn from_state(&self) -> StateId {
        self.from_state
    }

    /// State the last committed transition entered.
    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Pair most recently resolved by the dispatch loop.
    ///
    /// Updated before every lookup and once more when a run ends, so it
    /// holds the final `(from, EXIT)` pair after a run returns.
    pub fn last_observed(&self) -> (StateId, StateId) {
        self.last_observed
    }

    /// Number of actions dispatched by the last run.
    pub fn dispatch_count(&self) -> usize {
        self.dispatched
    }

    /// Transitions dispatched by the last run, if recording is enabled.
    pub fn history(&self) -> Option<&RunHistory> {
        self.history.as_ref()
    }

    /// Return to the configured start pair.
    pub fn reset(&mut self) {
        let _entered = self.span.enter();
        tracing::trace!(fsm = %self.name, "reset");
        self.from_state = self.start.0;
        self.current_state = self.start.1;
        self.last_observed = self.start;
        self.dispatched = 0;
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
    }

    pub fn will_change(&self) -> Option<&WillChangeNotifier> {
        self.will_change.as_ref()
    }

    pub fn set_will_change(&mut self, notifier: Option<WillChangeNotifier>) {
        self.will_change = notifier;
    }

    pub fn did_change(&self) -> Option<&DidChangeNotifier> {
        self.did_change.as_ref()
    }

    pub fn set_did_change(&mut self, notifier: Option<DidChangeNotifier>) {
        self.did_change = notifier;
    }

    pub fn bad_change(&self) -> Option<&BadChangeNotifier> {
        self.bad_change.as_ref()
    }

    pub fn set_bad_change(&mut self, notifier: Option<BadChangeNotifier>) {
        self.bad_change = notifier;
    }

    pub fn bad_change_handler(&self) -> &BadChangeHandler {
        &self.bad_change_handler
    }

    /// Replace the bad-change handler.
    ///
    /// `None` is rejected and the current handler stays installed.
    pub fn set_bad_change_handler(
        &mut self,
        handler: Option<BadChangeHandler>,
    ) -> Result<(), FsmError> {
        let _entered = self.span.enter();
        match handler {
            Some(handler) => {
                tracing::trace!(fsm = %self.name, "set bad-change handler");
                self.bad_change_handler = handler;
                Ok(())
            }
            None => {
                tracing::warn!(fsm = %self.name, "rejected empty bad-change handler");
                Err(FsmError::MissingBadChangeHandler)
            }
        }
    }
}

impl fmt::Debug for FsmInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsmInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("from_state", &self.from_state)
            .field("current_state", &self.current_state)
            .field("will_change", &self.will_change.is_some())
            .field("did_change", &self.did_change.is_some())
            .field("bad_change", &self.bad_change.is_some())
            .finish_non_exhaustive()
    }
}
