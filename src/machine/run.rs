//! The dispatch loop.

use super::info::FsmInfo;
use crate::core::{StateId, TransitionRecord, TransitionTable};
use crate::signal::{ErrorChannel, ErrorDomain, RaisedError};
use chrono::Utc;
use std::sync::Arc;

/// Error that survived to the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("state machine '{name}' stopped at {from} -> {to}: {source}")]
pub struct RunError {
    pub name: String,
    pub from: StateId,
    pub to: StateId,
    pub source: RaisedError,
}

impl FsmInfo {
    /// Drive transitions until `EXIT` is requested.
    ///
    /// Returns the final `(from, EXIT)` pair, or a [`RunError`] when a
    /// condition was pending in the error channel as the run ended.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tablefsm::builder::TableBuilder;
    /// use tablefsm::{FsmInfo, StateId};
    ///
    /// let table = TableBuilder::<Vec<&'static str>>::new()
    ///     .on(StateId::INIT, StateId::USER_START, |_, log| {
    ///         log.push("start");
    ///         StateId::EXIT
    ///     })
    ///     .build();
    ///
    /// let mut info = FsmInfo::new("one-shot", None).unwrap();
    /// let mut log = Vec::new();
    /// let (from, to) = info.run(&mut log, &table).unwrap();
    ///
    /// assert_eq!((from, to), (StateId::USER_START, StateId::EXIT));
    /// assert_eq!(log, vec!["start"]);
    /// ```
    pub fn run<A>(
        &mut self,
        arg: &mut A,
        transitions: &TransitionTable<A>,
    ) -> Result<(StateId, StateId), RunError> {
        let mut errors = ErrorChannel::new(ErrorDomain::Fsm);
        let (from, to) = self.run_with(&mut errors, arg, transitions);

        match errors.take() {
            Some(source) => Err(RunError {
                name: self.name.clone(),
                from,
                to,
                source,
            }),
            None => Ok((from, to)),
        }
    }

    /// Drive transitions until `EXIT` is requested, threading `errors`
    /// through every callback.
    ///
    /// Any condition already pending in `errors` is discarded on entry, so
    /// only conditions raised by this run are reported. A condition raised
    /// during an iteration that does not end the run is cleared before the
    /// next iteration. A condition pending when `EXIT` is requested is left
    /// in `errors` for the caller.
    pub fn run_with<A>(
        &mut self,
        errors: &mut ErrorChannel,
        arg: &mut A,
        transitions: &TransitionTable<A>,
    ) -> (StateId, StateId) {
        let span = self.span.clone();
        let _entered = span.enter();
        tracing::trace!(fsm = %self.name, table_len = transitions.len(), "run");

        if let Some(stale) = errors.take() {
            tracing::debug!(
                fsm = %self.name,
                code = stale.code,
                "discarded error pending before run: {}",
                stale.message
            );
        }

        let mut from = self.from_state;
        let mut to = self.current_state;
        self.dispatched = 0;
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }

        loop {
            if let Some(notify) = self.will_change.clone() {
                notify(&*self, errors, from, to);
            }

            self.last_observed = (from, to);

            let next = match transitions.lookup(from, to) {
                None => {
                    tracing::warn!(fsm = %self.name, %from, %to, "no transition for pair");

                    if let Some(notify) = self.bad_change.clone() {
                        notify(&*self, errors, from, to);
                    }

                    let handler = Arc::clone(&self.bad_change_handler);
                    handler(&*self, errors, from, to)
                }
                Some(transition) => {
                    self.from_state = from;
                    self.current_state = to;
                    let entered_from = from;
                    from = to;

                    let next = transition.perform(errors, arg);
                    self.dispatched += 1;
                    tracing::debug!(
                        fsm = %self.name,
                        from = %entered_from,
                        %to,
                        %next,
                        "dispatched"
                    );

                    if let Some(history) = self.history.as_mut() {
                        history.record(TransitionRecord {
                            from: entered_from,
                            to,
                            next,
                            timestamp: Utc::now(),
                        });
                    }

                    if let Some(notify) = self.did_change.clone() {
                        notify(&*self, errors, entered_from, to, next);
                    }

                    next
                }
            };

            to = next;

            if to.is_exit() {
                break;
            }

            if let Some(absorbed) = errors.take() {
                tracing::warn!(
                    fsm = %self.name,
                    code = absorbed.code,
                    "absorbed error while continuing: {}",
                    absorbed.message
                );
            }
        }

        self.last_observed = (from, to);
        tracing::trace!(fsm = %self.name, %from, %to, dispatched = self.dispatched, "run finished");
        (from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::machine::callbacks::UNKNOWN_TRANSITION;
    use std::sync::Mutex;

    const OPEN: StateId = StateId::user(0);
    const READ: StateId = StateId::user(1);
    const CLOSE: StateId = StateId::user(2);

    #[test]
    fn single_entry_run_dispatches_once() {
        let table = TableBuilder::<u32>::new()
            .on(StateId::INIT, StateId::USER_START, |_, n| {
                *n += 1;
                StateId::EXIT
            })
            .build();
        let mut info = FsmInfo::new("single", None).unwrap();
        let mut calls = 0;

        let result = info.run(&mut calls, &table);

        assert_eq!(result, Ok((StateId::USER_START, StateId::EXIT)));
        assert_eq!(calls, 1);
        assert_eq!(info.dispatch_count(), 1);
        assert_eq!(info.from_state(), StateId::INIT);
        assert_eq!(info.current_state(), StateId::USER_START);
    }

    #[test]
    fn walks_through_several_states() {
        let table = TableBuilder::<Vec<StateId>>::new()
            .on(StateId::INIT, OPEN, |_, seen| {
                seen.push(OPEN);
                READ
            })
            .on(OPEN, READ, |_, seen| {
                seen.push(READ);
                CLOSE
            })
            .on(READ, CLOSE, |_, seen| {
                seen.push(CLOSE);
                StateId::EXIT
            })
            .build();
        let mut info = FsmInfo::new("walk", None).unwrap();
        let mut seen = Vec::new();

        let (from, to) = info.run(&mut seen, &table).unwrap();

        assert_eq!(seen, vec![OPEN, READ, CLOSE]);
        assert_eq!((from, to), (CLOSE, StateId::EXIT));
        assert_eq!(info.from_state(), READ);
        assert_eq!(info.current_state(), CLOSE);
        assert_eq!(info.last_observed(), (CLOSE, StateId::EXIT));
    }

    #[test]
    fn default_handler_ends_run_with_error() {
        let table = TableBuilder::<()>::new()
            .on(StateId::INIT, OPEN, |_, _| CLOSE)
            .build();
        let mut info = FsmInfo::new("broken", None).unwrap();

        let error = info.run(&mut (), &table).unwrap_err();

        assert_eq!(error.from, OPEN);
        assert_eq!(error.to, StateId::EXIT);
        assert_eq!(error.source.code, UNKNOWN_TRANSITION);
        assert_eq!(error.source.message, "Unknown state transition: 2 -> 4");
        assert_eq!(error.name, "broken");
    }

    #[test]
    fn bad_change_handler_can_recover() {
        let table = TableBuilder::<()>::new()
            .on(StateId::INIT, OPEN, |_, _| CLOSE)
            .on(OPEN, READ, |_, _| StateId::EXIT)
            .build();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&seen);
        let mut info = FsmInfo::builder("recover")
            .bad_change_handler(move |_, errors, from, to| {
                recorded.lock().unwrap().push((from, to));
                errors.raise("detour", 7);
                READ
            })
            .build()
            .unwrap();

        let result = info.run(&mut (), &table);

        assert_eq!(result, Ok((READ, StateId::EXIT)));
        assert_eq!(*seen.lock().unwrap(), vec![(OPEN, CLOSE)]);
    }

    #[test]
    fn error_with_continuing_state_is_cleared() {
        let table = TableBuilder::<()>::new()
            .on(StateId::INIT, OPEN, |errors, _| {
                errors.raise("transient", 5);
                READ
            })
            .on(OPEN, READ, |errors, _| {
                assert!(!errors.has_error());
                StateId::EXIT
            })
            .build();
        let mut info = FsmInfo::new("transient", None).unwrap();

        assert_eq!(info.run(&mut (), &table), Ok((READ, StateId::EXIT)));
    }

    #[test]
    fn error_with_exit_survives() {
        let table = TableBuilder::<()>::new()
            .on(StateId::INIT, OPEN, |errors, _| {
                errors.raise("fatal", 9);
                StateId::EXIT
            })
            .build();
        let mut info = FsmInfo::new("fatal", None).unwrap();
        let mut errors = ErrorChannel::default();

        let pair = info.run_with(&mut errors, &mut (), &table);

        assert_eq!(pair, (OPEN, StateId::EXIT));
        assert_eq!(errors.error().map(|e| e.code), Some(9));
    }

    #[test]
    fn notifiers_see_each_phase() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let will = Arc::clone(&events);
        let did = Arc::clone(&events);
        let bad = Arc::clone(&events);
        let handled = Arc::clone(&events);
        let table = TableBuilder::<()>::new()
            .on(StateId::INIT, OPEN, |_, _| READ)
            .build();
        let mut info = FsmInfo::builder("observed")
            .will_change(move |_, _, from, to| {
                will.lock().unwrap().push(format!("will {from} {to}"))
            })
            .did_change(move |_, _, from, to, next| {
                did.lock().unwrap().push(format!("did {from} {to} {next}"))
            })
            .bad_change(move |_, _, from, to| {
                bad.lock().unwrap().push(format!("bad {from} {to}"))
            })
            .bad_change_handler(move |_, _, from, to| {
                handled.lock().unwrap().push(format!("handler {from} {to}"));
                StateId::EXIT
            })
            .build()
            .unwrap();

        info.run(&mut (), &table).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "will INIT(0) 2".to_string(),
                "did INIT(0) 2 3".to_string(),
                "will 2 3".to_string(),
                "bad 2 3".to_string(),
                "handler 2 3".to_string(),
            ]
        );
    }

    #[test]
    fn error_pending_before_run_is_cleared_on_entry() {
        let first_seen = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&first_seen);
        let table = TableBuilder::<()>::new()
            .on(StateId::INIT, OPEN, move |errors, _| {
                *seen.lock().unwrap() = Some(errors.has_error());
                StateId::EXIT
            })
            .build();
        let mut info = FsmInfo::new("stale", None).unwrap();
        let mut errors = ErrorChannel::default();
        errors.raise("left over from a previous run", 77);

        let pair = info.run_with(&mut errors, &mut (), &table);

        assert_eq!(pair, (OPEN, StateId::EXIT));
        assert_eq!(*first_seen.lock().unwrap(), Some(false));
        assert!(!errors.has_error());
    }

    #[test]
    fn state_persists_between_runs_until_reset() {
        let table = TableBuilder::<u32>::new()
            .on(StateId::INIT, OPEN, |_, n| {
                *n += 1;
                READ
            })
            .on(OPEN, READ, |_, n| {
                *n += 1;
                StateId::EXIT
            })
            .build();
        let mut info = FsmInfo::new("reused", None).unwrap();
        let mut calls = 0;

        info.run(&mut calls, &table).unwrap();
        assert_eq!(calls, 2);
        assert_eq!((info.from_state(), info.current_state()), (OPEN, READ));

        info.run(&mut calls, &table).unwrap();
        assert_eq!(calls, 3);
        assert_eq!(info.dispatch_count(), 1);

        info.reset();
        assert_eq!((info.from_state(), info.current_state()), (StateId::INIT, OPEN));
        info.run(&mut calls, &table).unwrap();
        assert_eq!(calls, 5);
    }

    #[test]
    fn history_records_dispatched_transitions() {
        let table = TableBuilder::<()>::new()
            .on(StateId::INIT, OPEN, |_, _| READ)
            .on(OPEN, READ, |_, _| StateId::EXIT)
            .build();
        let mut info = FsmInfo::builder("history")
            .record_history(true)
            .build()
            .unwrap();

        info.run(&mut (), &table).unwrap();

        let history = info.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec![StateId::INIT, OPEN, READ]);
        assert_eq!(history.transitions()[1].next, StateId::EXIT);
    }
}
