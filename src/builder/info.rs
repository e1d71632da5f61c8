//! Builder for configuring descriptors.

use crate::builder::error::FsmError;
use crate::core::StateId;
use crate::machine::callbacks::{
    default_bad_change, default_did_change, default_will_change, BadChangeHandler,
    BadChangeNotifier, DidChangeNotifier, WillChangeNotifier,
};
use crate::machine::FsmInfo;
use crate::signal::ErrorChannel;
use std::sync::Arc;
use tracing::Span;

/// Builder for constructing descriptors with a fluent API.
///
/// # Example
///
/// ```rust
/// use tablefsm::{FsmInfo, StateId};
///
/// let info = FsmInfo::builder("parser")
///     .with_default_notifiers()
///     .bad_change_handler(|_, _, _, _| StateId::EXIT)
///     .record_history(true)
///     .build()
///     .unwrap();
///
/// assert!(info.will_change().is_some());
/// assert!(info.history().is_some());
/// ```
pub struct FsmInfoBuilder<'a> {
    name: &'a str,
    start: (StateId, StateId),
    handler: Option<BadChangeHandler>,
    will_change: Option<WillChangeNotifier>,
    did_change: Option<DidChangeNotifier>,
    bad_change: Option<BadChangeNotifier>,
    span: Option<Span>,
    record_history: bool,
}

impl<'a> FsmInfoBuilder<'a> {
    /// Start a builder. The name is borrowed until [`build`](Self::build)
    /// copies it into the descriptor.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            start: (StateId::INIT, StateId::USER_START),
            handler: None,
            will_change: None,
            did_change: None,
            bad_change: None,
            span: None,
            record_history: false,
        }
    }

    /// Starting pair used on creation and by [`FsmInfo::reset`].
    pub fn start(mut self, from: StateId, to: StateId) -> Self {
        self.start = (from, to);
        self
    }

    /// Set the bad-change handler. The default raises and exits.
    pub fn bad_change_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) -> StateId + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn bad_change_handler_arc(mut self, handler: BadChangeHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn will_change<F>(mut self, notifier: F) -> Self
    where
        F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) + Send + Sync + 'static,
    {
        self.will_change = Some(Arc::new(notifier));
        self
    }

    pub fn did_change<F>(mut self, notifier: F) -> Self
    where
        F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId, StateId) + Send + Sync + 'static,
    {
        self.did_change = Some(Arc::new(notifier));
        self
    }

    pub fn bad_change<F>(mut self, notifier: F) -> Self
    where
        F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) + Send + Sync + 'static,
    {
        self.bad_change = Some(Arc::new(notifier));
        self
    }

    /// Install the logging notifiers for all three phases.
    pub fn with_default_notifiers(self) -> Self {
        self.will_change(default_will_change)
            .did_change(default_did_change)
            .bad_change(default_bad_change)
    }

    /// Span entered by every operation on the built descriptor.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn build(self) -> Result<FsmInfo, FsmError> {
        let name = FsmInfo::store_name(self.name)?;
        let mut info = FsmInfo::assemble(name, self.start, self.span, self.record_history);
        {
            let _entered = info.span.enter();
            tracing::trace!(fsm = %info.name, id = %info.id, "create");
        }

        if let Some(handler) = self.handler {
            info.bad_change_handler = handler;
        }
        info.will_change = self.will_change;
        info.did_change = self.did_change;
        info.bad_change = self.bad_change;

        Ok(info)
    }
}
