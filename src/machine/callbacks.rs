//! Notifier and bad-change handler callbacks, plus their default forms.
//!
//! Notifiers are purely observational. The bad-change handler is the only
//! callback outside the transition table that decides where a run goes next.

use super::info::FsmInfo;
use crate::core::StateId;
use crate::signal::ErrorChannel;
use std::sync::Arc;

/// Error code raised by [`default_bad_change_handler`].
pub const UNKNOWN_TRANSITION: i32 = 1;

/// Called before each lookup with the pair about to be resolved.
pub type WillChangeNotifier =
    Arc<dyn Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) + Send + Sync>;

/// Called after an action with the committed pair and the requested next state.
pub type DidChangeNotifier =
    Arc<dyn Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId, StateId) + Send + Sync>;

/// Called when a lookup fails, before the bad-change handler.
pub type BadChangeNotifier =
    Arc<dyn Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) + Send + Sync>;

/// Decides the next state when no transition matches.
pub type BadChangeHandler =
    Arc<dyn Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) -> StateId + Send + Sync>;

pub fn will_change<F>(notifier: F) -> WillChangeNotifier
where
    F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) + Send + Sync + 'static,
{
    Arc::new(notifier)
}

pub fn did_change<F>(notifier: F) -> DidChangeNotifier
where
    F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId, StateId) + Send + Sync + 'static,
{
    Arc::new(notifier)
}

pub fn bad_change<F>(notifier: F) -> BadChangeNotifier
where
    F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) + Send + Sync + 'static,
{
    Arc::new(notifier)
}

pub fn bad_change_handler<F>(handler: F) -> BadChangeHandler
where
    F: Fn(&FsmInfo, &mut ErrorChannel, StateId, StateId) -> StateId + Send + Sync + 'static,
{
    Arc::new(handler)
}

pub fn default_will_change(info: &FsmInfo, _errors: &mut ErrorChannel, from: StateId, to: StateId) {
    tracing::info!(fsm = %info.name(), "{}: will change {} -> {}", info.name(), from, to);
}

pub fn default_did_change(
    info: &FsmInfo,
    _errors: &mut ErrorChannel,
    from: StateId,
    to: StateId,
    next: StateId,
) {
    tracing::info!(
        fsm = %info.name(),
        "{}: did change {} -> {}, moving to {}",
        info.name(),
        from,
        to,
        next
    );
}

pub fn default_bad_change(info: &FsmInfo, _errors: &mut ErrorChannel, from: StateId, to: StateId) {
    tracing::info!(fsm = %info.name(), "{}: bad change {} -> {}", info.name(), from, to);
}

/// Raise an unknown-transition error and route the run to `EXIT`.
pub fn default_bad_change_handler(
    info: &FsmInfo,
    errors: &mut ErrorChannel,
    from: StateId,
    to: StateId,
) -> StateId {
    let message = format!("Unknown state transition: {} -> {}", from, to);
    tracing::error!(fsm = %info.name(), %from, %to, "{}", message);
    errors.raise(message, UNKNOWN_TRANSITION);
    StateId::EXIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ErrorDomain;

    fn info() -> FsmInfo {
        FsmInfo::new("callbacks", None).unwrap()
    }

    #[test]
    fn default_handler_raises_and_exits() {
        let info = info();
        let mut errors = ErrorChannel::new(ErrorDomain::Fsm);

        let next =
            default_bad_change_handler(&info, &mut errors, StateId::user(0), StateId::user(7));

        assert_eq!(next, StateId::EXIT);
        let raised = errors.error().unwrap();
        assert_eq!(raised.code, UNKNOWN_TRANSITION);
        assert_eq!(raised.message, "Unknown state transition: 2 -> 9");
    }

    #[test]
    fn default_notifiers_leave_channel_untouched() {
        let info = info();
        let mut errors = ErrorChannel::default();

        default_will_change(&info, &mut errors, StateId::INIT, StateId::USER_START);
        default_did_change(&info, &mut errors, StateId::INIT, StateId::USER_START, StateId::EXIT);
        default_bad_change(&info, &mut errors, StateId::INIT, StateId::USER_START);

        assert!(!errors.has_error());
        assert_eq!(info.from_state(), StateId::INIT);
    }

    #[test]
    fn constructors_wrap_closures() {
        let info = info();
        let mut errors = ErrorChannel::default();
        let handler = bad_change_handler(|_, _, _, to| to);

        assert_eq!(
            handler(&info, &mut errors, StateId::INIT, StateId::user(3)),
            StateId::user(3)
        );
    }
}
