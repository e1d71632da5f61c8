//! Builder API for descriptors and transition tables.
//!
//! This module provides fluent builders and a macro for declaring states,
//! so tables can be written with minimal boilerplate.

pub mod error;
pub mod info;
pub mod macros;
pub mod table;

pub use error::FsmError;
pub use info::FsmInfoBuilder;
pub use table::TableBuilder;

use crate::core::{StateId, Transition};

/// Create a transition whose action always requests `next`.
///
/// # Example
///
/// ```
/// use tablefsm::builder::fixed_transition;
/// use tablefsm::StateId;
///
/// let transition = fixed_transition::<()>(StateId::INIT, StateId::USER_START, StateId::EXIT);
/// assert!(transition.matches(StateId::INIT, StateId::USER_START));
/// ```
pub fn fixed_transition<A>(from: StateId, to: StateId, next: StateId) -> Transition<A> {
    Transition::new(from, to, move |_, _| next)
}

/// Create a transition that ends the run once taken.
pub fn exit_transition<A>(from: StateId, to: StateId) -> Transition<A> {
    fixed_transition(from, to, StateId::EXIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ErrorChannel;

    #[test]
    fn fixed_transition_requests_next() {
        let transition = fixed_transition::<()>(StateId::INIT, StateId::user(0), StateId::user(1));

        assert_eq!(transition.from, StateId::INIT);
        assert_eq!(transition.to, StateId::user(0));
        assert_eq!(
            transition.perform(&mut ErrorChannel::default(), &mut ()),
            StateId::user(1)
        );
    }

    #[test]
    fn exit_transition_requests_exit() {
        let transition = exit_transition::<u8>(StateId::user(0), StateId::user(1));

        assert_eq!(
            transition.perform(&mut ErrorChannel::default(), &mut 0),
            StateId::EXIT
        );
    }
}
