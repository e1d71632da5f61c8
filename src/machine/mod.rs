//! The FSM descriptor and the dispatch loop that drives it.
//!
//! A run is synchronous: every notifier, action and handler call returns
//! before the loop moves on, and `&mut FsmInfo` keeps one run per
//! descriptor at a time. Transition tables are read-only and can be shared
//! between runs of different descriptors.

pub mod callbacks;
mod info;
mod run;

pub use callbacks::{
    BadChangeHandler, BadChangeNotifier, DidChangeNotifier, WillChangeNotifier,
    UNKNOWN_TRANSITION,
};
pub use info::FsmInfo;
pub use run::RunError;
