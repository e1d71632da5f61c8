//! Core value types of the engine.
//!
//! This module contains the data the dispatch loop works over:
//! - State identifiers and the reserved sentinels
//! - Transitions and the read-only transition table
//! - Per-run history records
//!
//! Nothing in this module mutates a descriptor.

mod history;
mod state;
mod transition;

pub use history::{RunHistory, TransitionRecord};
pub use state::StateId;
pub use transition::{Action, Transition, TransitionTable};
