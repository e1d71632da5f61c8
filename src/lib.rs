//! Tablefsm: a table-driven finite state machine engine
//!
//! A caller describes a machine as a table of `(from, to) -> action`
//! entries. The engine starts at `INIT -> USER_START`, looks up the pair,
//! runs the matching action and follows the state it returns, until an
//! action (or the bad-change handler) requests `EXIT`.
//!
//! # Core Concepts
//!
//! - **StateId**: Integer state tags with reserved `IGNORE`, `INIT` and `EXIT`
//! - **TransitionTable**: Ordered, read-only table; first match wins
//! - **FsmInfo**: The descriptor holding the current pair and callbacks
//! - **ErrorChannel**: Per-run error signal, cleared unless the run is ending
//!
//! # Example
//!
//! ```rust
//! use tablefsm::builder::TableBuilder;
//! use tablefsm::{states, FsmInfo, StateId};
//!
//! states! {
//!     GREETING,
//!     FAREWELL,
//! }
//!
//! let table = TableBuilder::<Vec<String>>::new()
//!     .on(StateId::INIT, GREETING, |_, out| {
//!         out.push("hello".to_string());
//!         FAREWELL
//!     })
//!     .on(GREETING, FAREWELL, |_, out| {
//!         out.push("goodbye".to_string());
//!         StateId::EXIT
//!     })
//!     .build();
//!
//! let mut info = FsmInfo::new("greeter", None).unwrap();
//! let mut out = Vec::new();
//! let (from, to) = info.run(&mut out, &table).unwrap();
//!
//! assert_eq!(out, vec!["hello", "goodbye"]);
//! assert_eq!((from, to), (FAREWELL, StateId::EXIT));
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod signal;

// Re-export commonly used types
pub use crate::builder::{FsmError, FsmInfoBuilder, TableBuilder};
pub use crate::core::{RunHistory, StateId, Transition, TransitionRecord, TransitionTable};
pub use crate::machine::{FsmInfo, RunError};
pub use crate::signal::{ErrorChannel, ErrorDomain, RaisedError};
