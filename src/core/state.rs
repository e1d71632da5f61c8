//! State identifiers.
//!
//! States are plain integer tags. A handful of low values are reserved by
//! the engine; caller states start at [`StateId::USER_START`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier naming a node in the state graph.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::StateId;
///
/// let reading = StateId::user(0);
/// let closing = StateId::user(1);
///
/// assert_eq!(reading, StateId::USER_START);
/// assert!(closing > reading);
/// assert!(!reading.is_reserved());
/// assert!(StateId::EXIT.is_reserved());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(i32);

impl StateId {
    /// End-of-table marker. Never a real state.
    pub const IGNORE: StateId = StateId(-1);

    /// Synthetic state every fresh descriptor comes from.
    pub const INIT: StateId = StateId(0);

    /// Terminal state. A run stops once this is the next requested state.
    pub const EXIT: StateId = StateId(1);

    /// First identifier available to callers.
    pub const USER_START: StateId = StateId(2);

    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The `n`th caller state, counting from [`StateId::USER_START`].
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than `i32::MAX - 2`. Use
    /// [`StateId::checked_user`] for indices that are not known to fit.
    pub const fn user(n: i32) -> Self {
        match Self::checked_user(n) {
            Some(state) => state,
            None => panic!("user state index out of range"),
        }
    }

    /// The `n`th caller state, or `None` if it does not fit in an `i32`.
    pub const fn checked_user(n: i32) -> Option<Self> {
        match Self::USER_START.0.checked_add(n) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// True for `IGNORE`, `INIT` and `EXIT`.
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::USER_START.0
    }

    pub const fn is_exit(self) -> bool {
        self.0 == Self::EXIT.0
    }

    /// Human-readable label for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::IGNORE => "IGNORE",
            Self::INIT => "INIT",
            Self::EXIT => "EXIT",
            _ => "USER",
        }
    }
}

impl From<i32> for StateId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<StateId> for i32 {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_reserved() {
            write!(f, "{}({})", self.label(), self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
