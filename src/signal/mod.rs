//! Error signaling threaded through a run.
//!
//! An [`ErrorChannel`] holds at most one pending condition. Actions,
//! notifiers and the bad-change handler raise into it; the dispatch loop
//! inspects it after every iteration and clears it unless the run is
//! ending.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which failure family a channel carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorDomain {
    /// Setup and configuration failures.
    System,
    /// Bad transitions and action-raised conditions.
    Fsm,
}

impl fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("system"),
            Self::Fsm => f.write_str("fsm"),
        }
    }
}

/// A condition raised into a channel.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{domain} error {code}: {message}")]
pub struct RaisedError {
    pub domain: ErrorDomain,
    pub message: String,
    pub code: i32,
}

/// Mutable error channel passed alongside every callback.
///
/// # Example
///
/// ```rust
/// use tablefsm::signal::{ErrorChannel, ErrorDomain};
///
/// let mut channel = ErrorChannel::new(ErrorDomain::Fsm);
/// assert!(!channel.has_error());
///
/// channel.raise("disk full", 28);
/// assert!(channel.has_error());
/// assert_eq!(channel.error().map(|e| e.code), Some(28));
///
/// channel.reset();
/// assert!(channel.error().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ErrorChannel {
    domain: ErrorDomain,
    pending: Option<RaisedError>,
}

impl ErrorChannel {
    pub fn new(domain: ErrorDomain) -> Self {
        Self {
            domain,
            pending: None,
        }
    }

    pub fn domain(&self) -> ErrorDomain {
        self.domain
    }

    pub fn has_error(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a condition, replacing any pending one.
    pub fn raise(&mut self, message: impl Into<String>, code: i32) {
        let message = message.into();
        if let Some(previous) = &self.pending {
            tracing::debug!(
                domain = %self.domain,
                replaced = %previous.message,
                "error channel overwritten"
            );
        }
        self.pending = Some(RaisedError {
            domain: self.domain,
            message,
            code,
        });
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }

    pub fn error(&self) -> Option<&RaisedError> {
        self.pending.as_ref()
    }

    /// Remove and return the pending condition.
    pub fn take(&mut self) -> Option<RaisedError> {
        self.pending.take()
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new(ErrorDomain::Fsm)
    }
}
