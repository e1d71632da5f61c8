//! Setup and configuration errors.

use crate::signal::{ErrorDomain, RaisedError};
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur when creating or configuring a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("Could not store descriptor name '{name}': {source}")]
    NameAllocation {
        name: String,
        source: TryReserveError,
    },

    #[error("Bad-change handler cannot be empty. Keep the current handler or supply a new one")]
    MissingBadChangeHandler,
}

impl FsmError {
    /// Numeric code used when the error is raised into a channel.
    pub fn code(&self) -> i32 {
        match self {
            Self::NameAllocation { .. } => 12,
            Self::MissingBadChangeHandler => 22,
        }
    }
}

impl From<FsmError> for RaisedError {
    fn from(error: FsmError) -> Self {
        RaisedError {
            domain: ErrorDomain::System,
            code: error.code(),
            message: error.to_string(),
        }
    }
}
