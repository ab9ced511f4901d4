//! Error taxonomy for the recovery core.
//!
//! A non-compliant assignment is **not** an error: it is a successfully
//! computed [`ValidationResult`](crate::rules::ValidationResult) with
//! `compliant == false`. The variants below are reserved for calls that
//! could not be evaluated at all.

use thiserror::Error;

/// Errors raised by the rule engine, cost model, and environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecoveryError {
    /// Malformed, missing, or negative input fields.
    #[error("invalid input: {0}")]
    Input(String),

    /// Invalid threshold or weight values at load time.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An action kind the core does not know how to apply or score.
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),

    /// Operation not permitted in the current episode phase.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl RecoveryError {
    pub(crate) fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Whether this is a malformed-input failure.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RecoveryError>;
