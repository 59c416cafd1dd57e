//! Engine error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the automaton engine.
///
/// A symbol without a transition, a lookup of an unregistered state name and
/// an inspection query with no matches are not errors; those come back as
/// `None` or an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DfaError {
    #[error("automaton '{automaton}' has no states")]
    NoStates { automaton: String },

    #[error("automaton '{automaton}' has no start state")]
    StartNotSet { automaton: String },

    #[error("start state not found: {start}")]
    UnknownStart { start: String },

    #[error("state not found: {state}")]
    UnknownState { state: String },

    #[error("dangling transition: '{from}' --{symbol}--> '{to}' targets an unregistered state")]
    DanglingTransition {
        from: String,
        symbol: String,
        to: String,
    },
}

impl DfaError {
    /// Returns whether this error means the automaton as a whole is not
    /// runnable, as opposed to a single bad lookup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DfaError::NoStates { .. }
                | DfaError::StartNotSet { .. }
                | DfaError::UnknownStart { .. }
                | DfaError::DanglingTransition { .. }
        )
    }

    /// Returns a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            DfaError::NoStates { .. } => "NO_STATES",
            DfaError::StartNotSet { .. } => "START_NOT_SET",
            DfaError::UnknownStart { .. } => "UNKNOWN_START",
            DfaError::UnknownState { .. } => "UNKNOWN_STATE",
            DfaError::DanglingTransition { .. } => "DANGLING_TRANSITION",
        }
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
