//! Build errors for workflow construction.

use thiserror::Error;

/// Errors that can occur while assembling or finishing a definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Start state not specified. Call .start_with(name) before .build()")]
    MissingStartState,

    #[error("State '{0}' not found. Declare it before attaching policies")]
    StateNotFound(String),

    #[error(
        "Wait state '{0}' needs exactly one of seconds, timestamp, \
         seconds_path or timestamp_path"
    )]
    InvalidWaitState(String),

    #[error("State '{state}' targets '{target}', which is not declared")]
    DanglingTarget { state: String, target: String },

    #[error("Start state '{0}' is not declared")]
    UnknownStartState(String),
}
