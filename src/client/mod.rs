//! Submission client for the remote orchestration service.
//!
//! [`StateMachineClient`] wraps the service SDK: deploy a built definition,
//! drive executions, and block on completion with a fixed-interval poller.
//! Credentials, region and endpoint come from the ambient AWS configuration
//! and are never interpreted here.

pub mod error;
pub mod machines;
pub mod types;

pub use error::ClientError;
pub use machines::{StateMachineClient, DEFAULT_POLL_INTERVAL};
pub use types::{
    DefinitionDocument, DeployOutcome, DeployParams, ExecutionDetail, ExecutionHandle,
    ExecutionPage, ExecutionSummary, ListExecutionsParams, StartExecutionParams,
    StopExecutionParams,
};
