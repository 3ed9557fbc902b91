//! Client error types.

use thiserror::Error;

/// Errors raised by remote service operations.
///
/// Every network failure is wrapped with an operation-specific prefix; the
/// rendered SDK error context (including the service message) rides along as
/// the payload. Nothing is retried here: retry policy belongs to the
/// definitions this crate emits, not to its own calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("deployment failed: {0}")]
    DeployFailed(String),

    #[error("invalid execution role: {0}")]
    InvalidRole(String),

    #[error("no state machine named '{0}'")]
    StateMachineNotFound(String),

    #[error("failed to start execution: {0}")]
    StartFailed(String),

    #[error("failed to get execution status: {0}")]
    DescribeFailed(String),

    #[error("failed to list executions: {0}")]
    ListFailed(String),

    #[error("failed to stop execution: {0}")]
    StopFailed(String),

    #[error("failed to delete state machine: {0}")]
    DeleteFailed(String),

    #[error("malformed JSON payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid timestamp in service response: {0}")]
    Timestamp(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_operation_prefix() {
        let error = ClientError::StartFailed("throttled".to_string());
        assert_eq!(error.to_string(), "failed to start execution: throttled");

        let error = ClientError::StateMachineNotFound("orders".to_string());
        assert_eq!(error.to_string(), "no state machine named 'orders'");
    }
}
