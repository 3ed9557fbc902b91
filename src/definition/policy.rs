//! Retry and catch policies attached to states.
//!
//! Policies are descriptive metadata: the remote engine interprets them, this
//! crate only emits them.

use serde::{Deserialize, Serialize};

/// Retry directive for a set of matched errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetryPolicy {
    /// Error identifiers this policy matches, e.g. `States.Timeout`.
    pub error_equals: Vec<String>,
    /// Seconds before the first retry.
    pub interval_seconds: u64,
    pub max_attempts: u32,
    /// Multiplier applied to the interval on each subsequent attempt.
    pub backoff_rate: f64,
}

/// Redirects matched errors to a recovery state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatchPolicy {
    pub error_equals: Vec<String>,
    /// State to transition to on a match.
    pub next: String,
    /// Where the error output is injected into the state input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,
}

/// Error identifiers for a retry or catch spec.
///
/// A single identifier converts to a one-element list, so both forms read
/// naturally at the call site:
///
/// ```rust
/// use stepflow::definition::ErrorList;
///
/// let one: ErrorList = "States.Timeout".into();
/// let many: ErrorList = vec!["States.Timeout", "States.TaskFailed"].into();
/// assert_eq!(one.into_vec(), vec!["States.Timeout".to_string()]);
/// assert_eq!(many.into_vec().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorList(Vec<String>);

impl ErrorList {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ErrorList {
    fn from(error: &str) -> Self {
        Self(vec![error.to_string()])
    }
}

impl From<String> for ErrorList {
    fn from(error: String) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<String>> for ErrorList {
    fn from(errors: Vec<String>) -> Self {
        Self(errors)
    }
}

impl From<Vec<&str>> for ErrorList {
    fn from(errors: Vec<&str>) -> Self {
        Self(errors.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ErrorList {
    fn from(errors: [&str; N]) -> Self {
        Self(errors.iter().map(|e| e.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn retry_policy_emits_all_fields() {
        let policy = RetryPolicy {
            error_equals: vec!["States.ALL".to_string()],
            interval_seconds: 1,
            max_attempts: 3,
            backoff_rate: 2.0,
        };

        assert_eq!(
            serde_json::to_value(&policy).unwrap(),
            json!({
                "ErrorEquals": ["States.ALL"],
                "IntervalSeconds": 1,
                "MaxAttempts": 3,
                "BackoffRate": 2.0
            })
        );
    }

    #[test]
    fn catch_policy_omits_missing_result_path() {
        let policy = CatchPolicy {
            error_equals: vec!["States.TaskFailed".to_string()],
            next: "Recover".to_string(),
            result_path: None,
        };

        assert_eq!(
            serde_json::to_value(&policy).unwrap(),
            json!({"ErrorEquals": ["States.TaskFailed"], "Next": "Recover"})
        );
    }

    #[test]
    fn single_error_normalizes_to_one_element_list() {
        let list: ErrorList = "States.Timeout".into();
        assert_eq!(list.into_vec(), vec!["States.Timeout".to_string()]);
    }
}
