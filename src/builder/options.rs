//! Option bags and policy specs consumed by the builder.
//!
//! Every field is optional; anything left unset is simply absent from the
//! emitted document.

use crate::definition::{CatchPolicy, Comparison, ErrorList, RetryPolicy, StateFlow};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Options shared by task-like states: successor, terminal flag, timeouts
/// and the result path read by the service integration helpers.
#[derive(Clone, Debug, Default)]
pub struct StateOptions {
    pub next: Option<String>,
    pub end: bool,
    pub timeout_seconds: Option<u64>,
    pub heartbeat_seconds: Option<u64>,
    /// Where the state's result lands in its output. Integration helpers
    /// default this to `"$"`.
    pub result_path: Option<String>,
}

impl StateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(mut self, name: impl Into<String>) -> Self {
        self.next = Some(name.into());
        self
    }

    pub fn end(mut self) -> Self {
        self.end = true;
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn heartbeat_seconds(mut self, seconds: u64) -> Self {
        self.heartbeat_seconds = Some(seconds);
        self
    }

    pub fn result_path(mut self, path: impl Into<String>) -> Self {
        self.result_path = Some(path.into());
        self
    }

    /// Merge into a state's shared fields. `end` is emitted only when true.
    pub(crate) fn apply(&self, flow: &mut StateFlow) {
        if let Some(next) = &self.next {
            flow.next = Some(next.clone());
        }
        if self.end {
            flow.end = Some(true);
        }
        if let Some(timeout) = self.timeout_seconds {
            flow.timeout_seconds = Some(timeout);
        }
        if let Some(heartbeat) = self.heartbeat_seconds {
            flow.heartbeat_seconds = Some(heartbeat);
        }
    }
}

/// One rule spec for a `Choice` state.
#[derive(Clone, Debug)]
pub struct ChoiceSpec {
    pub variable: String,
    pub comparison: Comparison,
    pub next: String,
    pub is_default: bool,
}

impl ChoiceSpec {
    pub fn new(
        variable: impl Into<String>,
        comparison: Comparison,
        next: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            comparison,
            next: next.into(),
            is_default: false,
        }
    }

    /// Mark this rule's target as the fallback when no rule matches. The rule
    /// itself is still emitted alongside the others.
    pub fn otherwise(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Spec for one retry policy. Unset fields fall back to 1 second, 3 attempts
/// and a 2.0 backoff multiplier.
#[derive(Clone, Debug)]
pub struct RetrySpec {
    pub errors: ErrorList,
    pub interval: Option<u64>,
    pub max_attempts: Option<u32>,
    pub backoff_rate: Option<f64>,
}

impl RetrySpec {
    pub fn new(errors: impl Into<ErrorList>) -> Self {
        Self {
            errors: errors.into(),
            interval: None,
            max_attempts: None,
            backoff_rate: None,
        }
    }

    pub fn interval(mut self, seconds: u64) -> Self {
        self.interval = Some(seconds);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn backoff_rate(mut self, rate: f64) -> Self {
        self.backoff_rate = Some(rate);
        self
    }

    pub(crate) fn into_policy(self) -> RetryPolicy {
        RetryPolicy {
            error_equals: self.errors.into_vec(),
            interval_seconds: self.interval.unwrap_or(1),
            max_attempts: self.max_attempts.unwrap_or(3),
            backoff_rate: self.backoff_rate.unwrap_or(2.0),
        }
    }
}

/// Spec for one catch policy.
#[derive(Clone, Debug)]
pub struct CatchSpec {
    pub errors: ErrorList,
    pub next: String,
    pub result_path: Option<String>,
}

impl CatchSpec {
    pub fn new(errors: impl Into<ErrorList>, next: impl Into<String>) -> Self {
        Self {
            errors: errors.into(),
            next: next.into(),
            result_path: None,
        }
    }

    pub fn result_path(mut self, path: impl Into<String>) -> Self {
        self.result_path = Some(path.into());
        self
    }

    pub(crate) fn into_policy(self) -> CatchPolicy {
        CatchPolicy {
            error_equals: self.errors.into_vec(),
            next: self.next,
            result_path: self.result_path,
        }
    }
}

/// Options for a `Wait` state. Exactly one of the four trigger fields must be
/// supplied; `next` is carried through as-is.
#[derive(Clone, Debug, Default)]
pub struct WaitOptions {
    pub seconds: Option<u64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub seconds_path: Option<String>,
    pub timestamp_path: Option<String>,
    pub next: Option<String>,
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seconds(mut self, seconds: u64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn seconds_path(mut self, path: impl Into<String>) -> Self {
        self.seconds_path = Some(path.into());
        self
    }

    pub fn timestamp_path(mut self, path: impl Into<String>) -> Self {
        self.timestamp_path = Some(path.into());
        self
    }

    pub fn next(mut self, name: impl Into<String>) -> Self {
        self.next = Some(name.into());
        self
    }

    pub(crate) fn trigger_count(&self) -> usize {
        [
            self.seconds.is_some(),
            self.timestamp.is_some(),
            self.seconds_path.is_some(),
            self.timestamp_path.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Options for a `Pass` state: an optional static result plus the shared
/// options.
#[derive(Clone, Debug, Default)]
pub struct PassOptions {
    pub result: Option<Value>,
    pub result_path: Option<String>,
    pub common: StateOptions,
}

impl PassOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(mut self, value: Value) -> Self {
        self.result = Some(value);
        self
    }

    pub fn result_path(mut self, path: impl Into<String>) -> Self {
        self.result_path = Some(path.into());
        self
    }

    pub fn common(mut self, options: StateOptions) -> Self {
        self.common = options;
        self
    }
}

/// Options for a `Map` state.
#[derive(Clone, Debug, Default)]
pub struct MapOptions {
    /// Path to the iterable in the input. Defaults to `"$"`.
    pub items_path: Option<String>,
    /// `0` (the default) means unbounded.
    pub max_concurrency: Option<u32>,
    pub common: StateOptions,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items_path(mut self, path: impl Into<String>) -> Self {
        self.items_path = Some(path.into());
        self
    }

    pub fn max_concurrency(mut self, limit: u32) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    pub fn common(mut self, options: StateOptions) -> Self {
        self.common = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_skips_unset_options() {
        let mut flow = StateFlow::default();
        StateOptions::new().apply(&mut flow);
        assert_eq!(flow, StateFlow::default());
    }

    #[test]
    fn apply_sets_end_only_when_true() {
        let mut flow = StateFlow::default();
        StateOptions::new().end().timeout_seconds(30).apply(&mut flow);
        assert_eq!(flow.end, Some(true));
        assert_eq!(flow.timeout_seconds, Some(30));
        assert_eq!(flow.next, None);
    }

    #[test]
    fn retry_spec_fills_in_defaults() {
        let policy = RetrySpec::new("States.ALL").into_policy();
        assert_eq!(policy.error_equals, vec!["States.ALL".to_string()]);
        assert_eq!(policy.interval_seconds, 1);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff_rate, 2.0);
    }

    #[test]
    fn wait_options_count_their_triggers() {
        assert_eq!(WaitOptions::new().trigger_count(), 0);
        assert_eq!(WaitOptions::new().seconds(5).trigger_count(), 1);
        assert_eq!(
            WaitOptions::new()
                .seconds(5)
                .timestamp_path("$.at")
                .trigger_count(),
            2
        );
    }
}
