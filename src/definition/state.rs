//! State descriptors: the tagged union of workflow node kinds.

use super::policy::{CatchPolicy, RetryPolicy};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node in the workflow graph.
///
/// Serialized with an internal `Type` tag, so a task state emits as
/// `{"Type": "Task", "Resource": ..., ...}`. Fields left unset never appear
/// in the output; there are no null placeholders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum State {
    Task(TaskState),
    Choice(ChoiceState),
    Parallel(ParallelState),
    Map(MapState),
    Wait(WaitState),
    Pass(PassState),
}

impl State {
    /// Shared transition/error fields, present on every state kind.
    pub fn flow(&self) -> &StateFlow {
        match self {
            State::Task(s) => &s.flow,
            State::Choice(s) => &s.flow,
            State::Parallel(s) => &s.flow,
            State::Map(s) => &s.flow,
            State::Wait(s) => &s.flow,
            State::Pass(s) => &s.flow,
        }
    }

    pub(crate) fn flow_mut(&mut self) -> &mut StateFlow {
        match self {
            State::Task(s) => &mut s.flow,
            State::Choice(s) => &mut s.flow,
            State::Parallel(s) => &mut s.flow,
            State::Map(s) => &mut s.flow,
            State::Wait(s) => &mut s.flow,
            State::Pass(s) => &mut s.flow,
        }
    }
}

/// Transition and error-handling fields shared by every state kind.
///
/// `next` and `end` are mutually exclusive; the builder's
/// [`end()`](crate::builder::WorkflowBuilder::end) and
/// [`next()`](crate::builder::WorkflowBuilder::next) each overwrite only their
/// own field, matching the service's own validation responsibility.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateFlow {
    /// Successor state name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Marks a terminal state. Emitted only as `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartbeat_seconds: Option<u64>,
    /// Ordered retry policies, matched first to last by the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retry: Vec<RetryPolicy>,
    /// Ordered catch policies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catch: Vec<CatchPolicy>,
}

/// A state that invokes one external action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskState {
    /// Identifier of the action to invoke (function ARN or service
    /// integration URI).
    pub resource: String,
    /// Free-form payload; values may be literals or path expressions the
    /// service resolves at runtime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_selector: Option<Value>,
    #[serde(flatten)]
    pub flow: StateFlow,
}

/// A branching state: ordered rules plus an optional default target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceState {
    pub choices: Vec<ChoiceRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(flatten)]
    pub flow: StateFlow,
}

/// One rule in a `Choice` state. The comparison operator becomes the JSON
/// key, e.g. `{"Variable": "$.x", "NumericEquals": 1, "Next": "A"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceRule {
    /// Path expression naming the value to compare.
    pub variable: String,
    #[serde(flatten)]
    pub comparison: Comparison,
    /// Target state when the rule matches.
    pub next: String,
}

/// Comparison operators a choice rule may apply.
///
/// A closed set: an operator the service does not know cannot be expressed,
/// so a misspelled action can never reach the emitted document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Comparison {
    StringEquals(String),
    StringLessThan(String),
    StringGreaterThan(String),
    StringLessThanEquals(String),
    StringGreaterThanEquals(String),
    NumericEquals(serde_json::Number),
    NumericLessThan(serde_json::Number),
    NumericGreaterThan(serde_json::Number),
    NumericLessThanEquals(serde_json::Number),
    NumericGreaterThanEquals(serde_json::Number),
    BooleanEquals(bool),
    TimestampEquals(DateTime<Utc>),
    TimestampLessThan(DateTime<Utc>),
    TimestampGreaterThan(DateTime<Utc>),
    TimestampLessThanEquals(DateTime<Utc>),
    TimestampGreaterThanEquals(DateTime<Utc>),
}

/// Concurrent sub-graphs that all run on the same input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParallelState {
    pub branches: Vec<Branch>,
    #[serde(flatten)]
    pub flow: StateFlow,
}

/// A recursive definition fragment: a start pointer plus its states.
///
/// Used for `Parallel` branches and the `Map` iterator. Build one directly or
/// convert a finished [`StateMachine`](super::StateMachine) with `.into()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Branch {
    pub start_at: String,
    pub states: IndexMap<String, State>,
}

impl Branch {
    pub fn new(start_at: impl Into<String>, states: IndexMap<String, State>) -> Self {
        Self {
            start_at: start_at.into(),
            states,
        }
    }
}

/// Applies one iterator sub-graph to each item of an input collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapState {
    /// Path to the iterable in the input. `"$"` iterates the whole input.
    pub items_path: String,
    /// `0` means unbounded.
    pub max_concurrency: u32,
    pub iterator: Branch,
    #[serde(flatten)]
    pub flow: StateFlow,
}

/// Pauses the execution until a duration elapses or a timestamp passes.
///
/// Exactly one of the four trigger fields is set; the builder enforces this
/// when the state is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaitState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_path: Option<String>,
    #[serde(flatten)]
    pub flow: StateFlow,
}

/// Passes its input to its output, optionally injecting a static result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PassState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_path: Option<String>,
    #[serde(flatten)]
    pub flow: StateFlow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_state_emits_type_tag_and_omits_unset_fields() {
        let state = State::Task(TaskState {
            resource: "arn:aws:states:::sqs:sendMessage".to_string(),
            parameters: Some(json!({"QueueUrl": "https://queue"})),
            result_path: None,
            result_selector: None,
            flow: StateFlow::default(),
        });

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "Type": "Task",
                "Resource": "arn:aws:states:::sqs:sendMessage",
                "Parameters": {"QueueUrl": "https://queue"}
            })
        );
    }

    #[test]
    fn choice_rule_flattens_the_operator_into_the_rule_object() {
        let rule = ChoiceRule {
            variable: "$.count".to_string(),
            comparison: Comparison::NumericGreaterThan(10.into()),
            next: "Overflow".to_string(),
        };

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({"Variable": "$.count", "NumericGreaterThan": 10, "Next": "Overflow"})
        );
    }

    #[test]
    fn choice_rule_round_trips() {
        let rule = ChoiceRule {
            variable: "$.ok".to_string(),
            comparison: Comparison::BooleanEquals(true),
            next: "Done".to_string(),
        };

        let text = serde_json::to_string(&rule).unwrap();
        let parsed: ChoiceRule = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn wait_state_keeps_only_the_supplied_trigger() {
        let state = State::Wait(WaitState {
            seconds: None,
            timestamp: None,
            seconds_path: Some("$.delay".to_string()),
            timestamp_path: None,
            flow: StateFlow {
                next: Some("After".to_string()),
                ..Default::default()
            },
        });

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({"Type": "Wait", "SecondsPath": "$.delay", "Next": "After"})
        );
    }

    #[test]
    fn map_state_always_emits_items_path_and_concurrency() {
        let state = State::Map(MapState {
            items_path: "$".to_string(),
            max_concurrency: 0,
            iterator: Branch::new("Inner", IndexMap::new()),
            flow: StateFlow::default(),
        });

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "Type": "Map",
                "ItemsPath": "$",
                "MaxConcurrency": 0,
                "Iterator": {"StartAt": "Inner", "States": {}}
            })
        );
    }

    #[test]
    fn flow_mut_reaches_every_state_kind() {
        let mut state = State::Choice(ChoiceState {
            choices: Vec::new(),
            default: None,
            flow: StateFlow::default(),
        });

        state.flow_mut().next = Some("Elsewhere".to_string());
        assert_eq!(state.flow().next.as_deref(), Some("Elsewhere"));
    }
}
