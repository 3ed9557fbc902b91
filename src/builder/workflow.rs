//! The fluent workflow builder.

use crate::builder::error::BuildError;
use crate::builder::options::{
    CatchSpec, ChoiceSpec, MapOptions, PassOptions, RetrySpec, StateOptions, WaitOptions,
};
use crate::definition::{
    Branch, ChoiceRule, ChoiceState, MapState, ParallelState, PassState, State, StateFlow,
    StateMachine, TaskState, WaitState,
};
use indexmap::IndexMap;
use serde_json::Value;

/// Chainable builder for a state-machine definition.
///
/// Each call appends or amends one entry in the in-progress document and
/// moves the cursor, so `end()` and `next()` always address the most recently
/// created state. Fallible steps return `Result` and compose with `?`;
/// `build()` finishes the document.
///
/// Builders are plain values; two builders never share state.
///
/// # Example
///
/// ```rust
/// use stepflow::builder::{StateOptions, WorkflowBuilder};
///
/// let machine = WorkflowBuilder::new()
///     .start_with("Greet")
///     .lambda(
///         "Greet",
///         "arn:aws:lambda:us-east-1:123456789012:function:greet",
///         StateOptions::new(),
///     )
///     .end()
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.start_at, "Greet");
/// ```
#[derive(Clone, Debug)]
pub struct WorkflowBuilder {
    comment: String,
    start_at: Option<String>,
    states: IndexMap<String, State>,
    cursor: Option<String>,
}

impl WorkflowBuilder {
    /// Create a builder with the default comment.
    pub fn new() -> Self {
        Self::with_comment("Step Functions Workflow")
    }

    /// Create a builder with a custom description.
    pub fn with_comment(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            start_at: None,
            states: IndexMap::new(),
            cursor: None,
        }
    }

    /// Set the start state and move the cursor there. The state may be
    /// declared afterward.
    pub fn start_with(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.start_at = Some(name.clone());
        self.cursor = Some(name);
        self
    }

    /// Add a `Choice` state from an ordered rule list.
    ///
    /// Every rule becomes a `Choices` entry; the target of the (at most one)
    /// rule marked [`otherwise`](ChoiceSpec::otherwise) additionally becomes
    /// the `Default`.
    pub fn choice(mut self, name: impl Into<String>, rules: Vec<ChoiceSpec>) -> Self {
        let name = name.into();
        let default = rules
            .iter()
            .find(|rule| rule.is_default)
            .map(|rule| rule.next.clone());
        let choices = rules
            .into_iter()
            .map(|rule| ChoiceRule {
                variable: rule.variable,
                comparison: rule.comparison,
                next: rule.next,
            })
            .collect();

        self.states.insert(
            name.clone(),
            State::Choice(ChoiceState {
                choices,
                default,
                flow: StateFlow::default(),
            }),
        );
        self.cursor = Some(name);
        self
    }

    /// Add a `Parallel` state over the given branch sub-graphs.
    pub fn parallel(
        mut self,
        name: impl Into<String>,
        branches: Vec<Branch>,
        options: StateOptions,
    ) -> Self {
        let name = name.into();
        let mut flow = StateFlow::default();
        options.apply(&mut flow);

        self.states
            .insert(name.clone(), State::Parallel(ParallelState { branches, flow }));
        self.cursor = Some(name);
        self
    }

    /// Add a `Map` state applying `iterator` to each item of the input
    /// collection. Items path defaults to the whole input (`$`), concurrency
    /// to unbounded (`0`).
    pub fn map(
        mut self,
        name: impl Into<String>,
        iterator: impl Into<Branch>,
        options: MapOptions,
    ) -> Self {
        let name = name.into();
        let mut flow = StateFlow::default();
        options.common.apply(&mut flow);

        self.states.insert(
            name.clone(),
            State::Map(MapState {
                items_path: options.items_path.unwrap_or_else(|| "$".to_string()),
                max_concurrency: options.max_concurrency.unwrap_or(0),
                iterator: iterator.into(),
                flow,
            }),
        );
        self.cursor = Some(name);
        self
    }

    /// Add a `Wait` state. Exactly one of the trigger fields (seconds,
    /// timestamp, seconds path, timestamp path) must be supplied.
    pub fn wait(mut self, name: impl Into<String>, options: WaitOptions) -> Result<Self, BuildError> {
        let name = name.into();
        if options.trigger_count() != 1 {
            return Err(BuildError::InvalidWaitState(name));
        }

        self.states.insert(
            name.clone(),
            State::Wait(WaitState {
                seconds: options.seconds,
                timestamp: options.timestamp,
                seconds_path: options.seconds_path,
                timestamp_path: options.timestamp_path,
                flow: StateFlow {
                    next: options.next,
                    ..Default::default()
                },
            }),
        );
        self.cursor = Some(name);
        Ok(self)
    }

    /// Add a `Pass` state.
    pub fn pass(mut self, name: impl Into<String>, options: PassOptions) -> Self {
        let name = name.into();
        let mut flow = StateFlow::default();
        options.common.apply(&mut flow);

        self.states.insert(
            name.clone(),
            State::Pass(PassState {
                result: options.result,
                result_path: options.result_path,
                flow,
            }),
        );
        self.cursor = Some(name);
        self
    }

    /// Append catch policies to an already-declared state.
    ///
    /// Fails without touching the document when `state_name` is undeclared.
    pub fn add_catch(
        mut self,
        state_name: &str,
        catchers: Vec<CatchSpec>,
    ) -> Result<Self, BuildError> {
        let state = self
            .states
            .get_mut(state_name)
            .ok_or_else(|| BuildError::StateNotFound(state_name.to_string()))?;

        state
            .flow_mut()
            .catch
            .extend(catchers.into_iter().map(CatchSpec::into_policy));
        Ok(self)
    }

    /// Append retry policies to an already-declared state. Missing interval,
    /// attempt count and backoff rate default to 1 second, 3 attempts, 2.0.
    pub fn add_retry(
        mut self,
        state_name: &str,
        retriers: Vec<RetrySpec>,
    ) -> Result<Self, BuildError> {
        let state = self
            .states
            .get_mut(state_name)
            .ok_or_else(|| BuildError::StateNotFound(state_name.to_string()))?;

        state
            .flow_mut()
            .retry
            .extend(retriers.into_iter().map(RetrySpec::into_policy));
        Ok(self)
    }

    /// Mark the state at the cursor terminal. No-op when the cursor is unset
    /// or names a state that was never declared.
    pub fn end(mut self) -> Self {
        if let Some(cursor) = self.cursor.clone() {
            if let Some(state) = self.states.get_mut(&cursor) {
                state.flow_mut().end = Some(true);
            }
        }
        self
    }

    /// Point the state at the cursor to its successor. Same no-op rule as
    /// [`end`](Self::end).
    pub fn next(mut self, name: impl Into<String>) -> Self {
        if let Some(cursor) = self.cursor.clone() {
            if let Some(state) = self.states.get_mut(&cursor) {
                state.flow_mut().next = Some(name.into());
            }
        }
        self
    }

    /// Opt-in graph integrity pass: every `Next`, `Default` and catch target,
    /// and the start pointer of the document and of each nested fragment,
    /// must name a declared state. `build()` does not run this.
    pub fn validate(&self) -> Result<(), BuildError> {
        check_fragment(self.start_at.as_deref(), &self.states)
    }

    /// Finish the document. Fails when no start state was set.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        let start_at = self.start_at.ok_or(BuildError::MissingStartState)?;
        Ok(StateMachine {
            comment: self.comment,
            start_at,
            states: self.states,
        })
    }

    /// Shared path for the service integration helpers: install one `Task`
    /// state and advance the cursor.
    pub(crate) fn task_state(
        mut self,
        name: String,
        resource: String,
        parameters: Option<Value>,
        result_selector: Option<Value>,
        options: StateOptions,
    ) -> Self {
        let mut flow = StateFlow::default();
        options.apply(&mut flow);

        self.states.insert(
            name.clone(),
            State::Task(TaskState {
                resource,
                parameters,
                result_path: Some(options.result_path.unwrap_or_else(|| "$".to_string())),
                result_selector,
                flow,
            }),
        );
        self.cursor = Some(name);
        self
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_fragment(
    start_at: Option<&str>,
    states: &IndexMap<String, State>,
) -> Result<(), BuildError> {
    if let Some(start) = start_at {
        if !states.contains_key(start) {
            return Err(BuildError::UnknownStartState(start.to_string()));
        }
    }

    for (name, state) in states {
        let mut targets: Vec<&str> = Vec::new();
        if let Some(next) = &state.flow().next {
            targets.push(next);
        }
        for catcher in &state.flow().catch {
            targets.push(&catcher.next);
        }

        match state {
            State::Choice(choice) => {
                targets.extend(choice.choices.iter().map(|rule| rule.next.as_str()));
                if let Some(default) = &choice.default {
                    targets.push(default);
                }
            }
            State::Parallel(parallel) => {
                for branch in &parallel.branches {
                    check_fragment(Some(&branch.start_at), &branch.states)?;
                }
            }
            State::Map(map) => {
                check_fragment(Some(&map.iterator.start_at), &map.iterator.states)?;
            }
            _ => {}
        }

        for target in targets {
            if !states.contains_key(target) {
                return Err(BuildError::DanglingTarget {
                    state: name.clone(),
                    target: target.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Comparison;
    use serde_json::json;

    #[test]
    fn build_without_start_state_fails() {
        let result = WorkflowBuilder::new()
            .pass("Only", PassOptions::new())
            .build();

        assert_eq!(result.unwrap_err(), BuildError::MissingStartState);
    }

    #[test]
    fn single_pass_state_emits_minimal_document() {
        let machine = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new())
            .end()
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine).unwrap();
        assert_eq!(
            value,
            json!({
                "Comment": "Step Functions Workflow",
                "StartAt": "A",
                "States": {"A": {"Type": "Pass", "End": true}}
            })
        );
    }

    #[test]
    fn choice_emits_all_rules_and_the_default() {
        let machine = WorkflowBuilder::new()
            .start_with("C")
            .choice(
                "C",
                vec![
                    ChoiceSpec::new("$.x", Comparison::NumericEquals(1.into()), "A"),
                    ChoiceSpec::new("$.x", Comparison::NumericEquals(2.into()), "B").otherwise(),
                ],
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["C"]).unwrap();
        assert_eq!(
            value,
            json!({
                "Type": "Choice",
                "Choices": [
                    {"Variable": "$.x", "NumericEquals": 1, "Next": "A"},
                    {"Variable": "$.x", "NumericEquals": 2, "Next": "B"}
                ],
                "Default": "B"
            })
        );
    }

    #[test]
    fn wait_requires_exactly_one_trigger() {
        let none = WorkflowBuilder::new()
            .start_with("W")
            .wait("W", WaitOptions::new().next("After"));
        assert_eq!(
            none.unwrap_err(),
            BuildError::InvalidWaitState("W".to_string())
        );

        let two = WorkflowBuilder::new()
            .start_with("W")
            .wait("W", WaitOptions::new().seconds(5).seconds_path("$.delay"));
        assert_eq!(
            two.unwrap_err(),
            BuildError::InvalidWaitState("W".to_string())
        );
    }

    #[test]
    fn wait_carries_next_but_no_merged_options() {
        let machine = WorkflowBuilder::new()
            .start_with("W")
            .wait("W", WaitOptions::new().seconds(30).next("After"))
            .unwrap()
            .pass("After", PassOptions::new())
            .end()
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["W"]).unwrap();
        assert_eq!(
            value,
            json!({"Type": "Wait", "Seconds": 30, "Next": "After"})
        );
    }

    #[test]
    fn map_defaults_to_whole_input_and_unbounded() {
        let iterator = Branch::new("Inner", IndexMap::new());
        let machine = WorkflowBuilder::new()
            .start_with("M")
            .map("M", iterator, MapOptions::new())
            .end()
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["M"]).unwrap();
        assert_eq!(value["ItemsPath"], json!("$"));
        assert_eq!(value["MaxConcurrency"], json!(0));
    }

    #[test]
    fn add_retry_on_unknown_state_fails() {
        let result = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new())
            .add_retry("Missing", vec![RetrySpec::new("States.ALL")]);

        assert_eq!(
            result.unwrap_err(),
            BuildError::StateNotFound("Missing".to_string())
        );
    }

    #[test]
    fn add_catch_normalizes_a_single_error_identifier() {
        let machine = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new())
            .pass("Recover", PassOptions::new())
            .add_catch("A", vec![CatchSpec::new("States.Timeout", "Recover")])
            .unwrap()
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["A"]).unwrap();
        assert_eq!(
            value["Catch"],
            json!([{"ErrorEquals": ["States.Timeout"], "Next": "Recover"}])
        );
    }

    #[test]
    fn add_retry_appends_in_order() {
        let machine = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new())
            .add_retry("A", vec![RetrySpec::new("States.Timeout").max_attempts(5)])
            .unwrap()
            .add_retry("A", vec![RetrySpec::new("States.ALL")])
            .unwrap()
            .build()
            .unwrap();

        let retry = &machine.states["A"].flow().retry;
        assert_eq!(retry.len(), 2);
        assert_eq!(retry[0].error_equals, vec!["States.Timeout".to_string()]);
        assert_eq!(retry[0].max_attempts, 5);
        assert_eq!(retry[1].error_equals, vec!["States.ALL".to_string()]);
        assert_eq!(retry[1].max_attempts, 3);
    }

    #[test]
    fn end_and_next_are_noops_without_a_declared_cursor_state() {
        // start_with moves the cursor to a name that is never declared, so
        // end() has nothing to mark.
        let machine = WorkflowBuilder::new()
            .start_with("Ghost")
            .end()
            .next("Nowhere")
            .pass("Real", PassOptions::new())
            .build()
            .unwrap();

        assert!(!machine.states.contains_key("Ghost"));
        assert_eq!(machine.states["Real"].flow().end, None);
    }

    #[test]
    fn next_rewires_the_cursor_state() {
        let machine = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new())
            .next("B")
            .pass("B", PassOptions::new())
            .end()
            .build()
            .unwrap();

        assert_eq!(machine.states["A"].flow().next.as_deref(), Some("B"));
        assert_eq!(machine.states["B"].flow().end, Some(true));
    }

    #[test]
    fn validate_flags_dangling_next() {
        let builder = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new().common(StateOptions::new().next("Gone")));

        assert_eq!(
            builder.validate().unwrap_err(),
            BuildError::DanglingTarget {
                state: "A".to_string(),
                target: "Gone".to_string(),
            }
        );
    }

    #[test]
    fn validate_flags_unknown_start_state() {
        let builder = WorkflowBuilder::new()
            .start_with("Ghost")
            .pass("Real", PassOptions::new());

        assert_eq!(
            builder.validate().unwrap_err(),
            BuildError::UnknownStartState("Ghost".to_string())
        );
    }

    #[test]
    fn validate_descends_into_branches() {
        let branch = Branch::new("Inner", IndexMap::new());
        let builder = WorkflowBuilder::new()
            .start_with("P")
            .parallel("P", vec![branch], StateOptions::new().end());

        assert_eq!(
            builder.validate().unwrap_err(),
            BuildError::UnknownStartState("Inner".to_string())
        );
    }

    #[test]
    fn validate_accepts_a_closed_graph() {
        let builder = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new().common(StateOptions::new().next("B")))
            .pass("B", PassOptions::new())
            .end();

        assert!(builder.validate().is_ok());
    }

    #[test]
    fn builders_do_not_interfere() {
        let first = WorkflowBuilder::new()
            .start_with("A")
            .pass("A", PassOptions::new())
            .end();
        let second = WorkflowBuilder::new()
            .start_with("B")
            .pass("B", PassOptions::new());

        let first = first.build().unwrap();
        let second = second.build().unwrap();
        assert!(first.states.contains_key("A") && !first.states.contains_key("B"));
        assert!(second.states.contains_key("B") && !second.states.contains_key("A"));
    }
}
