//! Nested workflow invocation.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{Map, Value};

/// Fire-and-forget or run-to-completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatesAction {
    /// Start the nested execution and continue immediately.
    StartExecution,
    /// Start the nested execution and wait for it to finish.
    StartExecutionSync,
}

impl StatesAction {
    fn resource(self) -> &'static str {
        match self {
            StatesAction::StartExecution => "arn:aws:states:::states:startExecution",
            StatesAction::StartExecutionSync => "arn:aws:states:::states:startExecution.sync",
        }
    }
}

/// Parameters for a nested workflow state.
#[derive(Clone, Debug)]
pub struct StatesParams {
    pub state_machine_arn: String,
    /// Input payload for the nested execution.
    pub input: Option<Value>,
    pub execution_name: Option<String>,
}

impl StatesParams {
    pub fn new(state_machine_arn: impl Into<String>) -> Self {
        Self {
            state_machine_arn: state_machine_arn.into(),
            input: None,
            execution_name: None,
        }
    }

    pub fn input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn execution_name(mut self, name: impl Into<String>) -> Self {
        self.execution_name = Some(name.into());
        self
    }
}

impl WorkflowBuilder {
    /// Add a task that starts another state machine.
    pub fn step_function(
        self,
        name: impl Into<String>,
        action: StatesAction,
        params: StatesParams,
        options: StateOptions,
    ) -> Self {
        let mut parameters = Map::new();
        parameters.insert(
            "StateMachineArn".to_string(),
            Value::String(params.state_machine_arn),
        );
        if let Some(input) = params.input {
            parameters.insert("Input".to_string(), input);
        }
        if let Some(execution_name) = params.execution_name {
            parameters.insert("Name".to_string(), Value::String(execution_name));
        }

        self.task_state(
            name.into(),
            action.resource().to_string(),
            Some(Value::Object(parameters)),
            None,
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sync_action_uses_the_sync_resource() {
        let machine = WorkflowBuilder::new()
            .start_with("Nested")
            .step_function(
                "Nested",
                StatesAction::StartExecutionSync,
                StatesParams::new("arn:aws:states:us-east-1:0:stateMachine:inner")
                    .input(json!({"id.$": "$.id"}))
                    .execution_name("inner-run"),
                StateOptions::new().end(),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Nested"]).unwrap();
        assert_eq!(
            value["Resource"],
            json!("arn:aws:states:::states:startExecution.sync")
        );
        assert_eq!(
            value["Parameters"],
            json!({
                "StateMachineArn": "arn:aws:states:us-east-1:0:stateMachine:inner",
                "Input": {"id.$": "$.id"},
                "Name": "inner-run"
            })
        );
    }

    #[test]
    fn unset_input_and_name_are_omitted() {
        let machine = WorkflowBuilder::new()
            .start_with("Nested")
            .step_function(
                "Nested",
                StatesAction::StartExecution,
                StatesParams::new("arn:inner"),
                StateOptions::new().end(),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Nested"]).unwrap();
        assert_eq!(value["Parameters"], json!({"StateMachineArn": "arn:inner"}));
    }
}
