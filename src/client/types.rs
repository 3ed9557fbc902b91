//! Parameter and outcome types for the submission client.

use crate::client::error::ClientError;
use crate::definition::StateMachine;
use aws_sdk_sfn::types::{ExecutionStatus, StateMachineType};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A definition to submit: either a built document or raw JSON.
#[derive(Clone, Debug)]
pub enum DefinitionDocument {
    Built(StateMachine),
    Json(String),
}

impl DefinitionDocument {
    pub(crate) fn render(&self) -> Result<String, ClientError> {
        match self {
            DefinitionDocument::Built(machine) => Ok(machine.to_json()?),
            DefinitionDocument::Json(raw) => Ok(raw.clone()),
        }
    }
}

impl From<StateMachine> for DefinitionDocument {
    fn from(machine: StateMachine) -> Self {
        DefinitionDocument::Built(machine)
    }
}

impl From<String> for DefinitionDocument {
    fn from(raw: String) -> Self {
        DefinitionDocument::Json(raw)
    }
}

impl From<&str> for DefinitionDocument {
    fn from(raw: &str) -> Self {
        DefinitionDocument::Json(raw.to_string())
    }
}

/// Parameters for create-or-update deployment.
#[derive(Clone, Debug)]
pub struct DeployParams {
    pub name: String,
    pub definition: DefinitionDocument,
    /// Execution role the service assumes; checked against IAM before any
    /// create or update call goes out.
    pub role_arn: String,
    pub machine_type: StateMachineType,
    pub tags: Vec<(String, String)>,
    /// Update the existing machine of this name instead of creating one.
    pub update: bool,
}

impl DeployParams {
    pub fn new(
        name: impl Into<String>,
        definition: impl Into<DefinitionDocument>,
        role_arn: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            role_arn: role_arn.into(),
            machine_type: StateMachineType::Standard,
            tags: Vec::new(),
            update: false,
        }
    }

    pub fn express(mut self) -> Self {
        self.machine_type = StateMachineType::Express;
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    pub fn update(mut self) -> Self {
        self.update = true;
        self
    }
}

/// What a deployment did.
#[derive(Clone, Debug)]
pub enum DeployOutcome {
    Created {
        state_machine_arn: String,
        creation_date: DateTime<Utc>,
    },
    Updated {
        state_machine_arn: String,
        update_date: DateTime<Utc>,
    },
}

impl DeployOutcome {
    pub fn state_machine_arn(&self) -> &str {
        match self {
            DeployOutcome::Created {
                state_machine_arn, ..
            }
            | DeployOutcome::Updated {
                state_machine_arn, ..
            } => state_machine_arn,
        }
    }
}

/// Parameters for starting an execution.
#[derive(Clone, Debug)]
pub struct StartExecutionParams {
    pub state_machine_arn: String,
    /// Execution name; generated (`exec-<uuid>`) when unset.
    pub name: Option<String>,
    /// Input payload; defaults to an empty object.
    pub input: Option<Value>,
}

impl StartExecutionParams {
    pub fn new(state_machine_arn: impl Into<String>) -> Self {
        Self {
            state_machine_arn: state_machine_arn.into(),
            name: None,
            input: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }
}

/// Handle to a freshly started execution.
#[derive(Clone, Debug)]
pub struct ExecutionHandle {
    pub execution_arn: String,
    pub start_date: DateTime<Utc>,
}

/// Decoded describe-execution result.
#[derive(Clone, Debug)]
pub struct ExecutionDetail {
    pub status: ExecutionStatus,
    pub start_date: DateTime<Utc>,
    pub stop_date: Option<DateTime<Utc>>,
    /// Execution input, decoded from the service's JSON string.
    pub input: Option<Value>,
    /// Execution output; present once the execution has produced one.
    pub output: Option<Value>,
    pub error: Option<String>,
    pub cause: Option<String>,
}

impl ExecutionDetail {
    /// True once the execution has reached one of the end states the polling
    /// helper stops on.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            ExecutionStatus::Succeeded
                | ExecutionStatus::Failed
                | ExecutionStatus::TimedOut
                | ExecutionStatus::Aborted
        )
    }
}

/// Parameters for listing executions of one machine.
#[derive(Clone, Debug)]
pub struct ListExecutionsParams {
    pub state_machine_arn: String,
    pub status_filter: Option<ExecutionStatus>,
    pub max_results: i32,
    pub next_token: Option<String>,
}

impl ListExecutionsParams {
    pub fn new(state_machine_arn: impl Into<String>) -> Self {
        Self {
            state_machine_arn: state_machine_arn.into(),
            status_filter: None,
            max_results: 100,
            next_token: None,
        }
    }

    pub fn status_filter(mut self, status: ExecutionStatus) -> Self {
        self.status_filter = Some(status);
        self
    }

    pub fn max_results(mut self, max_results: i32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }
}

/// One row of a list-executions page.
#[derive(Clone, Debug)]
pub struct ExecutionSummary {
    pub execution_arn: String,
    pub name: String,
    pub status: ExecutionStatus,
    pub start_date: DateTime<Utc>,
    pub stop_date: Option<DateTime<Utc>>,
}

/// One page of executions plus the continuation token, if any.
#[derive(Clone, Debug)]
pub struct ExecutionPage {
    pub executions: Vec<ExecutionSummary>,
    pub next_token: Option<String>,
}

/// Parameters for stopping a running execution.
#[derive(Clone, Debug)]
pub struct StopExecutionParams {
    pub execution_arn: String,
    pub error: Option<String>,
    pub cause: Option<String>,
}

impl StopExecutionParams {
    pub fn new(execution_arn: impl Into<String>) -> Self {
        Self {
            execution_arn: execution_arn.into(),
            error: None,
            cause: None,
        }
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}
