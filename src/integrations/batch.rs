//! Batch job submission.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{Map, Value};

const SUBMIT_JOB: &str = "arn:aws:states:::batch:submitJob";

/// Parameters for a Batch submit-job state.
#[derive(Clone, Debug)]
pub struct BatchParams {
    pub job_name: String,
    pub job_definition: String,
    pub job_queue: String,
    /// Job parameter map, substituted into the job definition.
    pub parameters: Option<Value>,
    pub container_overrides: Option<Value>,
}

impl BatchParams {
    pub fn new(
        job_name: impl Into<String>,
        job_definition: impl Into<String>,
        job_queue: impl Into<String>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            job_definition: job_definition.into(),
            job_queue: job_queue.into(),
            parameters: None,
            container_overrides: None,
        }
    }

    pub fn parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn container_overrides(mut self, overrides: Value) -> Self {
        self.container_overrides = Some(overrides);
        self
    }
}

impl WorkflowBuilder {
    /// Add a task that submits a Batch job.
    pub fn batch(self, name: impl Into<String>, params: BatchParams, options: StateOptions) -> Self {
        let mut parameters = Map::new();
        parameters.insert("JobName".to_string(), Value::String(params.job_name));
        parameters.insert(
            "JobDefinition".to_string(),
            Value::String(params.job_definition),
        );
        parameters.insert("JobQueue".to_string(), Value::String(params.job_queue));
        if let Some(job_parameters) = params.parameters {
            parameters.insert("Parameters".to_string(), job_parameters);
        }
        if let Some(overrides) = params.container_overrides {
            parameters.insert("ContainerOverrides".to_string(), overrides);
        }

        self.task_state(
            name.into(),
            SUBMIT_JOB.to_string(),
            Some(Value::Object(parameters)),
            None,
            options,
        )
    }
}
