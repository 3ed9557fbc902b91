//! Container task launch on ECS.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{Map, Value};

const RUN_TASK: &str = "arn:aws:states:::ecs:runTask";

/// How the container task is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LaunchType {
    /// Serverless placement; the default.
    #[default]
    Fargate,
    Ec2,
    External,
}

impl LaunchType {
    fn as_str(self) -> &'static str {
        match self {
            LaunchType::Fargate => "FARGATE",
            LaunchType::Ec2 => "EC2",
            LaunchType::External => "EXTERNAL",
        }
    }
}

/// Parameters for an ECS run-task state.
#[derive(Clone, Debug)]
pub struct EcsParams {
    pub cluster: String,
    pub task_definition: String,
    pub launch_type: LaunchType,
    /// Subnet/security-group document, passed through verbatim.
    pub network_configuration: Option<Value>,
}

impl EcsParams {
    pub fn new(cluster: impl Into<String>, task_definition: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            task_definition: task_definition.into(),
            launch_type: LaunchType::default(),
            network_configuration: None,
        }
    }

    pub fn launch_type(mut self, launch_type: LaunchType) -> Self {
        self.launch_type = launch_type;
        self
    }

    pub fn network_configuration(mut self, configuration: Value) -> Self {
        self.network_configuration = Some(configuration);
        self
    }
}

impl WorkflowBuilder {
    /// Add a task that launches a container task.
    pub fn ecs(self, name: impl Into<String>, params: EcsParams, options: StateOptions) -> Self {
        let mut parameters = Map::new();
        parameters.insert("Cluster".to_string(), Value::String(params.cluster));
        parameters.insert(
            "TaskDefinition".to_string(),
            Value::String(params.task_definition),
        );
        parameters.insert(
            "LaunchType".to_string(),
            Value::String(params.launch_type.as_str().to_string()),
        );
        if let Some(network) = params.network_configuration {
            parameters.insert("NetworkConfiguration".to_string(), network);
        }

        self.task_state(
            name.into(),
            RUN_TASK.to_string(),
            Some(Value::Object(parameters)),
            None,
            options,
        )
    }
}
