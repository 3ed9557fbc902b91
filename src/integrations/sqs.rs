//! Queue message delivery over SQS.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{Map, Value};

/// Single or batched send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqsAction {
    SendMessage,
    SendMessageBatch,
}

impl SqsAction {
    fn resource(self) -> &'static str {
        match self {
            SqsAction::SendMessage => "arn:aws:states:::sqs:sendMessage",
            SqsAction::SendMessageBatch => "arn:aws:states:::sqs:sendMessageBatch",
        }
    }
}

impl WorkflowBuilder {
    /// Add a task that sends to a queue. `params` passes through with
    /// `QueueUrl` injected.
    pub fn sqs(
        self,
        name: impl Into<String>,
        action: SqsAction,
        queue_url: impl Into<String>,
        params: Value,
        options: StateOptions,
    ) -> Self {
        let mut parameters = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        parameters.insert("QueueUrl".to_string(), Value::String(queue_url.into()));

        self.task_state(
            name.into(),
            action.resource().to_string(),
            Some(Value::Object(parameters)),
            None,
            options,
        )
    }
}
