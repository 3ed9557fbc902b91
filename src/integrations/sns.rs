//! Topic notification over SNS.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnsAction {
    Publish,
}

impl SnsAction {
    fn resource(self) -> &'static str {
        match self {
            SnsAction::Publish => "arn:aws:states:::sns:publish",
        }
    }
}

impl WorkflowBuilder {
    /// Add a task that publishes to a topic. `params` passes through with
    /// `TopicArn` injected.
    pub fn sns(
        self,
        name: impl Into<String>,
        action: SnsAction,
        topic_arn: impl Into<String>,
        params: Value,
        options: StateOptions,
    ) -> Self {
        let mut parameters = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        parameters.insert("TopicArn".to_string(), Value::String(topic_arn.into()));

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
    fn topic_arn_is_injected() {
        let machine = WorkflowBuilder::new()
            .start_with("Announce")
            .sns(
                "Announce",
                SnsAction::Publish,
                "arn:aws:sns:us-east-1:0:OrdersTopic",
                json!({"Message": {"default": "New order received"}}),
                StateOptions::new().end(),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Announce"]).unwrap();
        assert_eq!(value["Resource"], json!("arn:aws:states:::sns:publish"));
        assert_eq!(
            value["Parameters"]["TopicArn"],
            json!("arn:aws:sns:us-east-1:0:OrdersTopic")
        );
    }
}
