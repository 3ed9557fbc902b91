//! Event publication to EventBridge.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{json, Value};

const PUT_EVENTS: &str = "arn:aws:states:::events:putEvents";

impl WorkflowBuilder {
    /// Add a task that publishes a batch of event entries.
    pub fn event_bridge(
        self,
        name: impl Into<String>,
        entries: Vec<Value>,
        options: StateOptions,
    ) -> Self {
        self.task_state(
            name.into(),
            PUT_EVENTS.to_string(),
            Some(json!({ "Entries": entries })),
            None,
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_become_the_parameter_payload() {
        let entry = json!({
            "Source": "orders",
            "DetailType": "order.created",
            "Detail.$": "$.order"
        });
        let machine = WorkflowBuilder::new()
            .start_with("Emit")
            .event_bridge("Emit", vec![entry.clone()], StateOptions::new().end())
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Emit"]).unwrap();
        assert_eq!(value["Resource"], json!("arn:aws:states:::events:putEvents"));
        assert_eq!(value["Parameters"], json!({"Entries": [entry]}));
    }
}
