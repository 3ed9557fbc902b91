//! Lambda function invocation.

use crate::builder::{StateOptions, WorkflowBuilder};

impl WorkflowBuilder {
    /// Add a task that invokes a Lambda function. The function ARN itself is
    /// the task resource; the execution input passes through unchanged.
    pub fn lambda(
        self,
        name: impl Into<String>,
        function_arn: impl Into<String>,
        options: StateOptions,
    ) -> Self {
        self.task_state(name.into(), function_arn.into(), None, None, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lambda_task_uses_the_function_arn_as_resource() {
        let machine = WorkflowBuilder::new()
            .start_with("Work")
            .lambda(
                "Work",
                "arn:aws:lambda:us-east-1:123456789012:function:work",
                StateOptions::new().end(),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Work"]).unwrap();
        assert_eq!(
            value,
            json!({
                "Type": "Task",
                "Resource": "arn:aws:lambda:us-east-1:123456789012:function:work",
                "ResultPath": "$",
                "End": true
            })
        );
    }

    #[test]
    fn lambda_result_path_can_be_overridden() {
        let machine = WorkflowBuilder::new()
            .start_with("Work")
            .lambda(
                "Work",
                "arn:aws:lambda:us-east-1:123456789012:function:work",
                StateOptions::new().result_path("$.result").end(),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Work"]).unwrap();
        assert_eq!(value["ResultPath"], json!("$.result"));
    }
}
