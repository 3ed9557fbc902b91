//! DynamoDB table operations.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{Map, Value};

/// The table operations the service integration supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamoDbAction {
    GetItem,
    PutItem,
    DeleteItem,
    UpdateItem,
    Query,
    Scan,
}

impl DynamoDbAction {
    fn resource(self) -> &'static str {
        match self {
            DynamoDbAction::GetItem => "arn:aws:states:::dynamodb:getItem",
            DynamoDbAction::PutItem => "arn:aws:states:::dynamodb:putItem",
            DynamoDbAction::DeleteItem => "arn:aws:states:::dynamodb:deleteItem",
            DynamoDbAction::UpdateItem => "arn:aws:states:::dynamodb:updateItem",
            DynamoDbAction::Query => "arn:aws:states:::dynamodb:query",
            DynamoDbAction::Scan => "arn:aws:states:::dynamodb:scan",
        }
    }
}

impl WorkflowBuilder {
    /// Add a task that performs one DynamoDB operation.
    ///
    /// `params` is the operation's request document (attribute-value shaped,
    /// path expressions allowed); it passes through with `TableName` injected.
    pub fn dynamo_db(
        self,
        name: impl Into<String>,
        action: DynamoDbAction,
        table_name: impl Into<String>,
        params: Value,
        options: StateOptions,
    ) -> Self {
        let mut parameters = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        parameters.insert("TableName".to_string(), Value::String(table_name.into()));

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
    fn each_action_maps_to_its_resource() {
        let cases = [
            (DynamoDbAction::GetItem, "arn:aws:states:::dynamodb:getItem"),
            (DynamoDbAction::PutItem, "arn:aws:states:::dynamodb:putItem"),
            (DynamoDbAction::DeleteItem, "arn:aws:states:::dynamodb:deleteItem"),
            (DynamoDbAction::UpdateItem, "arn:aws:states:::dynamodb:updateItem"),
            (DynamoDbAction::Query, "arn:aws:states:::dynamodb:query"),
            (DynamoDbAction::Scan, "arn:aws:states:::dynamodb:scan"),
        ];
        for (action, resource) in cases {
            assert_eq!(action.resource(), resource);
        }
    }

    #[test]
    fn table_name_is_injected_into_the_params() {
        let machine = WorkflowBuilder::new()
            .start_with("Save")
            .dynamo_db(
                "Save",
                DynamoDbAction::PutItem,
                "Orders",
                json!({"Item": {"orderId": {"S": "$.orderId"}}}),
                StateOptions::new().end(),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Save"]).unwrap();
        assert_eq!(value["Resource"], json!("arn:aws:states:::dynamodb:putItem"));
        assert_eq!(value["Parameters"]["TableName"], json!("Orders"));
        assert_eq!(
            value["Parameters"]["Item"],
            json!({"orderId": {"S": "$.orderId"}})
        );
    }
}
