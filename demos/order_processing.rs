//! Order Processing Pipeline
//!
//! Builds the classic order pipeline (persist the order, announce it,
//! process it, hand the result off to a queue) and prints the emitted
//! definition document.
//!
//! Run with: cargo run --example order_processing

use serde_json::json;
use stepflow::builder::{StateOptions, WorkflowBuilder};
use stepflow::integrations::{DynamoDbAction, SnsAction, SqsAction};

fn main() {
    let machine = WorkflowBuilder::with_comment("Order processing")
        .start_with("SaveOrder")
        .dynamo_db(
            "SaveOrder",
            DynamoDbAction::PutItem,
            "Orders",
            json!({
                "Item": {
                    "orderId": {"S": "$.orderId"},
                    "data": {"S": "$.orderData"}
                }
            }),
            StateOptions::new(),
        )
        .next("NotifyService")
        .sns(
            "NotifyService",
            SnsAction::Publish,
            "arn:aws:sns:us-east-1:123456789012:OrdersTopic",
            json!({
                "Message": {
                    "default": "New order received",
                    "data.$": "$.orderData"
                }
            }),
            StateOptions::new(),
        )
        .next("ProcessOrder")
        .lambda(
            "ProcessOrder",
            "arn:aws:lambda:us-east-1:123456789012:function:process-order",
            StateOptions::new(),
        )
        .next("SendNotification")
        .sqs(
            "SendNotification",
            SqsAction::SendMessage,
            "https://sqs.us-east-1.amazonaws.com/123456789012/NotificationsQueue",
            json!({
                "MessageBody": {
                    "type": "ORDER_PROCESSED",
                    "data.$": "$.result"
                }
            }),
            StateOptions::new(),
        )
        .end()
        .build()
        .expect("start state is set");

    println!("{}", machine.to_json_pretty().expect("definition serializes"));
}
