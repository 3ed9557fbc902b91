//! Stepflow: fluent construction and deployment of Step Functions workflows
//!
//! Stepflow assembles an Amazon States Language definition one state at a
//! time through a chainable builder, then hands the finished document to a
//! thin client for deployment and execution control. The remote service owns
//! all execution semantics; this crate builds, submits and observes, nothing
//! more.
//!
//! # Core Concepts
//!
//! - **StateMachine**: the definition document: comment, start pointer and
//!   an ordered map of named states
//! - **WorkflowBuilder**: chainable state creators plus a cursor so `next()`
//!   and `end()` address the most recent state
//! - **Integrations**: typed helpers that append one task state per AWS
//!   service action, with closed action enums
//! - **StateMachineClient**: async deploy/start/describe/list/stop/delete
//!   plus a completion poller
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use stepflow::builder::{StateOptions, WorkflowBuilder};
//! use stepflow::integrations::SqsAction;
//!
//! let machine = WorkflowBuilder::new()
//!     .start_with("Process")
//!     .lambda(
//!         "Process",
//!         "arn:aws:lambda:us-east-1:123456789012:function:process-order",
//!         StateOptions::new().next("Notify"),
//!     )
//!     .sqs(
//!         "Notify",
//!         SqsAction::SendMessage,
//!         "https://sqs.us-east-1.amazonaws.com/123456789012/notifications",
//!         json!({"MessageBody": {"type": "ORDER_PROCESSED", "data.$": "$.result"}}),
//!         StateOptions::new(),
//!     )
//!     .end()
//!     .build()
//!     .expect("start state is set");
//!
//! println!("{}", machine.to_json_pretty().unwrap());
//! ```

pub mod builder;
pub mod client;
pub mod definition;
pub mod integrations;

// Re-export the types most callers touch
pub use builder::{BuildError, StateOptions, WorkflowBuilder};
pub use client::{ClientError, StateMachineClient};
pub use definition::{Branch, State, StateMachine};
