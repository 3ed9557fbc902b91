//! Service integration helpers.
//!
//! One module per action family. Each helper is an explicit method on
//! [`WorkflowBuilder`](crate::builder::WorkflowBuilder) that appends a single
//! `Task` state (resource identifier fixed per family/action, caller
//! parameters lightly reshaped), then applies the shared options and advances
//! the cursor, exactly like the native state creators.
//!
//! Families whose service exposes several actions use a closed enum
//! (`DynamoDbAction`, `SqsAction`, ...), so an unknown action name cannot be
//! written down, let alone emitted.

mod apigateway;
mod batch;
mod dynamodb;
mod ecs;
mod eventbridge;
mod http;
mod lambda;
mod sns;
mod sqs;
mod states;

pub use apigateway::ApiGatewayParams;
pub use batch::BatchParams;
pub use dynamodb::DynamoDbAction;
pub use ecs::{EcsParams, LaunchType};
pub use http::HttpParams;
pub use sns::SnsAction;
pub use sqs::SqsAction;
pub use states::{StatesAction, StatesParams};
