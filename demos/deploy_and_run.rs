//! Deploy And Run
//!
//! Deploys a tiny workflow, starts one execution and polls it to completion.
//! Needs ambient AWS credentials plus STEPFLOW_ROLE_ARN naming an execution
//! role the service may assume.
//!
//! Run with: STEPFLOW_ROLE_ARN=arn:aws:iam::...:role/steps \
//!     cargo run --example deploy_and_run

use serde_json::json;
use std::time::Duration;
use stepflow::builder::{PassOptions, StateOptions, WorkflowBuilder};
use stepflow::client::{DeployParams, StartExecutionParams, StateMachineClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let role_arn = std::env::var("STEPFLOW_ROLE_ARN")?;

    let machine = WorkflowBuilder::with_comment("Smoke test")
        .start_with("Echo")
        .pass(
            "Echo",
            PassOptions::new()
                .result(json!({"ok": true}))
                .common(StateOptions::new().end()),
        )
        .build()?;

    let client = StateMachineClient::from_env().await;
    let outcome = client
        .deploy(DeployParams::new("stepflow-smoke", machine, role_arn).tag("project", "stepflow"))
        .await?;
    println!("deployed: {}", outcome.state_machine_arn());

    let handle = client
        .start_execution(
            StartExecutionParams::new(outcome.state_machine_arn()).input(json!({"order": 42})),
        )
        .await?;

    let detail = client
        .wait_for_completion(&handle.execution_arn, Duration::from_secs(1))
        .await?;
    println!("finished with status {:?}", detail.status);
    if let Some(output) = detail.output {
        println!("output: {output}");
    }
    Ok(())
}
