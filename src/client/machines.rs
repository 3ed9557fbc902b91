//! The submission client.

use crate::client::error::ClientError;
use crate::client::types::{
    DeployOutcome, DeployParams, ExecutionDetail, ExecutionHandle, ExecutionPage,
    ExecutionSummary, ListExecutionsParams, StartExecutionParams, StopExecutionParams,
};
use aws_sdk_sfn::error::DisplayErrorContext;
use aws_sdk_sfn::types::Tag;
use aws_smithy_types_convert::date_time::DateTimeExt;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Interval the completion poller sleeps between describe calls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Thin async wrapper around the orchestration service.
///
/// Owns one Step Functions client and one IAM client (for the deploy-time
/// role check). The definition it submits is treated as an opaque JSON value;
/// all execution semantics live on the remote side.
#[derive(Clone, Debug)]
pub struct StateMachineClient {
    sfn: aws_sdk_sfn::Client,
    iam: aws_sdk_iam::Client,
}

impl StateMachineClient {
    /// Wrap pre-built SDK clients.
    pub fn new(sfn: aws_sdk_sfn::Client, iam: aws_sdk_iam::Client) -> Self {
        Self { sfn, iam }
    }

    /// Build both clients from a shared SDK configuration.
    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(
            aws_sdk_sfn::Client::new(config),
            aws_sdk_iam::Client::new(config),
        )
    }

    /// Load region and credentials from the ambient environment.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::from_conf(&config)
    }

    /// Create a state machine, or update the one with the same name when
    /// [`DeployParams::update`] is set. The execution role is checked against
    /// IAM before anything is sent.
    pub async fn deploy(&self, params: DeployParams) -> Result<DeployOutcome, ClientError> {
        self.check_role(&params.role_arn).await?;
        let definition = params.definition.render()?;

        if params.update {
            let arn = self.resolve_machine_arn(&params.name).await?;
            let response = self
                .sfn
                .update_state_machine()
                .state_machine_arn(&arn)
                .definition(&definition)
                .role_arn(&params.role_arn)
                .send()
                .await
                .map_err(|e| ClientError::DeployFailed(DisplayErrorContext(&e).to_string()))?;

            info!(name = %params.name, arn = %arn, "state machine updated");
            Ok(DeployOutcome::Updated {
                state_machine_arn: arn,
                update_date: to_utc(response.update_date())?,
            })
        } else {
            let tags: Vec<Tag> = params
                .tags
                .iter()
                .map(|(key, value)| Tag::builder().key(key).value(value).build())
                .collect();

            let mut request = self
                .sfn
                .create_state_machine()
                .name(&params.name)
                .definition(&definition)
                .role_arn(&params.role_arn)
                .r#type(params.machine_type.clone());
            if !tags.is_empty() {
                request = request.set_tags(Some(tags));
            }

            let response = request
                .send()
                .await
                .map_err(|e| ClientError::DeployFailed(DisplayErrorContext(&e).to_string()))?;

            info!(name = %params.name, arn = %response.state_machine_arn(), "state machine created");
            Ok(DeployOutcome::Created {
                state_machine_arn: response.state_machine_arn().to_string(),
                creation_date: to_utc(response.creation_date())?,
            })
        }
    }

    /// Start an execution. Name and input fall back to a generated
    /// `exec-<uuid>` and `{}`.
    pub async fn start_execution(
        &self,
        params: StartExecutionParams,
    ) -> Result<ExecutionHandle, ClientError> {
        let name = params
            .name
            .unwrap_or_else(|| format!("exec-{}", Uuid::new_v4()));
        let input = params
            .input
            .unwrap_or_else(|| Value::Object(Default::default()))
            .to_string();

        let response = self
            .sfn
            .start_execution()
            .state_machine_arn(&params.state_machine_arn)
            .name(&name)
            .input(input)
            .send()
            .await
            .map_err(|e| ClientError::StartFailed(DisplayErrorContext(&e).to_string()))?;

        info!(execution = %response.execution_arn(), name = %name, "execution started");
        Ok(ExecutionHandle {
            execution_arn: response.execution_arn().to_string(),
            start_date: to_utc(response.start_date())?,
        })
    }

    /// Describe an execution, decoding its input and output payloads.
    pub async fn execution_status(
        &self,
        execution_arn: &str,
    ) -> Result<ExecutionDetail, ClientError> {
        let response = self
            .sfn
            .describe_execution()
            .execution_arn(execution_arn)
            .send()
            .await
            .map_err(|e| ClientError::DescribeFailed(DisplayErrorContext(&e).to_string()))?;

        Ok(ExecutionDetail {
            status: response.status().clone(),
            start_date: to_utc(response.start_date())?,
            stop_date: response.stop_date().map(to_utc).transpose()?,
            input: response
                .input()
                .map(serde_json::from_str::<Value>)
                .transpose()?,
            output: response
                .output()
                .map(serde_json::from_str::<Value>)
                .transpose()?,
            error: response.error().map(str::to_string),
            cause: response.cause().map(str::to_string),
        })
    }

    /// Fetch one page of executions.
    pub async fn list_executions(
        &self,
        params: ListExecutionsParams,
    ) -> Result<ExecutionPage, ClientError> {
        let mut request = self
            .sfn
            .list_executions()
            .state_machine_arn(&params.state_machine_arn)
            .max_results(params.max_results);
        if let Some(status) = params.status_filter {
            request = request.status_filter(status);
        }
        if let Some(token) = &params.next_token {
            request = request.next_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::ListFailed(DisplayErrorContext(&e).to_string()))?;

        let executions = response
            .executions()
            .iter()
            .map(|item| -> Result<ExecutionSummary, ClientError> {
                Ok(ExecutionSummary {
                    execution_arn: item.execution_arn().to_string(),
                    name: item.name().to_string(),
                    status: item.status().clone(),
                    start_date: to_utc(item.start_date())?,
                    stop_date: item.stop_date().map(to_utc).transpose()?,
                })
            })
            .collect::<Result<Vec<_>, ClientError>>()?;

        Ok(ExecutionPage {
            executions,
            next_token: response.next_token().map(str::to_string),
        })
    }

    /// Stop a running execution; returns the stop timestamp.
    pub async fn stop_execution(
        &self,
        params: StopExecutionParams,
    ) -> Result<DateTime<Utc>, ClientError> {
        let mut request = self
            .sfn
            .stop_execution()
            .execution_arn(&params.execution_arn);
        if let Some(error) = &params.error {
            request = request.error(error);
        }
        if let Some(cause) = &params.cause {
            request = request.cause(cause);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::StopFailed(DisplayErrorContext(&e).to_string()))?;

        info!(execution = %params.execution_arn, "execution stopped");
        to_utc(response.stop_date())
    }

    /// Delete a state machine by ARN.
    pub async fn delete_state_machine(&self, state_machine_arn: &str) -> Result<(), ClientError> {
        self.sfn
            .delete_state_machine()
            .state_machine_arn(state_machine_arn)
            .send()
            .await
            .map_err(|e| ClientError::DeleteFailed(DisplayErrorContext(&e).to_string()))?;

        info!(machine = state_machine_arn, "state machine deleted");
        Ok(())
    }

    /// Poll [`execution_status`](Self::execution_status) at a fixed interval
    /// until the execution reaches a terminal status, then return the final
    /// detail. There is no cancellation token; callers wanting a bound must
    /// race this future themselves.
    pub async fn wait_for_completion(
        &self,
        execution_arn: &str,
        poll_interval: Duration,
    ) -> Result<ExecutionDetail, ClientError> {
        loop {
            let detail = self.execution_status(execution_arn).await?;
            if detail.is_terminal() {
                info!(execution = execution_arn, status = ?detail.status, "execution finished");
                return Ok(detail);
            }
            debug!(execution = execution_arn, status = ?detail.status, "execution still running");
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// The role must exist before create/update goes out; a misspelled role
    /// ARN otherwise surfaces as an opaque service-side failure.
    async fn check_role(&self, role_arn: &str) -> Result<(), ClientError> {
        let role_name = role_arn.rsplit('/').next().unwrap_or(role_arn);
        debug!(role = role_name, "checking execution role");
        self.iam
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| ClientError::InvalidRole(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    /// Resolve a machine name to its ARN by paging through the account's
    /// machines.
    async fn resolve_machine_arn(&self, name: &str) -> Result<String, ClientError> {
        let mut pages = self.sfn.list_state_machines().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page =
                page.map_err(|e| ClientError::DeployFailed(DisplayErrorContext(&e).to_string()))?;
            for machine in page.state_machines() {
                if machine.name() == name {
                    return Ok(machine.state_machine_arn().to_string());
                }
            }
        }
        Err(ClientError::StateMachineNotFound(name.to_string()))
    }
}

fn to_utc(value: &aws_smithy_types::DateTime) -> Result<DateTime<Utc>, ClientError> {
    value
        .to_chrono_utc()
        .map_err(|e| ClientError::Timestamp(e.to_string()))
}
