//! API Gateway endpoint invocation.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{Map, Value};

const INVOKE: &str = "arn:aws:states:::apigateway:invoke";

/// Parameters for an API Gateway invoke state.
#[derive(Clone, Debug)]
pub struct ApiGatewayParams {
    /// Hostname of the deployed API, e.g. `abc123.execute-api.us-east-1.amazonaws.com`.
    pub endpoint: String,
    /// HTTP method; defaults to `GET`.
    pub method: Option<String>,
    pub path: Option<String>,
    pub query_parameters: Option<Value>,
    pub headers: Option<Value>,
    pub body: Option<Value>,
}

impl ApiGatewayParams {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: None,
            path: None,
            query_parameters: None,
            headers: None,
            body: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn query_parameters(mut self, query: Value) -> Self {
        self.query_parameters = Some(query);
        self
    }

    pub fn headers(mut self, headers: Value) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl WorkflowBuilder {
    /// Add a task that calls a deployed API Gateway endpoint.
    pub fn api_gateway(
        self,
        name: impl Into<String>,
        params: ApiGatewayParams,
        options: StateOptions,
    ) -> Self {
        let mut parameters = Map::new();
        parameters.insert("ApiEndpoint".to_string(), Value::String(params.endpoint));
        parameters.insert(
            "Method".to_string(),
            Value::String(params.method.unwrap_or_else(|| "GET".to_string())),
        );
        if let Some(path) = params.path {
            parameters.insert("Path".to_string(), Value::String(path));
        }
        if let Some(query) = params.query_parameters {
            parameters.insert("QueryParameters".to_string(), query);
        }
        if let Some(headers) = params.headers {
            parameters.insert("Headers".to_string(), headers);
        }
        if let Some(body) = params.body {
            parameters.insert("RequestBody".to_string(), body);
        }

        self.task_state(
            name.into(),
            INVOKE.to_string(),
            Some(Value::Object(parameters)),
            None,
            options,
        )
    }
}
