//! Generic HTTPS endpoint invocation.
//!
//! Unlike the other integrations the raw response arrives as an envelope of
//! status code, headers and body; a fixed result selector unwraps it into the
//! declared result path so downstream states see a flat object.

use crate::builder::{StateOptions, WorkflowBuilder};
use serde_json::{json, Map, Value};

const INVOKE: &str = "arn:aws:states:::http:invoke";

/// Parameters for an HTTP invoke state.
#[derive(Clone, Debug)]
pub struct HttpParams {
    pub url: String,
    /// HTTP method; defaults to `GET`.
    pub method: Option<String>,
    /// Request headers; defaults to an empty object.
    pub headers: Option<Value>,
    /// Connection authentication descriptor (e.g. an EventBridge connection
    /// reference), passed through verbatim.
    pub auth: Option<Value>,
    pub body: Option<Value>,
    pub query_parameters: Option<Value>,
    /// Seconds before an unestablished connection is abandoned; defaults
    /// to 30.
    pub connection_timeout: Option<u64>,
}

impl HttpParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: None,
            headers: None,
            auth: None,
            body: None,
            query_parameters: None,
            connection_timeout: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn headers(mut self, headers: Value) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn auth(mut self, auth: Value) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_parameters(mut self, query: Value) -> Self {
        self.query_parameters = Some(query);
        self
    }

    pub fn connection_timeout(mut self, seconds: u64) -> Self {
        self.connection_timeout = Some(seconds);
        self
    }
}

impl WorkflowBuilder {
    /// Add a task that calls an arbitrary HTTPS endpoint.
    ///
    /// The emitted state carries a result selector extracting `statusCode`,
    /// `headers` and `body` from the raw response envelope.
    pub fn http(self, name: impl Into<String>, params: HttpParams, options: StateOptions) -> Self {
        let mut parameters = Map::new();
        parameters.insert(
            "Method".to_string(),
            Value::String(params.method.unwrap_or_else(|| "GET".to_string())),
        );
        parameters.insert("URL".to_string(), Value::String(params.url));
        parameters.insert(
            "Headers".to_string(),
            params.headers.unwrap_or_else(|| json!({})),
        );
        if let Some(auth) = params.auth {
            parameters.insert("Authentication".to_string(), auth);
        }
        if let Some(body) = params.body {
            parameters.insert("RequestBody".to_string(), body);
        }
        if let Some(query) = params.query_parameters {
            parameters.insert("QueryParameters".to_string(), query);
        }
        parameters.insert(
            "ConnectionTimeout".to_string(),
            Value::from(params.connection_timeout.unwrap_or(30)),
        );

        let result_selector = json!({
            "statusCode.$": "$.StatusCode",
            "headers.$": "$.Headers",
            "body.$": "$.Body"
        });

        self.task_state(
            name.into(),
            INVOKE.to_string(),
            Some(Value::Object(parameters)),
            Some(result_selector),
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_task_fills_defaults_and_result_selector() {
        let machine = WorkflowBuilder::new()
            .start_with("Fetch")
            .http(
                "Fetch",
                HttpParams::new("https://api.example.com/status"),
                StateOptions::new().end(),
            )
            .build()
            .unwrap();

        let value = serde_json::to_value(&machine.states["Fetch"]).unwrap();
        assert_eq!(value["Resource"], json!("arn:aws:states:::http:invoke"));
        assert_eq!(
            value["Parameters"],
            json!({
                "Method": "GET",
                "URL": "https://api.example.com/status",
                "Headers": {},
                "ConnectionTimeout": 30
            })
        );
        assert_eq!(
            value["ResultSelector"],
            json!({
                "statusCode.$": "$.StatusCode",
                "headers.$": "$.Headers",
                "body.$": "$.Body"
            })
        );
    }

    #[test]
    fn http_request_fields_pass_through() {
        let machine = WorkflowBuilder::new()
            .start_with("Push")
            .http(
                "Push",
                HttpParams::new("https://hooks.example.com/deploy")
                    .method("POST")
                    .headers(json!({"content-type": "application/json"}))
                    .auth(json!({"ConnectionArn": "arn:aws:events:us-east-1:0:connection/x"}))
                    .body(json!({"ref.$": "$.ref"}))
                    .query_parameters(json!({"dry_run": "false"}))
                    .connection_timeout(5),
                StateOptions::new().end(),
            )
            .build()
            .unwrap();

        let parameters = &serde_json::to_value(&machine.states["Push"]).unwrap()["Parameters"];
        assert_eq!(parameters["Method"], json!("POST"));
        assert_eq!(parameters["ConnectionTimeout"], json!(5));
        assert_eq!(
            parameters["Authentication"],
            json!({"ConnectionArn": "arn:aws:events:us-east-1:0:connection/x"})
        );
    }
}
