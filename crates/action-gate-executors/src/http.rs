// crates/action-gate-executors/src/http.rs
// ============================================================================
// Module: HTTP Executor
// Description: Executor capability for outbound HTTP actions.
// Purpose: Perform bounded GET and POST requests with strict limits.
// Dependencies: action-gate-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! The HTTP executor performs the `http` tool's `get` and `post`
//! operations. It enforces scheme restrictions, an optional host
//! allowlist, redirects disabled, and a response size limit. The result
//! payload carries the target's status code and body; a non-success target
//! status is a failed execution, not an executor error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::time::Duration;

use action_gate_core::ExecutionError;
use action_gate_core::ExecutionResult;
use action_gate_core::Executor;
use action_gate_core::OperationName;
use action_gate_core::ToolName;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::Url;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP executor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpExecutorConfig {
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Optional host allowlist.
    pub allowed_hosts: Option<BTreeSet<String>>,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpExecutorConfig {
    fn default() -> Self {
        Self {
            allow_http: false,
            timeout_ms: 5_000,
            max_response_bytes: 1024 * 1024,
            allowed_hosts: None,
            user_agent: "action-gate/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Executor Implementation
// ============================================================================

/// Executor capability for outbound HTTP actions.
pub struct HttpExecutor {
    /// Executor configuration, including limits and policy.
    config: HttpExecutorConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpExecutor {
    /// Creates an HTTP executor with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when the HTTP client cannot be created.
    pub fn new(config: HttpExecutorConfig) -> Result<Self, ExecutionError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| ExecutionError::Failed(format!("http client build failed: {err}")))?;
        Ok(Self {
            config,
            client,
        })
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn invoke(
        &self,
        tool: &ToolName,
        operation: &OperationName,
        params: &Value,
        _context: &Value,
    ) -> Result<ExecutionResult, ExecutionError> {
        if tool.as_str() != "http" {
            return Err(ExecutionError::Rejected(format!("unsupported tool: {tool}")));
        }
        let url = extract_url(params)?;
        validate_url(&url, &self.config)?;

        let response = match operation.as_str() {
            "get" => self.client.get(url).send().await,
            "post" => {
                let builder = self.client.post(url);
                match params.get("data") {
                    Some(data) => builder.json(data).send().await,
                    None => builder.send().await,
                }
            }
            other => {
                return Err(ExecutionError::Rejected(format!("unsupported http operation: {other}")));
            }
        }
        .map_err(|err| ExecutionError::Failed(format!("http request failed: {err}")))?;

        let status = response.status();
        if let Some(length) = response.content_length()
            && length > u64::try_from(self.config.max_response_bytes).unwrap_or(u64::MAX)
        {
            return Err(ExecutionError::Failed("http response exceeds size limit".to_string()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| ExecutionError::Failed(format!("failed to read response: {err}")))?;
        if body.len() > self.config.max_response_bytes {
            return Err(ExecutionError::Failed("http response exceeds size limit".to_string()));
        }

        let body_value = decode_body(&body);
        let details = json!({
            "status_code": status.as_u16(),
            "body": body_value,
        });
        if status.is_success() {
            Ok(ExecutionResult::success(details))
        } else {
            Ok(ExecutionResult::failure(details))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts the target URL from action parameters.
fn extract_url(params: &Value) -> Result<Url, ExecutionError> {
    let Value::Object(map) = params else {
        return Err(ExecutionError::Rejected("http params must be an object".to_string()));
    };
    let Some(Value::String(url)) = map.get("url") else {
        return Err(ExecutionError::Rejected("missing url param".to_string()));
    };
    Url::parse(url).map_err(|_| ExecutionError::Rejected("invalid url".to_string()))
}

/// Validates URL scheme and allowlist policy.
fn validate_url(url: &Url, config: &HttpExecutorConfig) -> Result<(), ExecutionError> {
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        _ => return Err(ExecutionError::Rejected("unsupported url scheme".to_string())),
    }
    if let Some(allowlist) = &config.allowed_hosts {
        let host = url
            .host_str()
            .ok_or_else(|| ExecutionError::Rejected("url host required".to_string()))?;
        if !allowlist.contains(host) {
            return Err(ExecutionError::Rejected("url host not allowed".to_string()));
        }
    }
    Ok(())
}

/// Decodes a response body as JSON when possible, else as lossy text.
fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
