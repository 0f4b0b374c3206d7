// crates/action-gate-client/src/client.rs
// ============================================================================
// Module: Gate Service Client
// Description: Async HTTP client for the remote decision authority.
// Purpose: Provide the decide, audit, batch, and polling operations.
// Dependencies: action-gate-core, reqwest, tokio
// ============================================================================

//! ## Overview
//! [`GateServiceClient`] sends the raw request fields to the authority so
//! it can canonicalize and hash independently; a pre-hashed request would
//! let the authority validate nothing but an opaque value. All operations
//! here are free of side effects on the caller's systems, so transient
//! transport failures and 5xx statuses retry with bounded exponential
//! backoff. Policy outcomes never surface as errors; errors are strictly
//! transport, protocol, or local-validation failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use action_gate_core::ActionId;
use action_gate_core::ActionRecord;
use action_gate_core::ActionRequest;
use action_gate_core::ActionStatus;
use action_gate_core::Decision;
use action_gate_core::DecisionService;
use action_gate_core::ServiceError;
use action_gate_core::SubmitOutcome;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::config::ConfigError;
use crate::config::MAX_BATCH_ACTIONS;
use crate::config::MAX_RESPONSE_BYTES;
use crate::config::RetryPolicy;
use crate::telemetry::GateEndpoint;
use crate::telemetry::GateMetrics;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestMetricEvent;
use crate::telemetry::RequestOutcome;
use crate::wire::BatchSubmitBody;
use crate::wire::BatchSubmitReply;
use crate::wire::ErrorReply;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum poll interval accepted by [`GateServiceClient::submit_and_wait`].
pub const MIN_POLL_INTERVAL_MS: u64 = 10;
/// Maximum wait deadline accepted by [`GateServiceClient::submit_and_wait`].
pub const MAX_WAIT_TIMEOUT_MS: u64 = 3_600_000;

// ============================================================================
// SECTION: Wait Options
// ============================================================================

/// Polling options for [`GateServiceClient::submit_and_wait`].
///
/// # Invariants
/// - `poll_interval_ms` never exceeds `timeout_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Delay between status polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Overall deadline for resolution, in milliseconds.
    pub timeout_ms: u64,
    /// Approve records stuck in `awaiting_approval` automatically.
    pub auto_approve: bool,
}

impl WaitOptions {
    /// Validates the options against their bounds.
    fn validate(&self) -> Result<(), ServiceError> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS
            || self.timeout_ms > MAX_WAIT_TIMEOUT_MS
            || self.poll_interval_ms > self.timeout_ms
        {
            return Err(ServiceError::Request("wait options out of range".to_string()));
        }
        Ok(())
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            timeout_ms: 60_000,
            auto_approve: false,
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Async client for the remote decision authority.
///
/// # Invariants
/// - Configuration is immutable after construction; concurrent calls share
///   only `&self`.
/// - Never invokes or retries executors; only decision/audit calls retry.
pub struct GateServiceClient {
    /// Normalized base URL without trailing slash.
    base_url: String,
    /// Optional bearer token attached to every request.
    auth_token: Option<String>,
    /// Retry policy for decision and audit calls.
    retry: RetryPolicy,
    /// Underlying HTTP client with timeouts and redirects disabled.
    client: Client,
    /// Metrics sink for request counters and latencies.
    metrics: Arc<dyn GateMetrics>,
}

impl GateServiceClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails or the HTTP client
    /// cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let base_url = config.validated_base_url()?;
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self {
            base_url,
            auth_token: config.auth_token,
            retry: config.retry,
            client,
            metrics: Arc::new(NoopMetrics),
        })
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn GateMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Retrieves a decision for the proposed action.
    ///
    /// This is pure decision retrieval with no side effects on target
    /// systems; it may be used as a pre-check before committing.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] on transport, protocol, or local-validation
    /// failure.
    pub async fn decide(&self, request: &ActionRequest) -> Result<Decision, ServiceError> {
        let body = to_body(request)?;
        self.request_json(GateEndpoint::Decide, Method::POST, "/v1/gate/decide", Some(body)).await
    }

    /// Submits an action for audit logging only.
    ///
    /// The audit path carries no authority over execution and does not
    /// influence decisions for equivalent requests.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] on transport, protocol, or local-validation
    /// failure.
    pub async fn submit_action(&self, request: &ActionRequest) -> Result<ActionRecord, ServiceError> {
        let body = to_body(request)?;
        self.request_json(GateEndpoint::SubmitAction, Method::POST, "/v1/actions", Some(body)).await
    }

    /// Submits several actions in one round trip.
    ///
    /// Results preserve submission order; a rejected item never aborts the
    /// rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Request`] for an empty or oversized batch and
    /// [`ServiceError`] on transport or protocol failure.
    pub async fn submit_actions(
        &self,
        requests: &[ActionRequest],
    ) -> Result<Vec<SubmitOutcome>, ServiceError> {
        if requests.is_empty() {
            return Err(ServiceError::Request("batch must contain at least one action".to_string()));
        }
        if requests.len() > MAX_BATCH_ACTIONS {
            return Err(ServiceError::Request(format!(
                "batch exceeds {MAX_BATCH_ACTIONS} actions"
            )));
        }
        let body = to_body(&BatchSubmitBody {
            actions: requests,
        })?;
        let reply: BatchSubmitReply = self
            .request_json(GateEndpoint::BatchSubmit, Method::POST, "/v1/actions/batch", Some(body))
            .await?;
        Ok(reply.results)
    }

    /// Fetches the current record for a submitted action.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] on transport, protocol, or local-validation
    /// failure.
    pub async fn get_action(&self, id: &ActionId) -> Result<ActionRecord, ServiceError> {
        let path = action_path(id, None)?;
        self.request_json(GateEndpoint::GetAction, Method::GET, &path, None).await
    }

    /// Approves an action record blocked on an approval step.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] on transport, protocol, or local-validation
    /// failure.
    pub async fn approve_action(&self, id: &ActionId) -> Result<ActionRecord, ServiceError> {
        let path = action_path(id, Some("approve"))?;
        self.request_json(GateEndpoint::ApproveAction, Method::POST, &path, None).await
    }

    /// Submits an action and polls until it reaches a terminal status.
    ///
    /// With `auto_approve` set, records found in `awaiting_approval` are
    /// approved before the next poll.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DeadlineExceeded`] when the deadline elapses
    /// first, and [`ServiceError`] on transport or protocol failure.
    pub async fn submit_and_wait(
        &self,
        request: &ActionRequest,
        options: &WaitOptions,
    ) -> Result<ActionRecord, ServiceError> {
        options.validate()?;
        let record = self.submit_action(request).await?;
        if record.status.is_terminal() {
            return Ok(record);
        }
        let deadline = Instant::now() + Duration::from_millis(options.timeout_ms);
        let interval = Duration::from_millis(options.poll_interval_ms);
        loop {
            if Instant::now() >= deadline {
                return Err(ServiceError::DeadlineExceeded {
                    timeout_ms: options.timeout_ms,
                });
            }
            tokio::time::sleep(interval).await;
            let mut current = self.get_action(&record.id).await?;
            if current.status == ActionStatus::AwaitingApproval && options.auto_approve {
                current = self.approve_action(&record.id).await?;
            }
            if current.status.is_terminal() {
                return Ok(current);
            }
        }
    }

    /// Builds headers for one authority request.
    fn bearer_headers(&self) -> Result<HeaderMap, ServiceError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ServiceError::Request("auth token is not header-safe".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Sends one request with retries and decodes the JSON reply.
    async fn request_json<T: DeserializeOwned>(
        &self,
        endpoint: GateEndpoint,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ServiceError> {
        let url = format!("{}{path}", self.base_url);
        let started = Instant::now();
        let mut attempts = 0_u32;
        loop {
            attempts += 1;
            match self.send_once(method.clone(), &url, body.as_ref()).await {
                Ok((status, bytes)) => {
                    return match serde_json::from_slice::<T>(&bytes) {
                        Ok(parsed) => {
                            self.record(endpoint, RequestOutcome::Ok, attempts, Some(status), started);
                            Ok(parsed)
                        }
                        Err(err) => {
                            self.record(endpoint, RequestOutcome::Error, attempts, Some(status), started);
                            Err(ServiceError::InvalidResponse(err.to_string()))
                        }
                    };
                }
                Err(err) if attempts < self.retry.max_attempts && err.is_retryable() => {
                    tokio::time::sleep(self.retry.delay_for(attempts)).await;
                }
                Err(err) => {
                    self.record(endpoint, RequestOutcome::Error, attempts, error_status(&err), started);
                    return Err(err);
                }
            }
        }
    }

    /// Performs one HTTP round trip with bounded body reads.
    async fn send_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<(u16, Vec<u8>), ServiceError> {
        let headers = self.bearer_headers()?;
        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response =
            builder.send().await.map_err(|err| ServiceError::Transport(err.to_string()))?;
        let status = response.status();
        let max_bytes = u64::try_from(MAX_RESPONSE_BYTES)
            .map_err(|_| ServiceError::InvalidResponse("size limit exceeds u64".to_string()))?;
        if let Some(length) = response.content_length()
            && length > max_bytes
        {
            return Err(ServiceError::InvalidResponse("response exceeds size limit".to_string()));
        }
        let bytes =
            response.bytes().await.map_err(|err| ServiceError::Transport(err.to_string()))?;
        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(ServiceError::InvalidResponse("response exceeds size limit".to_string()));
        }
        if !status.is_success() {
            let reply: ErrorReply = serde_json::from_slice(&bytes).unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: reply.message(status.as_u16()),
            });
        }
        Ok((status.as_u16(), bytes.to_vec()))
    }

    /// Emits counter and latency events for one completed call.
    fn record(
        &self,
        endpoint: GateEndpoint,
        outcome: RequestOutcome,
        attempts: u32,
        status: Option<u16>,
        started: Instant,
    ) {
        let event = RequestMetricEvent {
            endpoint,
            outcome,
            attempts,
            status,
        };
        self.metrics.record_request(event.clone());
        self.metrics.record_latency(event, started.elapsed());
    }
}

#[async_trait]
impl DecisionService for GateServiceClient {
    async fn decide(&self, request: &ActionRequest) -> Result<Decision, ServiceError> {
        Self::decide(self, request).await
    }

    async fn submit_action(&self, request: &ActionRequest) -> Result<ActionRecord, ServiceError> {
        Self::submit_action(self, request).await
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes a request body, rejecting values with no JSON form.
fn to_body<T: Serialize>(value: &T) -> Result<Value, ServiceError> {
    serde_json::to_value(value).map_err(|err| ServiceError::Request(err.to_string()))
}

/// Builds a path-safe action endpoint for the given record identifier.
fn action_path(id: &ActionId, suffix: Option<&str>) -> Result<String, ServiceError> {
    let raw = id.as_str();
    let path_safe = !raw.is_empty()
        && raw.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if !path_safe {
        return Err(ServiceError::Request("action id is not path-safe".to_string()));
    }
    Ok(match suffix {
        Some(suffix) => format!("/v1/actions/{raw}/{suffix}"),
        None => format!("/v1/actions/{raw}"),
    })
}

/// Extracts the HTTP status carried by an error, when any.
const fn error_status(err: &ServiceError) -> Option<u16> {
    match err {
        ServiceError::Status {
            status, ..
        } => Some(*status),
        _ => None,
    }
}
