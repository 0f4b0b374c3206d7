// crates/action-gate-client/src/telemetry.rs
// ============================================================================
// Module: Client Telemetry
// Description: Observability hooks for authority requests.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: action-gate-core
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for request counters and
//! latency histograms. It is intentionally dependency-light so downstream
//! deployments can plug in Prometheus or OpenTelemetry without redesign.
//! Events carry endpoint and outcome labels only; request parameters and
//! tokens never reach a metrics sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for authority request histograms.
pub const REQUEST_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 30_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Authority endpoint classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GateEndpoint {
    /// POST /v1/gate/decide.
    Decide,
    /// POST /v1/actions.
    SubmitAction,
    /// POST /v1/actions/batch.
    BatchSubmit,
    /// GET /v1/actions/{id}.
    GetAction,
    /// POST /v1/actions/{id}/approve.
    ApproveAction,
}

impl GateEndpoint {
    /// Returns a stable label for the endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decide => "gate/decide",
            Self::SubmitAction => "actions/submit",
            Self::BatchSubmit => "actions/batch",
            Self::GetAction => "actions/get",
            Self::ApproveAction => "actions/approve",
        }
    }
}

/// Authority request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RequestOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

impl RequestOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Authority request metric event payload.
///
/// # Invariants
/// - Optional fields are `None` when the metadata is unavailable.
#[derive(Debug, Clone)]
pub struct RequestMetricEvent {
    /// Endpoint classification.
    pub endpoint: GateEndpoint,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Attempts spent on the call including retries.
    pub attempts: u32,
    /// Final HTTP status when a response was received.
    pub status: Option<u16>,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for authority requests and latencies.
pub trait GateMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: RequestMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: RequestMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl GateMetrics for NoopMetrics {
    fn record_request(&self, _event: RequestMetricEvent) {}

    fn record_latency(&self, _event: RequestMetricEvent, _latency: Duration) {}
}
