// crates/action-gate-client/src/lib.rs
// ============================================================================
// Module: Action Gate Client Library
// Description: HTTP client for the remote decision authority.
// Purpose: Expose the decide, audit, and polling surfaces over HTTPS.
// Dependencies: action-gate-core, reqwest, tokio
// ============================================================================

//! ## Overview
//! The client crate talks to the remote decision authority: it retrieves
//! decisions for the execution gate, submits audit records, and polls
//! submissions to resolution. Configuration is explicit and immutable
//! after construction; there is no process-global state. Decision and
//! audit calls are side-effect free on the caller's systems and retry with
//! bounded exponential backoff; nothing in this crate ever retries an
//! executor.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod telemetry;
pub(crate) mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::GateServiceClient;
pub use client::WaitOptions;
pub use config::ClientConfig;
pub use config::ConfigError;
pub use config::RetryPolicy;
pub use telemetry::GateEndpoint;
pub use telemetry::GateMetrics;
pub use telemetry::NoopMetrics;
pub use telemetry::RequestMetricEvent;
pub use telemetry::RequestOutcome;
